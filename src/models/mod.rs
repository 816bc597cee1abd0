// Flat row structs mirroring the relational schema.

pub mod admin;
pub mod billing;
pub mod facility;
pub mod health;
pub mod member;
pub mod scheduling;
pub mod trainer;

pub use admin::*;
pub use billing::*;
pub use facility::*;
pub use health::*;
pub use member::*;
pub use scheduling::*;
pub use trainer::*;
