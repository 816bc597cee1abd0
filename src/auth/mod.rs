// Session-based authentication for the three portals.

pub mod errors;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod session;

pub use errors::AuthError;
pub use middleware::{require_admin, require_member, require_trainer};
pub use models::{LoginForm, RegisterMemberForm, Role, SessionClaims, SessionUser};
pub use password::{hash_password, needs_rehash, verify_password, PasswordError};
pub use service::AuthService;
pub use session::{SessionSigner, SESSION_COOKIE};
