// Business logic over the connection pool.

pub mod billing;
pub mod booking;
pub mod dashboard;
pub mod facility;
pub mod member;
pub mod trainer;

pub use billing::{BillingError, BillingService};
pub use booking::{BookingError, BookingService};
pub use dashboard::DashboardService;
pub use facility::FacilityService;
pub use member::MemberService;
pub use trainer::{AvailabilityError, TrainerService};
