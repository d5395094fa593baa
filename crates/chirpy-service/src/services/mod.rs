//! Business logic services
//!
//! Services borrow a `ServiceContext` per call and hold no state of their own.

pub mod context;
pub mod error;
pub mod hit_counter;
pub mod session;
pub mod user;

mod blocking;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use hit_counter::{AtomicHitCounter, HitCounter};
pub use session::SessionService;
pub use user::UserService;
