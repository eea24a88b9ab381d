//! Data models
//!
//! Thin DTOs mirrored from the backend. The backend is MongoDB-backed, so
//! identifiers are opaque strings serialized as `_id`.

pub mod payment;
pub mod payout;
pub mod profile;
pub mod stats;
pub mod user;

// Re-exports
pub use payment::*;
pub use payout::*;
pub use profile::*;
pub use stats::*;
pub use user::*;
