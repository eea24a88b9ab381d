//! Shared types for the admin console
//!
//! Wire DTOs mirrored from the backend REST API, list envelopes and
//! query parameter builders. These types are consumed by `admin-client`
//! and `admin-console`; nothing here validates or owns the data.

pub mod client;
pub mod models;
pub mod query;
pub mod response;

// Re-exports
pub use rust_decimal::Decimal;
pub use serde::{Deserialize, Serialize};

pub use client::{AuthPayload, LoginRequest};
pub use models::{
    AdminProfile, AffiliateTier, DashboardStats, PaymentStats, PaymentStatus, PayoutEntry,
    PlanTier, RevenuePoint, Transaction, UnknownVariant, User, UserId, UserRef,
};
pub use query::{Filter, QueryParams, TransactionQuery, UserQuery};
pub use response::{Ack, TransactionsPage, UsersPage};
