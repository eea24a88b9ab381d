//! API Response types
//!
//! List envelopes and acknowledgements returned by the backend. Field names
//! differ per resource (`users` / `transactions`), the page count is always
//! `pages`.

use serde::{Deserialize, Serialize};

use crate::models::{PayoutEntry, RevenuePoint, Transaction, User};

fn one() -> u32 {
    1
}

/// `GET /admin/users` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default = "one")]
    pub pages: u32,
}

impl UsersPage {
    /// Page count, never below one
    pub fn total_pages(&self) -> u32 {
        self.pages.max(1)
    }
}

/// `GET /admin/transactions` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsPage {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "one")]
    pub pages: u32,
}

impl TransactionsPage {
    pub fn total_pages(&self) -> u32 {
        self.pages.max(1)
    }
}

/// `GET /admin/payouts` answers with a bare array or a `{ payouts }` wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayoutsResponse {
    List(Vec<PayoutEntry>),
    Wrapped {
        #[serde(default)]
        payouts: Vec<PayoutEntry>,
    },
}

impl PayoutsResponse {
    pub fn into_entries(self) -> Vec<PayoutEntry> {
        match self {
            PayoutsResponse::List(entries) | PayoutsResponse::Wrapped { payouts: entries } => {
                entries
            }
        }
    }
}

/// `GET /admin/analytics/revenue` answers with a bare array or a `{ data }` wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RevenueResponse {
    List(Vec<RevenuePoint>),
    Wrapped {
        #[serde(default)]
        data: Vec<RevenuePoint>,
    },
}

impl RevenueResponse {
    pub fn into_points(self) -> Vec<RevenuePoint> {
        match self {
            RevenueResponse::List(points) | RevenueResponse::Wrapped { data: points } => points,
        }
    }
}

/// Bare success acknowledgement returned by mutations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_envelope_defaults() {
        let page: UsersPage = serde_json::from_str("{}").unwrap();
        assert!(page.users.is_empty());
        assert_eq!(page.total_pages(), 1);

        let page: TransactionsPage = serde_json::from_str(r#"{"pages":0}"#).unwrap();
        assert_eq!(page.total_pages(), 1);
    }

    #[test]
    fn test_payouts_bare_or_wrapped() {
        let bare: PayoutsResponse =
            serde_json::from_str(r#"[{"_id":"u1","name":"A","walletBalance":10}]"#).unwrap();
        assert_eq!(bare.into_entries().len(), 1);

        let wrapped: PayoutsResponse =
            serde_json::from_str(r#"{"payouts":[{"_id":"u1"},{"_id":"u2"}]}"#).unwrap();
        assert_eq!(wrapped.into_entries().len(), 2);
    }
}
