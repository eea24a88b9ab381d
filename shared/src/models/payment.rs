//! Payment / transaction Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::UnknownVariant;

/// Payment status as reported by the billing backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    #[default]
    Pending,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Completed,
        PaymentStatus::Pending,
        PaymentStatus::Failed,
        PaymentStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        PaymentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| UnknownVariant::new("payment status", s))
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Populated owner of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Transaction owner: the backend either populates the user or sends the bare id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Populated(UserSummary),
}

impl UserRef {
    pub fn id(&self) -> Option<&str> {
        match self {
            UserRef::Id(id) => Some(id),
            UserRef::Populated(summary) => summary.id.as_deref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            UserRef::Id(_) => None,
            UserRef::Populated(summary) => summary.name.as_deref(),
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            UserRef::Id(_) => None,
            UserRef::Populated(summary) => summary.email.as_deref(),
        }
    }
}

/// Transaction entity as listed by `/admin/transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "userId", default)]
    pub user: Option<UserRef>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(UserRef::name)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().and_then(UserRef::email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_and_bare_user_ref() {
        let populated: Transaction = serde_json::from_str(
            r#"{"_id":"t1","userId":{"_id":"u1","name":"Ann","email":"ann@x.io"},"amount":29,"status":"completed"}"#,
        )
        .unwrap();
        assert_eq!(populated.user_name(), Some("Ann"));
        assert_eq!(populated.user.as_ref().and_then(UserRef::id), Some("u1"));
        assert_eq!(populated.status, PaymentStatus::Completed);

        let bare: Transaction =
            serde_json::from_str(r#"{"_id":"t2","userId":"u9","amount":"9.99","status":"refunded"}"#)
                .unwrap();
        assert_eq!(bare.user_name(), None);
        assert_eq!(bare.user.as_ref().and_then(UserRef::id), Some("u9"));
        assert_eq!(bare.amount, Decimal::new(999, 2));
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Completed".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        assert!("chargeback".parse::<PaymentStatus>().is_err());
    }
}
