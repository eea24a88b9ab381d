//! User Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Backend user identifier (`_id`)
pub type UserId = String;

/// Subscription plan of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum PlanTier {
    #[default]
    Free,
    Basic,
    Pro,
    ProPlus,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Free,
        PlanTier::Basic,
        PlanTier::Pro,
        PlanTier::ProPlus,
        PlanTier::Enterprise,
    ];

    /// Wire value used in query strings and request bodies
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Basic => "basic",
            PlanTier::Pro => "pro",
            PlanTier::ProPlus => "pro_plus",
            PlanTier::Enterprise => "enterprise",
        }
    }

    /// Human readable plan name
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free Plan",
            PlanTier::Basic => "Basic",
            PlanTier::Pro => "Pro",
            PlanTier::ProPlus => "Pro Plus",
            PlanTier::Enterprise => "Enterprise",
        }
    }
}

impl FromStr for PlanTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        PlanTier::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| UnknownVariant::new("plan", s))
    }
}

// Unknown plans from the backend degrade to Free instead of failing the whole page.
impl From<Option<String>> for PlanTier {
    fn from(value: Option<String>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Affiliate programme tier
///
/// `Tier1` is the "Founding Partner" level, `Tier2` a regular affiliate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum AffiliateTier {
    #[default]
    None,
    Tier1,
    Tier2,
}

impl AffiliateTier {
    pub const ALL: [AffiliateTier; 3] = [
        AffiliateTier::None,
        AffiliateTier::Tier1,
        AffiliateTier::Tier2,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AffiliateTier::None => "none",
            AffiliateTier::Tier1 => "tier1",
            AffiliateTier::Tier2 => "tier2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AffiliateTier::None => "None",
            AffiliateTier::Tier1 => "Founding Partner",
            AffiliateTier::Tier2 => "Affiliate",
        }
    }
}

impl FromStr for AffiliateTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AffiliateTier::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownVariant::new("affiliate tier", s))
    }
}

impl From<Option<String>> for AffiliateTier {
    fn from(value: Option<String>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for AffiliateTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an enum from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// User entity as listed by `/admin/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "subscriptionPlan", alias = "planType")]
    pub plan: PlanTier,
    #[serde(default)]
    pub affiliate_tier: AffiliateTier,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub wallet_balance: Decimal,
    #[serde(default)]
    pub referred_by: Option<UserId>,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
