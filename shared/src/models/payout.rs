//! Payout Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::user::{AffiliateTier, UserId};

/// Affiliate awaiting a payout (snapshot returned by `/admin/payouts`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutEntry {
    #[serde(rename = "_id", alias = "id")]
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub affiliate_tier: AffiliateTier,
    #[serde(default)]
    pub referral_code: Option<String>,
    /// Unpaid balance owed to the affiliate
    #[serde(default)]
    pub wallet_balance: Decimal,
}
