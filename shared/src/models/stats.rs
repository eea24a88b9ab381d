//! Aggregate statistics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment page statistics (`/admin/payment-stats`)
///
/// Every field defaults to zero when the backend omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentStats {
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub pending_payouts: Decimal,
    pub success_rate: f64,
}

impl PaymentStats {
    /// Subtract a confirmed payout from the pending total, never going below zero
    pub fn settle_payout(&mut self, amount: Decimal) {
        self.pending_payouts = (self.pending_payouts - amount).max(Decimal::ZERO);
    }
}

/// Dashboard headline figures (`/admin/dashboard/stats`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_revenue: Decimal,
    pub active_subscriptions: u64,
    pub growth_rate: f64,
    pub user_growth: f64,
    pub revenue_growth: f64,
}

/// One month of the revenue analytics series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub month: String,
    #[serde(default)]
    pub revenue: Decimal,
    #[serde(default)]
    pub users: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_stats_default_to_zero() {
        let stats: PaymentStats = serde_json::from_str(r#"{"totalRevenue": 1200}"#).unwrap();
        assert_eq!(stats.total_revenue, Decimal::from(1200));
        assert_eq!(stats.pending_payouts, Decimal::ZERO);
        assert_eq!(stats.success_rate, 0.0);
    }

    #[test]
    fn test_settle_payout_clamps_at_zero() {
        let mut stats = PaymentStats {
            pending_payouts: Decimal::from(50),
            ..Default::default()
        };
        stats.settle_payout(Decimal::from(20));
        assert_eq!(stats.pending_payouts, Decimal::from(30));
        stats.settle_payout(Decimal::from(100));
        assert_eq!(stats.pending_payouts, Decimal::ZERO);
    }
}
