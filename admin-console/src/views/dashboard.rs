//! Dashboard headline figures and revenue series

use admin_client::HttpClient;
use shared::{DashboardStats, RevenuePoint};

use crate::error::ConsoleResult;
use crate::format::{format_currency, format_number, format_percent};
use crate::store::Store;

/// Period of the revenue chart
pub const REVENUE_PERIOD: &str = "7months";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub revenue: Vec<RevenuePoint>,
}

impl DashboardSummary {
    /// Label / value pairs of the stat cards
    pub fn cards(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Users", format_number(self.stats.total_users)),
            ("Total Revenue", format_currency(self.stats.total_revenue)),
            (
                "Active Subscriptions",
                format_number(self.stats.active_subscriptions),
            ),
            ("Growth Rate", format_percent(self.stats.growth_rate)),
        ]
    }
}

impl<C: HttpClient> Store<C> {
    pub async fn load_dashboard(&self) -> ConsoleResult<DashboardSummary> {
        let dashboard = self.api().dashboard();
        let stats = match dashboard.stats().await {
            Ok(stats) => stats,
            Err(e) => {
                self.report(&e, "Failed to load dashboard");
                return Err(e.into());
            }
        };
        let revenue = match dashboard.revenue(REVENUE_PERIOD).await {
            Ok(points) => points,
            Err(e) => {
                self.report(&e, "Failed to load revenue analytics");
                return Err(e.into());
            }
        };
        Ok(DashboardSummary { stats, revenue })
    }
}
