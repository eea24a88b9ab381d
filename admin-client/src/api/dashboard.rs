//! `/admin/dashboard` and analytics endpoints

use shared::response::RevenueResponse;
use shared::{DashboardStats, RevenuePoint};

use super::{query_key, AdminApi};
use crate::cache::TagType;
use crate::http::HttpClient;
use crate::ClientResult;

pub struct DashboardApi<'a, C> {
    api: &'a AdminApi<C>,
}

impl<'a, C: HttpClient> DashboardApi<'a, C> {
    pub(super) fn new(api: &'a AdminApi<C>) -> Self {
        Self { api }
    }

    pub async fn stats(&self) -> ClientResult<DashboardStats> {
        self.api
            .query(
                "admin/dashboard/stats".to_string(),
                vec![TagType::Dashboard.into()],
                None,
                || self.api.http.get("admin/dashboard/stats"),
            )
            .await
    }

    /// Monthly revenue series, e.g. `period = "7months"`
    pub async fn revenue(&self, period: &str) -> ClientResult<Vec<RevenuePoint>> {
        let params = vec![("period", period.to_string())];
        let http = &self.api.http;
        let query = &params;
        self.api
            .query(
                query_key("admin/analytics/revenue", &params),
                vec![TagType::Dashboard.into()],
                None,
                move || async move {
                    let resp: RevenueResponse = http.get_with("admin/analytics/revenue", query).await?;
                    Ok(resp.into_points())
                },
            )
            .await
    }
}
