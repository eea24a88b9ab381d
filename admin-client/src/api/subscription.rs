//! `/subscription/*` endpoints (Stripe hosted pages)

use shared::client::{CheckoutItem, CheckoutSessionRequest, SessionUrl};

use super::AdminApi;
use crate::http::HttpClient;
use crate::ClientResult;

pub struct SubscriptionApi<'a, C> {
    api: &'a AdminApi<C>,
}

impl<'a, C: HttpClient> SubscriptionApi<'a, C> {
    pub(super) fn new(api: &'a AdminApi<C>) -> Self {
        Self { api }
    }

    pub async fn create_checkout_session(
        &self,
        item: CheckoutItem,
        price_id: Option<String>,
    ) -> ClientResult<SessionUrl> {
        let req = CheckoutSessionRequest {
            price_id,
            plan_type: item.plan_type().to_string(),
        };
        self.api
            .http
            .post("subscription/create-checkout-session", &req)
            .await
    }

    pub async fn create_portal_session(&self) -> ClientResult<SessionUrl> {
        self.api
            .http
            .post_empty("subscription/create-portal-session")
            .await
    }
}
