//! `/admin/transactions`, `/admin/payouts` and payment stats endpoints

use shared::client::PayoutConfirmRequest;
use shared::response::PayoutsResponse;
use shared::{
    Ack, Decimal, PaymentStats, PayoutEntry, Transaction, TransactionQuery, TransactionsPage,
};

use super::{query_key, AdminApi};
use crate::cache::{Tag, TagType};
use crate::http::HttpClient;
use crate::ClientResult;

pub struct PaymentsApi<'a, C> {
    api: &'a AdminApi<C>,
}

impl<'a, C: HttpClient> PaymentsApi<'a, C> {
    pub(super) fn new(api: &'a AdminApi<C>) -> Self {
        Self { api }
    }

    pub async fn transactions(&self, query: &TransactionQuery) -> ClientResult<TransactionsPage> {
        let params = query.to_params();
        self.api
            .query(
                query_key("admin/transactions", &params),
                vec![TagType::Payments.into()],
                None,
                || self.api.http.get_with("admin/transactions", &params),
            )
            .await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Transaction> {
        let path = format!("admin/payments/{id}");
        self.api
            .query(
                path.clone(),
                vec![Tag::id(TagType::Payments, id)],
                None,
                || self.api.http.get(&path),
            )
            .await
    }

    /// Affiliates with an unpaid wallet balance
    pub async fn payouts(&self) -> ClientResult<Vec<PayoutEntry>> {
        let http = &self.api.http;
        self.api
            .query(
                "admin/payouts".to_string(),
                vec![TagType::Payments.into()],
                None,
                move || async move {
                    let resp: PayoutsResponse = http.get("admin/payouts").await?;
                    Ok(resp.into_entries())
                },
            )
            .await
    }

    /// Record that `amount` has been paid out to `user_id`
    pub async fn confirm_payout(&self, user_id: &str, amount: Decimal) -> ClientResult<Ack> {
        let req = PayoutConfirmRequest {
            user_id: user_id.to_string(),
            amount,
        };
        self.api
            .mutate(
                &[TagType::Payments.into(), TagType::Dashboard.into()],
                self.api.http.post("admin/payout-confirm", &req),
            )
            .await
    }

    pub async fn stats(&self) -> ClientResult<PaymentStats> {
        self.api
            .query(
                "admin/payment-stats".to_string(),
                vec![TagType::Dashboard.into()],
                None,
                || self.api.http.get("admin/payment-stats"),
            )
            .await
    }

    pub async fn refund(&self, id: &str) -> ClientResult<Ack> {
        let path = format!("admin/payments/{id}/refund");
        self.api
            .mutate(
                &[TagType::Payments.into(), TagType::Dashboard.into()],
                self.api.http.post_empty(&path),
            )
            .await
    }
}
