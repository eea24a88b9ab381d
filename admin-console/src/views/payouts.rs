//! Payouts tab and its confirmation dialog

use std::sync::Arc;

use admin_client::HttpClient;
use shared::PayoutEntry;

use super::list::TableView;
use crate::error::{ConsoleError, ConsoleResult};
use crate::format::format_currency;
use crate::store::Store;

/// Confirmation dialog of a single payout.
///
/// `Closed -> Open -> Confirming -> Closed` on success; a rejected request
/// goes back to `Open` with the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PayoutDialog {
    #[default]
    Closed,
    Open(PayoutEntry),
    Confirming(PayoutEntry),
}

impl PayoutDialog {
    /// Select an affiliate. Ignored while a request is in flight.
    pub fn open(&mut self, entry: PayoutEntry) {
        if !self.is_confirming() {
            *self = PayoutDialog::Open(entry);
        }
    }

    pub fn cancel(&mut self) {
        if !self.is_confirming() {
            *self = PayoutDialog::Closed;
        }
    }

    /// Start the request; returns the entry to pay out
    pub fn begin(&mut self) -> Option<PayoutEntry> {
        match std::mem::take(self) {
            PayoutDialog::Open(entry) => {
                *self = PayoutDialog::Confirming(entry.clone());
                Some(entry)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn succeed(&mut self) {
        if self.is_confirming() {
            *self = PayoutDialog::Closed;
        }
    }

    pub fn fail(&mut self) {
        if let PayoutDialog::Confirming(entry) = std::mem::take(self) {
            *self = PayoutDialog::Open(entry);
        }
    }

    pub fn entry(&self) -> Option<&PayoutEntry> {
        match self {
            PayoutDialog::Closed => None,
            PayoutDialog::Open(entry) | PayoutDialog::Confirming(entry) => Some(entry),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, PayoutDialog::Closed)
    }

    pub fn is_confirming(&self) -> bool {
        matches!(self, PayoutDialog::Confirming(_))
    }

    pub fn prompt(&self) -> Option<String> {
        self.entry().map(payout_prompt)
    }
}

/// `Confirm payout of $150.00 to Ann?`
pub fn payout_prompt(entry: &PayoutEntry) -> String {
    format!(
        "Confirm payout of {} to {}?",
        format_currency(entry.wallet_balance),
        entry.name
    )
}

pub struct PayoutsPanel<C> {
    store: Arc<Store<C>>,
    dialog: PayoutDialog,
}

impl<C: HttpClient> PayoutsPanel<C> {
    pub fn new(store: Arc<Store<C>>) -> Self {
        Self {
            store,
            dialog: PayoutDialog::Closed,
        }
    }

    /// Load the payouts list when the tab becomes active
    pub async fn activate(&mut self) -> ConsoleResult<()> {
        self.store.fetch_payouts().await
    }

    /// Refetch when rows were removed locally since the last load
    pub async fn focus(&mut self) -> ConsoleResult<bool> {
        if !self.store.with_payments(|s| s.payouts_stale) {
            return Ok(false);
        }
        self.store.fetch_payouts().await?;
        Ok(true)
    }

    pub fn dialog(&self) -> &PayoutDialog {
        &self.dialog
    }

    /// Open the dialog for `user_id`
    pub fn select(&mut self, user_id: &str) -> ConsoleResult<()> {
        let entry = self
            .store
            .with_payments(|s| s.find_payout(user_id).cloned())
            .ok_or_else(|| ConsoleError::NotFound(format!("payout for user {user_id}")))?;
        self.dialog.open(entry);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.dialog.cancel();
    }

    /// Confirm the selected payout for its full wallet balance
    pub async fn confirm(&mut self) -> ConsoleResult<()> {
        let Some(entry) = self.dialog.begin() else {
            return Ok(());
        };
        match self
            .store
            .confirm_payout(&entry.user_id, entry.wallet_balance)
            .await
        {
            Ok(()) => {
                self.dialog.succeed();
                Ok(())
            }
            Err(e) => {
                self.dialog.fail();
                Err(e)
            }
        }
    }

    pub fn is_processing(&self, user_id: &str) -> bool {
        self.store.with_payments(|s| s.is_processing(user_id))
    }

    pub fn with_table<R>(&self, f: impl FnOnce(TableView<'_, PayoutEntry>) -> R) -> R {
        self.store
            .with_payments(|s| f(TableView::of(s.loading_payouts, &s.payouts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Decimal;

    fn entry() -> PayoutEntry {
        serde_json::from_value(serde_json::json!({
            "_id": "a1",
            "name": "Ann",
            "walletBalance": 150
        }))
        .unwrap()
    }

    #[test]
    fn test_success_path() {
        let mut dialog = PayoutDialog::default();
        dialog.open(entry());
        assert_eq!(dialog.prompt().as_deref(), Some("Confirm payout of $150.00 to Ann?"));

        let paid = dialog.begin().unwrap();
        assert_eq!(paid.wallet_balance, Decimal::from(150));
        assert!(dialog.is_confirming());

        dialog.succeed();
        assert_eq!(dialog, PayoutDialog::Closed);
    }

    #[test]
    fn test_failure_returns_to_open() {
        let mut dialog = PayoutDialog::default();
        dialog.open(entry());
        dialog.begin();
        dialog.fail();
        assert_eq!(dialog, PayoutDialog::Open(entry()));
    }

    #[test]
    fn test_no_transitions_while_confirming() {
        let mut dialog = PayoutDialog::default();
        dialog.open(entry());
        dialog.begin();
        dialog.cancel();
        assert!(dialog.is_confirming());
        assert_eq!(dialog.begin(), None);
        assert!(dialog.is_confirming());
    }

    #[test]
    fn test_begin_needs_open_dialog() {
        let mut dialog = PayoutDialog::default();
        assert_eq!(dialog.begin(), None);
        dialog.succeed();
        dialog.fail();
        assert_eq!(dialog, PayoutDialog::Closed);
    }
}
