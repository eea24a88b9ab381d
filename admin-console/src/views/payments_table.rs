//! Transactions tab: status filter, refund and detail dialogs, CSV export

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use admin_client::HttpClient;
use chrono::NaiveDate;
use shared::{Filter, PaymentStatus, Transaction, TransactionQuery};

use super::list::{ListController, ListRequest, Pagination, TableView};
use crate::error::{ConsoleError, ConsoleResult};
use crate::export;
use crate::notice::Notice;
use crate::store::Store;

pub struct PaymentsTable<C> {
    store: Arc<Store<C>>,
    list: ListController<Filter<PaymentStatus>>,
    refund_dialog: Option<Transaction>,
    view_dialog: Option<Transaction>,
}

impl<C: HttpClient> PaymentsTable<C> {
    pub fn new(store: Arc<Store<C>>, quiet: Duration) -> Self {
        Self {
            store,
            list: ListController::new(Filter::All, quiet),
            refund_dialog: None,
            view_dialog: None,
        }
    }

    pub fn list(&self) -> &ListController<Filter<PaymentStatus>> {
        &self.list
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.list.set_search(text, now);
    }

    pub fn set_status(&mut self, status: Filter<PaymentStatus>) {
        self.list.update_filters(|f| *f = status);
    }

    pub fn set_page(&mut self, page: u32) {
        self.list.set_page(page);
    }

    pub fn query_for(request: &ListRequest<Filter<PaymentStatus>>) -> TransactionQuery {
        TransactionQuery {
            page: request.page,
            limit: None,
            search: request.search.clone(),
            status: request.filters,
        }
    }

    /// Load the stats cards shown above the table
    pub async fn activate(&mut self, now: Instant) -> ConsoleResult<bool> {
        self.store.fetch_payment_stats().await?;
        self.tick(now).await
    }

    /// Fetch if the list arguments changed. Returns whether a fetch ran.
    pub async fn tick(&mut self, now: Instant) -> ConsoleResult<bool> {
        let Some(request) = self.list.poll(now) else {
            return Ok(false);
        };
        let result = self.store.fetch_transactions(&Self::query_for(&request)).await;
        let total = self.store.with_payments(|s| s.total_pages);
        self.list.set_total_pages(total);
        result.map(|_| true)
    }

    /// Refetch when rows were patched locally since the last load
    pub async fn focus(&mut self, now: Instant) -> ConsoleResult<bool> {
        if self.store.with_payments(|s| s.transactions_stale) {
            self.list.invalidate();
        }
        self.tick(now).await
    }

    fn lookup(&self, id: &str) -> ConsoleResult<Transaction> {
        self.store
            .with_payments(|s| s.find_transaction(id).cloned())
            .ok_or_else(|| ConsoleError::NotFound(format!("transaction {id}")))
    }

    pub fn open_refund(&mut self, id: &str) -> ConsoleResult<()> {
        self.refund_dialog = Some(self.lookup(id)?);
        Ok(())
    }

    pub fn close_refund(&mut self) {
        self.refund_dialog = None;
    }

    pub fn refund_dialog(&self) -> Option<&Transaction> {
        self.refund_dialog.as_ref()
    }

    pub fn is_refunding(&self) -> bool {
        self.refund_dialog
            .as_ref()
            .is_some_and(|t| self.store.with_payments(|s| s.is_processing(&t.id)))
    }

    /// Refund the transaction in the open dialog; the dialog closes on success
    pub async fn confirm_refund(&mut self) -> ConsoleResult<()> {
        let Some(txn) = self.refund_dialog.clone() else {
            return Ok(());
        };
        self.store.refund_payment(&txn.id).await?;
        self.refund_dialog = None;
        Ok(())
    }

    pub fn open_details(&mut self, id: &str) -> ConsoleResult<()> {
        self.view_dialog = Some(self.lookup(id)?);
        Ok(())
    }

    pub fn close_details(&mut self) {
        self.view_dialog = None;
    }

    pub fn details(&self) -> Option<&Transaction> {
        self.view_dialog.as_ref()
    }

    /// Write the loaded rows to `dir/payments-<date>.csv`
    pub fn export_csv(&self, dir: &Path, date: NaiveDate) -> ConsoleResult<PathBuf> {
        let result = self
            .store
            .with_payments(|s| export::export_payments(dir, &s.transactions, date));
        match &result {
            Ok(_) => self.store.notices().push(Notice::success("Export completed")),
            Err(e) => self.store.notices().push(Notice::error(e.to_string())),
        }
        result
    }

    pub fn with_table<R>(&self, f: impl FnOnce(TableView<'_, Transaction>) -> R) -> R {
        self.store
            .with_payments(|s| f(TableView::of(s.loading_transactions, &s.transactions)))
    }

    pub fn pagination(&self) -> Pagination {
        self.list.pagination()
    }
}
