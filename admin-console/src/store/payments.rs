//! Payments slice: transactions, affiliate payouts and payment stats

use admin_client::HttpClient;
use shared::{
    Decimal, PaymentStats, PaymentStatus, PayoutEntry, Transaction, TransactionQuery,
    TransactionsPage, UserId,
};

use super::{InFlight, RequestSeq, Store};
use crate::error::ConsoleResult;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsState {
    pub transactions: Vec<Transaction>,
    pub total_pages: u32,
    pub loading_transactions: bool,

    pub payouts: Vec<PayoutEntry>,
    pub loading_payouts: bool,

    pub stats: PaymentStats,
    pub loading_stats: bool,

    /// Payout user ids and refunded transaction ids with a request in flight
    pub processing: InFlight<String>,
    pub error: Option<String>,
    /// Transactions were patched locally since the last transactions fetch
    pub transactions_stale: bool,
    /// Payouts were removed locally since the last payouts fetch
    pub payouts_stale: bool,

    transactions_seq: RequestSeq,
    payouts_seq: RequestSeq,
}

impl Default for PaymentsState {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            total_pages: 1,
            loading_transactions: false,
            payouts: Vec::new(),
            loading_payouts: false,
            stats: PaymentStats::default(),
            loading_stats: false,
            processing: InFlight::default(),
            error: None,
            transactions_stale: false,
            payouts_stale: false,
            transactions_seq: RequestSeq::default(),
            payouts_seq: RequestSeq::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PaymentsAction {
    TransactionsPending { seq: u64 },
    TransactionsFulfilled { seq: u64, page: TransactionsPage },
    TransactionsRejected { seq: u64, error: String },
    PayoutsPending { seq: u64 },
    PayoutsFulfilled { seq: u64, payouts: Vec<PayoutEntry> },
    PayoutsRejected { seq: u64, error: String },
    ConfirmPayoutPending { user_id: UserId },
    ConfirmPayoutFulfilled { user_id: UserId, amount: Decimal },
    ConfirmPayoutRejected { user_id: UserId, error: String },
    StatsPending,
    StatsFulfilled { stats: PaymentStats },
    StatsRejected { error: String },
    RefundPending { transaction_id: String },
    RefundFulfilled { transaction_id: String },
    RefundRejected { transaction_id: String, error: String },
    ClearError,
}

impl PaymentsState {
    pub fn reduce(&mut self, action: PaymentsAction) {
        match action {
            PaymentsAction::TransactionsPending { seq } => {
                self.transactions_seq.issue(seq);
                self.loading_transactions = true;
                self.error = None;
            }
            PaymentsAction::TransactionsFulfilled { seq, page } => {
                if !self.transactions_seq.is_current(seq) {
                    tracing::debug!(seq, "Dropping stale transactions response");
                    return;
                }
                self.loading_transactions = false;
                self.total_pages = page.total_pages();
                self.transactions = page.transactions;
                self.transactions_stale = false;
            }
            PaymentsAction::TransactionsRejected { seq, error } => {
                if self.transactions_seq.is_current(seq) {
                    self.loading_transactions = false;
                    self.error = Some(error);
                }
            }

            PaymentsAction::PayoutsPending { seq } => {
                self.payouts_seq.issue(seq);
                self.loading_payouts = true;
                self.error = None;
            }
            PaymentsAction::PayoutsFulfilled { seq, payouts } => {
                if !self.payouts_seq.is_current(seq) {
                    tracing::debug!(seq, "Dropping stale payouts response");
                    return;
                }
                self.loading_payouts = false;
                self.payouts = payouts;
                self.payouts_stale = false;
            }
            PaymentsAction::PayoutsRejected { seq, error } => {
                if self.payouts_seq.is_current(seq) {
                    self.loading_payouts = false;
                    self.error = Some(error);
                }
            }

            PaymentsAction::ConfirmPayoutPending { user_id } => {
                self.processing.insert(user_id);
                self.error = None;
            }
            PaymentsAction::ConfirmPayoutFulfilled { user_id, amount } => {
                self.processing.remove(&user_id);
                self.payouts.retain(|p| p.user_id != user_id);
                self.stats.settle_payout(amount);
                self.payouts_stale = true;
            }
            PaymentsAction::ConfirmPayoutRejected { user_id, error } => {
                self.processing.remove(&user_id);
                self.error = Some(error);
            }

            PaymentsAction::StatsPending => {
                self.loading_stats = true;
                self.error = None;
            }
            PaymentsAction::StatsFulfilled { stats } => {
                self.loading_stats = false;
                self.stats = stats;
            }
            PaymentsAction::StatsRejected { error } => {
                self.loading_stats = false;
                self.error = Some(error);
            }

            PaymentsAction::RefundPending { transaction_id } => {
                self.processing.insert(transaction_id);
                self.error = None;
            }
            PaymentsAction::RefundFulfilled { transaction_id } => {
                self.processing.remove(&transaction_id);
                if let Some(t) = self.transactions.iter_mut().find(|t| t.id == transaction_id) {
                    t.status = PaymentStatus::Refunded;
                    self.transactions_stale = true;
                }
            }
            PaymentsAction::RefundRejected {
                transaction_id,
                error,
            } => {
                self.processing.remove(&transaction_id);
                self.error = Some(error);
            }

            PaymentsAction::ClearError => self.error = None,
        }
    }

    pub fn is_processing(&self, id: &str) -> bool {
        self.processing.contains(id)
    }

    pub fn find_payout(&self, user_id: &str) -> Option<&PayoutEntry> {
        self.payouts.iter().find(|p| p.user_id == user_id)
    }

    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }
}

impl<C: HttpClient> Store<C> {
    pub async fn fetch_transactions(&self, query: &TransactionQuery) -> ConsoleResult<()> {
        let seq = self.next_seq();
        self.dispatch_payments(PaymentsAction::TransactionsPending { seq });
        match self.api().payments().transactions(query).await {
            Ok(page) => {
                self.dispatch_payments(PaymentsAction::TransactionsFulfilled { seq, page });
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Failed to fetch transactions");
                self.dispatch_payments(PaymentsAction::TransactionsRejected { seq, error });
                Err(e.into())
            }
        }
    }

    pub async fn fetch_payouts(&self) -> ConsoleResult<()> {
        let seq = self.next_seq();
        self.dispatch_payments(PaymentsAction::PayoutsPending { seq });
        match self.api().payments().payouts().await {
            Ok(payouts) => {
                self.dispatch_payments(PaymentsAction::PayoutsFulfilled { seq, payouts });
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Failed to fetch payouts");
                self.dispatch_payments(PaymentsAction::PayoutsRejected { seq, error });
                Err(e.into())
            }
        }
    }

    pub async fn fetch_payment_stats(&self) -> ConsoleResult<()> {
        self.dispatch_payments(PaymentsAction::StatsPending);
        match self.api().payments().stats().await {
            Ok(stats) => {
                self.dispatch_payments(PaymentsAction::StatsFulfilled { stats });
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Failed to fetch payment stats");
                self.dispatch_payments(PaymentsAction::StatsRejected { error });
                Err(e.into())
            }
        }
    }

    /// Record a payout, then drop the row and settle the pending total locally
    pub async fn confirm_payout(&self, user_id: &str, amount: Decimal) -> ConsoleResult<()> {
        let user_id = user_id.to_string();
        self.dispatch_payments(PaymentsAction::ConfirmPayoutPending {
            user_id: user_id.clone(),
        });
        match self.api().payments().confirm_payout(&user_id, amount).await {
            Ok(_) => {
                tracing::info!(%user_id, %amount, "Payout recorded");
                self.dispatch_payments(PaymentsAction::ConfirmPayoutFulfilled { user_id, amount });
                self.notices().push(Notice::success("Payout recorded successfully!"));
                Ok(())
            }
            Err(e) => {
                if e.is_unauthorized() {
                    self.report(&e, "Action failed");
                } else {
                    self.notices().push(Notice::error("Action failed"));
                }
                self.dispatch_payments(PaymentsAction::ConfirmPayoutRejected {
                    user_id,
                    error: e.user_message(),
                });
                Err(e.into())
            }
        }
    }

    pub async fn refund_payment(&self, transaction_id: &str) -> ConsoleResult<()> {
        let transaction_id = transaction_id.to_string();
        self.dispatch_payments(PaymentsAction::RefundPending {
            transaction_id: transaction_id.clone(),
        });
        match self.api().payments().refund(&transaction_id).await {
            Ok(_) => {
                tracing::info!(%transaction_id, "Payment refunded");
                self.dispatch_payments(PaymentsAction::RefundFulfilled { transaction_id });
                self.notices().push(Notice::success("Payment refunded successfully"));
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Refund failed");
                self.dispatch_payments(PaymentsAction::RefundRejected {
                    transaction_id,
                    error,
                });
                Err(e.into())
            }
        }
    }
}
