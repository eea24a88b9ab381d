//! Users slice

use admin_client::HttpClient;
use shared::{AffiliateTier, User, UserId, UserQuery, UsersPage};

use super::{InFlight, RequestSeq, Store};
use crate::error::ConsoleResult;
use crate::notice::Notice;

#[derive(Debug, Clone, PartialEq)]
pub struct UsersState {
    pub users: Vec<User>,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    /// Users with a tier update in flight
    pub updating: InFlight<UserId>,
    /// Rows were patched locally since the last fetch
    pub stale: bool,
    seq: RequestSeq,
}

impl Default for UsersState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            total_pages: 1,
            loading: false,
            error: None,
            updating: InFlight::default(),
            stale: false,
            seq: RequestSeq::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum UsersAction {
    FetchPending { seq: u64 },
    FetchFulfilled { seq: u64, page: UsersPage },
    FetchRejected { seq: u64, error: String },
    UpdateTierPending { user_id: UserId },
    UpdateTierFulfilled { user_id: UserId, tier: AffiliateTier },
    UpdateTierRejected { user_id: UserId, error: String },
    ClearError,
}

impl UsersState {
    pub fn reduce(&mut self, action: UsersAction) {
        match action {
            UsersAction::FetchPending { seq } => {
                self.seq.issue(seq);
                self.loading = true;
                self.error = None;
            }
            UsersAction::FetchFulfilled { seq, page } => {
                if !self.seq.is_current(seq) {
                    tracing::debug!(seq, latest = self.seq.latest(), "Dropping stale users response");
                    return;
                }
                self.loading = false;
                self.total_pages = page.total_pages();
                self.users = page.users;
                self.stale = false;
            }
            UsersAction::FetchRejected { seq, error } => {
                if !self.seq.is_current(seq) {
                    return;
                }
                self.loading = false;
                self.error = Some(error);
            }
            UsersAction::UpdateTierPending { user_id } => {
                self.updating.insert(user_id);
                self.error = None;
            }
            UsersAction::UpdateTierFulfilled { user_id, tier } => {
                self.updating.remove(&user_id);
                if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
                    user.affiliate_tier = tier;
                    self.stale = true;
                }
            }
            UsersAction::UpdateTierRejected { user_id, error } => {
                self.updating.remove(&user_id);
                self.error = Some(error);
            }
            UsersAction::ClearError => self.error = None,
        }
    }

    pub fn is_updating(&self, user_id: &str) -> bool {
        self.updating.contains(user_id)
    }

    pub fn find(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }
}

/// Notice shown after a successful tier change
pub fn tier_notice(tier: AffiliateTier) -> &'static str {
    match tier {
        AffiliateTier::Tier1 => "User is now a Founding Partner!",
        AffiliateTier::Tier2 => "User is now an Affiliate.",
        AffiliateTier::None => "Status removed.",
    }
}

impl<C: HttpClient> Store<C> {
    /// Load one page of users
    pub async fn fetch_users(&self, query: &UserQuery) -> ConsoleResult<()> {
        let seq = self.next_seq();
        self.dispatch_users(UsersAction::FetchPending { seq });
        match self.api().users().list(query).await {
            Ok(page) => {
                tracing::debug!(page = query.page, rows = page.users.len(), "Users loaded");
                self.dispatch_users(UsersAction::FetchFulfilled { seq, page });
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Failed to load users");
                self.dispatch_users(UsersAction::FetchRejected { seq, error });
                Err(e.into())
            }
        }
    }

    /// Change a user's affiliate tier and patch the loaded row
    pub async fn update_tier(&self, user_id: &str, tier: AffiliateTier) -> ConsoleResult<()> {
        let user_id = user_id.to_string();
        self.dispatch_users(UsersAction::UpdateTierPending {
            user_id: user_id.clone(),
        });
        match self.api().users().update_tier(&user_id, tier).await {
            Ok(_) => {
                tracing::info!(%user_id, tier = tier.as_str(), "Affiliate tier updated");
                self.dispatch_users(UsersAction::UpdateTierFulfilled { user_id, tier });
                self.notices().push(Notice::success(tier_notice(tier)));
                Ok(())
            }
            Err(e) => {
                let error = self.report(&e, "Update failed");
                self.dispatch_users(UsersAction::UpdateTierRejected { user_id, error });
                Err(e.into())
            }
        }
    }
}
