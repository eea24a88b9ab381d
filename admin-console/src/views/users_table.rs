//! Users page: search, plan and affiliate-tier filters, tier updates

use std::sync::Arc;
use std::time::{Duration, Instant};

use admin_client::HttpClient;
use shared::{AffiliateTier, Filter, PlanTier, User, UserQuery};

use super::list::{ListController, ListRequest, Pagination, TableView};
use crate::error::ConsoleResult;
use crate::store::Store;

pub const USERS_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub plan: Filter<PlanTier>,
    pub affiliate_tier: Filter<AffiliateTier>,
}

pub struct UsersTable<C> {
    store: Arc<Store<C>>,
    list: ListController<UserFilters>,
    page_size: u32,
}

impl<C: HttpClient> UsersTable<C> {
    pub fn new(store: Arc<Store<C>>, quiet: Duration) -> Self {
        Self {
            store,
            list: ListController::new(UserFilters::default(), quiet),
            page_size: USERS_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn list(&self) -> &ListController<UserFilters> {
        &self.list
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.list.set_search(text, now);
    }

    pub fn set_plan(&mut self, plan: Filter<PlanTier>) {
        self.list.update_filters(|f| f.plan = plan);
    }

    pub fn set_affiliate_tier(&mut self, tier: Filter<AffiliateTier>) {
        self.list.update_filters(|f| f.affiliate_tier = tier);
    }

    pub fn set_page(&mut self, page: u32) {
        self.list.set_page(page);
    }

    pub fn query_for(&self, request: &ListRequest<UserFilters>) -> UserQuery {
        UserQuery {
            page: request.page,
            limit: self.page_size,
            search: request.search.clone(),
            plan: request.filters.plan,
            affiliate_tier: request.filters.affiliate_tier,
        }
    }

    /// Fetch if the list arguments changed. Returns whether a fetch ran.
    pub async fn tick(&mut self, now: Instant) -> ConsoleResult<bool> {
        let Some(request) = self.list.poll(now) else {
            return Ok(false);
        };
        self.fetch(&request).await?;
        Ok(true)
    }

    /// Refetch when rows were patched locally since the last load
    pub async fn focus(&mut self, now: Instant) -> ConsoleResult<bool> {
        if self.store.with_users(|s| s.stale) {
            self.list.invalidate();
        }
        self.tick(now).await
    }

    async fn fetch(&mut self, request: &ListRequest<UserFilters>) -> ConsoleResult<()> {
        let query = self.query_for(request);
        let result = self.store.fetch_users(&query).await;
        let total = self.store.with_users(|s| s.total_pages);
        self.list.set_total_pages(total);
        result
    }

    pub async fn update_tier(&self, user_id: &str, tier: AffiliateTier) -> ConsoleResult<()> {
        self.store.update_tier(user_id, tier).await
    }

    pub fn is_updating(&self, user_id: &str) -> bool {
        self.store.with_users(|s| s.is_updating(user_id))
    }

    /// Render the current rows through `f`
    pub fn with_table<R>(&self, f: impl FnOnce(TableView<'_, User>) -> R) -> R {
        self.store
            .with_users(|s| f(TableView::of(s.loading, &s.users)))
    }

    pub fn pagination(&self) -> Pagination {
        self.list.pagination()
    }
}
