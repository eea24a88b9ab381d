//! Typed endpoint groups
//!
//! [`AdminApi`] ties the HTTP client, the session and the query cache
//! together. Queries are served from the cache while fresh; mutations
//! invalidate the tags they affect once the backend has accepted them.
//! There is no other invalidation path.

mod auth;
mod dashboard;
mod payments;
mod subscription;
mod users;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub use auth::AuthApi;
pub use dashboard::DashboardApi;
pub use payments::PaymentsApi;
pub use subscription::SubscriptionApi;
pub use users::UsersApi;

use shared::AdminProfile;

use crate::cache::{QueryCache, Tag};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::Session;
use crate::token_store::TokenStoreError;
use crate::{ClientConfig, ClientResult};

/// Facade over every backend endpoint used by the console
pub struct AdminApi<C = NetworkHttpClient> {
    http: C,
    session: Arc<Session>,
    cache: QueryCache,
}

impl AdminApi<NetworkHttpClient> {
    /// Build the network client from `config`, reading tokens from `session`
    pub fn connect(config: &ClientConfig, session: Arc<Session>) -> ClientResult<Self> {
        let http = config.build_http_client(session.clone())?;
        Ok(Self::new(http, session, QueryCache::new(config.cache_ttl_duration())))
    }
}

impl<C: HttpClient> AdminApi<C> {
    pub fn new(http: C, session: Arc<Session>, cache: QueryCache) -> Self {
        Self {
            http,
            session,
            cache,
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Adopt a new bearer token. Results cached under the previous identity
    /// are dropped.
    pub fn sign_in(
        &self,
        token: impl Into<String>,
        profile: Option<AdminProfile>,
    ) -> Result<(), TokenStoreError> {
        self.session.set_login(token, profile)?;
        self.cache.clear();
        Ok(())
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn auth(&self) -> AuthApi<'_, C> {
        AuthApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_, C> {
        UsersApi::new(self)
    }

    pub fn payments(&self) -> PaymentsApi<'_, C> {
        PaymentsApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_, C> {
        DashboardApi::new(self)
    }

    pub fn subscription(&self) -> SubscriptionApi<'_, C> {
        SubscriptionApi::new(self)
    }

    /// Serve `key` from the cache, or run `fetch` and cache its result
    pub(crate) async fn query<T, F, Fut>(
        &self,
        key: String,
        tags: Vec<Tag>,
        keep_for: Option<Duration>,
        fetch: F,
    ) -> ClientResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        if let Some(hit) = self.cache.get::<T>(&key) {
            tracing::trace!(%key, "Cache hit");
            return Ok(hit);
        }
        let value = fetch().await?;
        self.cache.insert(key, value.clone(), tags, keep_for);
        Ok(value)
    }

    /// Run a mutation and invalidate `tags` when it succeeds
    pub(crate) async fn mutate<T, Fut>(&self, tags: &[Tag], fut: Fut) -> ClientResult<T>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        let value = fut.await?;
        self.cache.invalidate(tags);
        Ok(value)
    }
}

/// Cache key of a parameterised query. Parameters are JSON-encoded so no
/// value can spill into another key.
pub(crate) fn query_key(endpoint: &str, params: &[(&'static str, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }
    let pairs: Vec<serde_json::Value> = params
        .iter()
        .map(|(k, v)| serde_json::Value::from(vec![*k, v.as_str()]))
        .collect();
    format!("{endpoint}?{}", serde_json::Value::from(pairs))
}
