//! Client configuration

use std::sync::Arc;
use std::time::Duration;

use crate::http::NetworkHttpClient;
use crate::session::TokenProvider;
use crate::ClientResult;

/// Default keep-for duration of cached query results
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Client configuration for connecting to the admin backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including the `/api` prefix (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// How long cached query results stay fresh, in seconds
    pub cache_ttl: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the cache keep-for duration
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self, tokens: Arc<dyn TokenProvider>) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self, tokens)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000/api")
    }
}
