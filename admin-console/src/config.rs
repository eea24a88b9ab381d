//! Console configuration
//!
//! Every option can come from a flag, an environment variable or `.env`
//! (loaded by the binary before parsing).

use std::path::PathBuf;
use std::time::Duration;

use admin_client::ClientConfig;
use clap::Args;

use crate::error::{ConsoleError, ConsoleResult};
use crate::views::USERS_PAGE_SIZE;

#[derive(Debug, Clone, Args)]
pub struct ConsoleConfig {
    /// Backend API base URL, including the `/api` prefix
    #[arg(
        long,
        global = true,
        env = "ADMIN_API_BASE_URL",
        default_value = "http://localhost:5000/api"
    )]
    pub api_base_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "ADMIN_API_TIMEOUT_SECS", default_value_t = 30)]
    pub api_timeout_secs: u64,

    /// Where the bearer token is persisted between runs
    #[arg(long, global = true, env = "ADMIN_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    #[arg(long, global = true, env = "ADMIN_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Directory for daily rolling log files; stderr only when unset
    #[arg(long, global = true, env = "ADMIN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "ADMIN_PAGE_SIZE", default_value_t = USERS_PAGE_SIZE)]
    pub page_size: u32,

    /// Quiet period of search inputs, in milliseconds
    #[arg(long, global = true, env = "ADMIN_SEARCH_DEBOUNCE_MS", default_value_t = 500)]
    pub search_debounce_ms: u64,

    /// How long cached query results stay fresh, in seconds
    #[arg(long, global = true, env = "ADMIN_CACHE_TTL_SECS", default_value_t = 60)]
    pub cache_ttl_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            api_timeout_secs: 30,
            token_file: None,
            log_level: "info".to_string(),
            log_dir: None,
            page_size: USERS_PAGE_SIZE,
            search_debounce_ms: 500,
            cache_ttl_secs: 60,
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> ConsoleResult<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConsoleError::Config(format!(
                "ADMIN_API_BASE_URL must be an http(s) URL, got '{url}'"
            )));
        }
        if self.api_timeout_secs == 0 {
            return Err(ConsoleError::Config("ADMIN_API_TIMEOUT_SECS must be > 0".into()));
        }
        if self.page_size == 0 {
            return Err(ConsoleError::Config("ADMIN_PAGE_SIZE must be > 0".into()));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.trim())
            .with_timeout(self.api_timeout_secs)
            .with_cache_ttl(self.cache_ttl_secs)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Token file, defaulting to `~/.admin-console/token.json`
    pub fn token_path(&self) -> PathBuf {
        if let Some(path) = &self.token_file {
            return path.clone();
        }
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".admin-console").join("token.json")
    }
}
