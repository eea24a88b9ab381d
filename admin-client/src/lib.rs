//! Admin Client - HTTP client for the admin REST API
//!
//! Provides the authenticated HTTP client, the explicit [`Session`] object
//! with token persistence, the tag-invalidated [`QueryCache`] and the typed
//! endpoint groups behind [`AdminApi`].

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod token_store;

pub use api::AdminApi;
pub use cache::{QueryCache, Tag, TagType};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{LogoutReason, Session, SessionEvent, TokenProvider};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TokenStoreError};

// Re-export shared types for convenience
pub use shared;
