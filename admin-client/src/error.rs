//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 401 - the session has been cleared
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Authorization failure, as opposed to a network / validation failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }

    /// Message suitable for a transient user-facing notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized(_) => "Session expired, please sign in again".to_string(),
            ClientError::Forbidden(msg)
            | ClientError::NotFound(msg)
            | ClientError::Validation(msg)
            | ClientError::Api { message: msg, .. } => msg.clone(),
            ClientError::Http(e) if e.is_timeout() => "Request timed out".to_string(),
            ClientError::Http(_) => "Network error, please try again".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
