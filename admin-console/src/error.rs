//! Console error types

use admin_client::{ClientError, TokenStoreError};
use thiserror::Error;

use crate::validation::FieldErrors;

/// Console error type
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Token store error: {0}")]
    TokenStore(#[from] TokenStoreError),

    /// Client-side form checks failed; nothing was sent
    #[error("Invalid input: {0}")]
    Invalid(FieldErrors),

    #[error("Not signed in, run `admin-console login` first")]
    NotSignedIn,

    #[error("Login response did not contain a token")]
    MissingToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No data to export")]
    NothingToExport,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConsoleError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ConsoleError::Client(e) if e.is_unauthorized())
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
