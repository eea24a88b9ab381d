//! TokenStore - bearer token persistence
//!
//! Keeps the admin's bearer token outside in-memory state so a session
//! survives restarts. The file variant writes `{ token, saved_at }` JSON.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent storage for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, TokenStoreError>;
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Token file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TokenFile {
    token: String,
    /// Unix millis of the last save
    saved_at: i64,
}

/// Token stored in a JSON file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    file_path: PathBuf,
}

impl FileTokenStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        let file: TokenFile = serde_json::from_str(&content)?;
        Ok(Some(file.token).filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = TokenFile {
            token: token.to_string(),
            saved_at: chrono::Utc::now().timestamp_millis(),
        };
        std::fs::write(&self.file_path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token kept in memory only (tests, one-shot commands)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.token.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.token.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("auth/token.json"));

        assert!(store.load().unwrap().is_none());

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.load(), Err(TokenStoreError::Json(_))));
    }
}
