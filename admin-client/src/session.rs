//! Session - explicit authentication state
//!
//! Owns the bearer token and the signed-in admin profile. The HTTP client
//! reads the token through [`TokenProvider`] and reports 401 responses back
//! through it; nothing reads the token from ambient storage.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::AdminProfile;
use tokio::sync::broadcast;

use crate::token_store::{MemoryTokenStore, TokenStore, TokenStoreError};

const EVENT_CAPACITY: usize = 16;

/// Source of the bearer token for outgoing requests
pub trait TokenProvider: Send + Sync {
    /// Current token, if signed in
    fn token(&self) -> Option<String>;

    /// Called for every 401 response, whichever endpoint produced it
    fn on_unauthorized(&self);
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// Explicit logout
    UserRequested,
    /// Backend answered 401
    Unauthorized,
}

/// Session lifecycle notifications
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn,
    ProfileUpdated,
    LoggedOut { reason: LogoutReason },
}

/// Session data held in memory during the client's lifecycle
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    pub token: Option<String>,
    pub profile: Option<AdminProfile>,
}

/// Shared session object, passed around as `Arc<Session>`
pub struct Session {
    data: RwLock<SessionData>,
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Create an empty session backed by `store`
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            data: RwLock::new(SessionData::default()),
            store,
            events,
        }
    }

    /// Session that forgets its token on exit
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::new()))
    }

    /// Create a session and load the persisted token, if any
    pub fn restore(store: Arc<dyn TokenStore>) -> Result<Self, TokenStoreError> {
        let token = store.load()?;
        let session = Self::new(store);
        if token.is_some() {
            tracing::debug!("Restored persisted admin token");
        }
        session.data.write().token = token;
        Ok(session)
    }

    pub fn token(&self) -> Option<String> {
        self.data.read().token.clone()
    }

    pub fn profile(&self) -> Option<AdminProfile> {
        self.data.read().profile.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.read().token.is_some()
    }

    pub fn snapshot(&self) -> SessionData {
        self.data.read().clone()
    }

    /// Store the token (and profile, when the login response carried one)
    pub fn set_login(
        &self,
        token: impl Into<String>,
        profile: Option<AdminProfile>,
    ) -> Result<(), TokenStoreError> {
        let token = token.into();
        self.store.save(&token)?;
        {
            let mut data = self.data.write();
            data.token = Some(token);
            if profile.is_some() {
                data.profile = profile;
            }
        }
        let _ = self.events.send(SessionEvent::LoggedIn);
        Ok(())
    }

    pub fn set_profile(&self, profile: AdminProfile) {
        self.data.write().profile = Some(profile);
        let _ = self.events.send(SessionEvent::ProfileUpdated);
    }

    /// Clear token and profile, in memory and in the store
    pub fn logout(&self, reason: LogoutReason) {
        let was_authenticated = {
            let mut data = self.data.write();
            let had = data.token.is_some() || data.profile.is_some();
            *data = SessionData::default();
            had
        };
        if let Err(e) = self.store.clear() {
            tracing::error!(error = %e, "Failed to remove persisted token");
        }
        if was_authenticated {
            tracing::info!(?reason, "Admin session cleared");
            let _ = self.events.send(SessionEvent::LoggedOut { reason });
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}

impl TokenProvider for Session {
    fn token(&self) -> Option<String> {
        Session::token(self)
    }

    fn on_unauthorized(&self) {
        self.logout(LogoutReason::Unauthorized);
    }
}
