//! Client-side state
//!
//! Each slice is a plain state struct with an action enum and a `reduce`
//! function. Async operations ("thunks") live on [`Store`]: they dispatch a
//! pending action, call the API and dispatch the fulfilled or rejected
//! action. Slices are only ever changed through `reduce`.

pub mod auth;
pub mod payments;
pub mod users;

use std::collections::HashSet;
use std::hash::Hash;
use std::sync::Arc;

use admin_client::{AdminApi, ClientError, HttpClient, NetworkHttpClient, Session};
use parking_lot::{Mutex, RwLock};

pub use auth::{AuthAction, AuthState, AuthStatus};
pub use payments::{PaymentsAction, PaymentsState};
pub use users::{UsersAction, UsersState};

use crate::notice::{Notice, Notices};

/// Keys of the rows with a mutation in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight<K: Eq + Hash> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            keys: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> InFlight<K> {
    pub fn insert(&mut self, key: K) {
        self.keys.insert(key);
    }

    pub fn remove<Q>(&mut self, key: &Q)
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.keys.remove(key);
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Sequence numbers of list requests; only the newest may land
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Record that request `seq` was issued
    pub fn issue(&mut self, seq: u64) {
        self.latest = self.latest.max(seq);
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// Root of the client-side state
pub struct Store<C = NetworkHttpClient> {
    api: Arc<AdminApi<C>>,
    auth: RwLock<AuthState>,
    users: RwLock<UsersState>,
    payments: RwLock<PaymentsState>,
    notices: Notices,
    next_seq: Mutex<u64>,
}

impl<C: HttpClient> Store<C> {
    pub fn new(api: Arc<AdminApi<C>>) -> Self {
        let auth = AuthState::restored(api.session().is_authenticated());
        Self {
            api,
            auth: RwLock::new(auth),
            users: RwLock::new(UsersState::default()),
            payments: RwLock::new(PaymentsState::default()),
            notices: Notices::default(),
            next_seq: Mutex::new(0),
        }
    }

    pub fn api(&self) -> &AdminApi<C> {
        &self.api
    }

    pub fn session(&self) -> &Arc<Session> {
        self.api.session()
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn auth(&self) -> AuthState {
        self.auth.read().clone()
    }

    pub fn users(&self) -> UsersState {
        self.users.read().clone()
    }

    pub fn payments(&self) -> PaymentsState {
        self.payments.read().clone()
    }

    /// Run `f` against the users slice without cloning it
    pub fn with_users<R>(&self, f: impl FnOnce(&UsersState) -> R) -> R {
        f(&self.users.read())
    }

    pub fn with_payments<R>(&self, f: impl FnOnce(&PaymentsState) -> R) -> R {
        f(&self.payments.read())
    }

    pub fn dispatch_auth(&self, action: AuthAction) {
        self.auth.write().reduce(action);
    }

    pub fn dispatch_users(&self, action: UsersAction) {
        self.users.write().reduce(action);
    }

    pub fn dispatch_payments(&self, action: PaymentsAction) {
        self.payments.write().reduce(action);
    }

    /// Issue the sequence number of a new list request. Fetch actions
    /// dispatched from outside the thunks must take theirs from here.
    pub fn next_seq(&self) -> u64 {
        let mut seq = self.next_seq.lock();
        *seq += 1;
        *seq
    }

    /// Shared failure path of every thunk: a 401 also resets the auth slice,
    /// other failures become an error notice
    pub(crate) fn report(&self, err: &ClientError, fallback: &str) -> String {
        if err.is_unauthorized() {
            self.api.cache().clear();
            self.dispatch_auth(AuthAction::SessionExpired);
        }
        let message = match err {
            ClientError::Http(_) | ClientError::InvalidResponse(_) => fallback.to_string(),
            other => other.user_message(),
        };
        self.notices.push(Notice::error(message.clone()));
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_tracks_each_key() {
        let mut set: InFlight<String> = InFlight::default();
        set.insert("u1".into());
        set.insert("u2".into());
        assert!(set.contains("u1") && set.contains("u2"));
        set.remove("u1");
        assert!(!set.contains("u1"));
        assert!(set.contains("u2"));
    }

    #[test]
    fn test_request_seq_keeps_newest() {
        let mut seq = RequestSeq::default();
        seq.issue(1);
        seq.issue(2);
        assert!(!seq.is_current(1));
        assert!(seq.is_current(2));
        seq.issue(1);
        assert_eq!(seq.latest(), 2);
    }
}
