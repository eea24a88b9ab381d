//! Query cache with tag-based invalidation
//!
//! Query endpoints store their decoded result under a key derived from the
//! endpoint and its arguments, together with the tags the result provides.
//! Mutations invalidate tags; every entry providing a matching tag is
//! dropped, so the next read of a dependent list goes back to the network.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

/// Resource types used as cache tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Users,
    Payments,
    Dashboard,
    Profile,
}

/// A tag is either a whole resource type or one entity of that type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Type(TagType),
    Id(TagType, String),
}

impl Tag {
    pub fn id(kind: TagType, id: impl Into<String>) -> Self {
        Tag::Id(kind, id.into())
    }

    pub fn kind(&self) -> TagType {
        match self {
            Tag::Type(kind) | Tag::Id(kind, _) => *kind,
        }
    }

    /// Whether an entry providing `self` is hit by invalidating `invalidated`.
    ///
    /// Invalidating a whole type hits every tag of that type; invalidating an
    /// id only hits entries that provided that exact id.
    pub fn is_hit_by(&self, invalidated: &Tag) -> bool {
        match invalidated {
            Tag::Type(kind) => self.kind() == *kind,
            Tag::Id(..) => self == invalidated,
        }
    }
}

impl From<TagType> for Tag {
    fn from(kind: TagType) -> Self {
        Tag::Type(kind)
    }
}

struct CacheEntry {
    value: Arc<dyn Any + Send + Sync>,
    tags: Vec<Tag>,
    fetched_at: Instant,
    keep_for: Duration,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.fetched_at) < self.keep_for
    }
}

/// Type-erased store of query results
pub struct QueryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    keep_for: Duration,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries.read().len())
            .field("keep_for", &self.keep_for)
            .finish()
    }
}

impl QueryCache {
    pub fn new(keep_for: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            keep_for,
        }
    }

    /// Fresh cached value for `key`, if any
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        self.get_at(key, Instant::now())
    }

    pub(crate) fn get_at<T: Clone + Send + Sync + 'static>(&self, key: &str, now: Instant) -> Option<T> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if !entry.is_fresh(now) {
            return None;
        }
        entry.value.downcast_ref::<T>().cloned()
    }

    /// Store `value` under `key`. `keep_for` overrides the default freshness;
    /// a zero duration means the result is never cached.
    pub fn insert<T: Send + Sync + 'static>(
        &self,
        key: impl Into<String>,
        value: T,
        tags: Vec<Tag>,
        keep_for: Option<Duration>,
    ) {
        let keep_for = keep_for.unwrap_or(self.keep_for);
        if keep_for.is_zero() {
            return;
        }
        let entry = CacheEntry {
            value: Arc::new(value),
            tags,
            fetched_at: Instant::now(),
            keep_for,
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Drop every entry providing a tag hit by `tags`. Returns the number dropped.
    pub fn invalidate(&self, tags: &[Tag]) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| {
            !entry
                .tags
                .iter()
                .any(|provided| tags.iter().any(|t| provided.is_hit_by(t)))
        });
        let dropped = before - entries.len();
        if dropped > 0 {
            tracing::debug!(?tags, dropped, "Cache entries invalidated");
        }
        dropped
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(crate::config::DEFAULT_CACHE_TTL_SECS))
    }
}
