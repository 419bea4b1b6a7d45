//! Per-source value store backed by Moka.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use tokio::time::Instant;
use tracing::debug;

use super::FreshnessPolicy;
use crate::source::{SourceKey, SourceValue};

/// A value from the last successful fetch of a source.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: SourceValue,
    /// Monotonic; drives freshness.
    pub fetched_at: Instant,
    /// Wall clock; for diagnostics only.
    pub fetched_at_utc: DateTime<Utc>,
}

impl CacheEntry {
    fn new(value: SourceValue) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        }
    }

    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }
}

/// Keyed store of the last good value per source.
///
/// Entries are never evicted by time: an expired value is still needed as
/// the fallback when a refresh fails. Freshness is decided by the
/// [`FreshnessPolicy`] at read time.
///
/// Clone-friendly: clones share the same entries.
#[derive(Clone)]
pub struct CacheStore {
    inner: Cache<SourceKey, CacheEntry>,
    policy: Arc<FreshnessPolicy>,
}

impl CacheStore {
    pub fn new(policy: FreshnessPolicy) -> Self {
        let inner = Cache::builder()
            .name("source_values")
            .initial_capacity(SourceKey::ALL.len())
            .build();

        Self {
            inner,
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &FreshnessPolicy {
        &self.policy
    }

    pub fn window(&self, key: SourceKey) -> Duration {
        self.policy.window(key)
    }

    /// Last good entry for `key`, fresh or not.
    pub fn get(&self, key: SourceKey) -> Option<CacheEntry> {
        self.inner.get(&key)
    }

    /// Entry for `key` only while it is inside its freshness window.
    pub fn get_fresh(&self, key: SourceKey) -> Option<CacheEntry> {
        self.get(key)
            .filter(|entry| self.policy.is_fresh(key, entry.age()))
    }

    /// Time since the last successful fetch of `key`.
    pub fn age(&self, key: SourceKey) -> Option<Duration> {
        self.get(key).map(|entry| entry.age())
    }

    pub fn is_fresh(&self, key: SourceKey) -> bool {
        self.get_fresh(key).is_some()
    }

    /// Record a freshly fetched value, replacing any previous entry for its
    /// source.
    pub fn put(&self, value: SourceValue) {
        let key = value.key();
        self.inner.insert(key, CacheEntry::new(value));
        debug!("Cache store: {}", key);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        // The key set is closed, so per-key invalidation is exact and
        // takes effect immediately.
        for key in SourceKey::ALL {
            self.inner.invalidate(&key);
        }
        debug!("Cache cleared");
    }

    /// All present entries, in key order.
    pub fn entries(&self) -> Vec<(SourceKey, CacheEntry)> {
        SourceKey::ALL
            .into_iter()
            .filter_map(|key| self.get(key).map(|entry| (key, entry)))
            .collect()
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(FreshnessPolicy::default())
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("policy", &self.policy)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
