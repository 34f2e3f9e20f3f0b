//! Fingerprint cache of classification results, backed by moka.
//!
//! Keyed by issue id; each entry remembers the `updated_at` it was computed
//! for. A lookup only hits when both match, so any edit to the issue turns
//! into a miss. Storing a new result for the same id overwrites the old one.
//! Capacity-bounded with TinyLFU admission; optional per-entry TTL.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::sync::Cache;

use triage_core::config::CacheConfig;
use triage_core::ClassificationResult;

#[derive(Debug, Clone)]
struct CachedClassification {
    updated_at: DateTime<Utc>,
    result: ClassificationResult,
}

/// Thread-safe classification cache.
pub struct ClassificationCache {
    cache: Cache<u64, CachedClassification>,
}

impl ClassificationCache {
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries);
        if let Some(ttl) = config.ttl_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        Self {
            cache: builder.build(),
        }
    }

    /// Cache holding at most `max_entries` classifications, no TTL.
    pub fn with_capacity(max_entries: u64) -> Self {
        Self::new(&CacheConfig {
            max_entries,
            ttl_secs: None,
        })
    }

    /// Look up the result for an exact `(issue_id, updated_at)` fingerprint.
    pub fn get(&self, issue_id: u64, updated_at: DateTime<Utc>) -> Option<ClassificationResult> {
        self.cache
            .get(&issue_id)
            .filter(|entry| entry.updated_at == updated_at)
            .map(|entry| entry.result)
    }

    /// Store a result, replacing whatever was cached for `issue_id`.
    pub fn put(&self, issue_id: u64, updated_at: DateTime<Utc>, result: ClassificationResult) {
        self.cache
            .insert(issue_id, CachedClassification { updated_at, result });
    }

    /// Drop the entry for one issue.
    pub fn invalidate(&self, issue_id: u64) {
        self.cache.invalidate(&issue_id);
    }

    /// Invalidate all entries.
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently in the cache.
    ///
    /// moka applies inserts and evictions lazily; call [`Self::sync`] first
    /// for an exact count.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush moka's pending maintenance work (evictions, counters).
    pub fn sync(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ClassificationCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}
