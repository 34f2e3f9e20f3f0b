use serde::{Deserialize, Serialize};

use super::defaults;

/// Classification cache configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached classifications before eviction kicks in.
    pub max_entries: u64,
    /// Optional time-to-live per entry (seconds). `None` keeps entries until evicted.
    pub ttl_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::DEFAULT_CACHE_MAX_ENTRIES,
            ttl_secs: defaults::DEFAULT_CACHE_TTL_SECS,
        }
    }
}
