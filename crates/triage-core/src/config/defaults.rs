// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;
pub const DEFAULT_CACHE_TTL_SECS: Option<u64> = None;

// --- Rules ---
pub const DEFAULT_INCLUDE_DEFAULT_RULES: bool = true;
pub const DEFAULT_STALE_AFTER_DAYS: u32 = 60;

// --- Logging ---
pub const DEFAULT_LOG_FILTER: &str = "triage=info";
