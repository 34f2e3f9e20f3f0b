//! ClassificationEngine: batch classification with fingerprint caching.
//!
//! Per batch: check the cache for each issue in input order, score on a
//! miss, then compute average score, cache hit rate, and elapsed time.
//! A record that fails validation is degraded to an uncategorized result
//! and never aborts the batch.

use std::borrow::Cow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use triage_core::errors::{TriageError, TriageErrorCode, TriageResult};
use triage_core::{BatchContext, BatchResult, ClassificationResult, IssueRecord, TriageConfig};

use crate::cache::ClassificationCache;
use crate::rules::RuleSet;
use crate::scorer;

/// Lifetime counters across all batches run by one engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub batches: u64,
    pub issues: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub invalid_records: u64,
}

impl EngineStats {
    /// Overall hit rate; 0 before any issue was classified.
    pub fn hit_rate(&self) -> f64 {
        if self.issues == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.issues as f64
        }
    }
}

#[derive(Default)]
struct StatsCounters {
    batches: AtomicU64,
    issues: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    invalid_records: AtomicU64,
}

/// One batch item: a record to classify, or an element that could not even
/// be read as a record.
enum BatchItem<'a> {
    Record(Cow<'a, IssueRecord>),
    Unreadable { id: Option<u64>, error: TriageError },
}

enum Outcome {
    Hit(ClassificationResult),
    Miss(ClassificationResult),
    Degraded(ClassificationResult),
}

/// The classification engine. Owns the rule set and the cache for its
/// whole lifetime; `Send + Sync`, so concurrent batches may share it.
pub struct ClassificationEngine {
    rules: RuleSet,
    cache: ClassificationCache,
    stats: StatsCounters,
}

impl ClassificationEngine {
    pub fn new(rules: RuleSet, cache: ClassificationCache) -> Self {
        Self {
            rules,
            cache,
            stats: StatsCounters::default(),
        }
    }

    /// Built-in rules with a default-sized cache.
    pub fn with_defaults() -> Self {
        Self::new(RuleSet::default_rules(), ClassificationCache::default())
    }

    /// Build from config. Fails if the rule set cannot be loaded; there is
    /// no partially configured engine.
    pub fn from_config(config: &TriageConfig) -> TriageResult<Self> {
        let rules = RuleSet::from_config(&config.rules)?;
        info!(
            rules = rules.len(),
            cache_capacity = config.cache.max_entries,
            "classification engine ready"
        );
        Ok(Self::new(rules, ClassificationCache::new(&config.cache)))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    /// Classify a batch. `tasks[i]` of the result belongs to `issues[i]`.
    pub fn classify_issues_batch(
        &self,
        issues: &[IssueRecord],
        context: &BatchContext,
    ) -> BatchResult {
        let items = issues.iter().map(|r| BatchItem::Record(Cow::Borrowed(r)));
        self.run_batch(items, issues.len(), context)
    }

    /// Classify a loosely typed JSON batch.
    ///
    /// Fails only when `value` is not an array. Elements that do not
    /// deserialize into an issue record are degraded like any other
    /// invalid record.
    pub fn classify_json_batch(
        &self,
        value: &serde_json::Value,
        context: &BatchContext,
    ) -> TriageResult<BatchResult> {
        let elements = value.as_array().ok_or_else(|| TriageError::InvalidBatch {
            reason: format!("expected a JSON array of issues, got {}", json_kind(value)),
        })?;

        let items = elements.iter().map(|element| {
            match IssueRecord::deserialize(element) {
                Ok(record) => BatchItem::Record(Cow::Owned(record)),
                Err(e) => BatchItem::Unreadable {
                    id: element.get("id").and_then(serde_json::Value::as_u64),
                    error: e.into(),
                },
            }
        });
        Ok(self.run_batch(items, elements.len(), context))
    }

    /// Snapshot of the lifetime counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            batches: self.stats.batches.load(Ordering::Relaxed),
            issues: self.stats.issues.load(Ordering::Relaxed),
            cache_hits: self.stats.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.stats.cache_misses.load(Ordering::Relaxed),
            invalid_records: self.stats.invalid_records.load(Ordering::Relaxed),
        }
    }

    /// Forget every cached classification.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn run_batch<'a, I>(&self, items: I, len: usize, context: &BatchContext) -> BatchResult
    where
        I: Iterator<Item = BatchItem<'a>>,
    {
        let repository = context.repository_label();
        let _span = triage_observability::classification_span!(repository, len).entered();

        let started = Instant::now();
        let as_of = context.as_of.unwrap_or_else(Utc::now);

        let mut tasks = Vec::with_capacity(len);
        let (mut hits, mut misses, mut invalid) = (0usize, 0usize, 0usize);

        for (index, item) in items.enumerate() {
            match self.classify_item(index, item, as_of) {
                Outcome::Hit(result) => {
                    hits += 1;
                    tasks.push(result);
                }
                Outcome::Miss(result) => {
                    misses += 1;
                    tasks.push(result);
                }
                Outcome::Degraded(result) => {
                    misses += 1;
                    invalid += 1;
                    tasks.push(result);
                }
            }
        }

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        let batch = BatchResult::from_tasks(tasks, hits, misses, invalid, processing_time_ms);
        self.record(&batch);

        info!(
            total_analyzed = batch.total_analyzed,
            average_score = batch.average_score,
            processing_time_ms = batch.processing_time_ms,
            cache_hit_rate = batch.cache_hit_rate,
            invalid_records = batch.invalid_records,
            "classification batch complete"
        );
        batch
    }

    fn classify_item(&self, index: usize, item: BatchItem<'_>, as_of: DateTime<Utc>) -> Outcome {
        let record = match item {
            BatchItem::Record(record) => record,
            BatchItem::Unreadable { id, error } => return degrade(index, id, &error, as_of),
        };

        let fingerprint = record.id.zip(record.updated_at);
        if let Some((id, updated_at)) = fingerprint {
            if let Some(cached) = self.cache.get(id, updated_at) {
                debug!(issue_id = id, "cache hit");
                return Outcome::Hit(cached);
            }
        }

        match scorer::classify(&record, &self.rules, as_of) {
            Ok(result) => {
                if let Some((id, updated_at)) = fingerprint {
                    debug!(issue_id = id, category = %result.category, score = result.score, "scored");
                    self.cache.put(id, updated_at, result.clone());
                }
                Outcome::Miss(result)
            }
            Err(error) => degrade(index, record.id, &error, as_of),
        }
    }

    fn record(&self, batch: &BatchResult) {
        self.stats.batches.fetch_add(1, Ordering::Relaxed);
        self.stats
            .issues
            .fetch_add(batch.total_analyzed as u64, Ordering::Relaxed);
        self.stats
            .cache_hits
            .fetch_add(batch.cache_hits as u64, Ordering::Relaxed);
        self.stats
            .cache_misses
            .fetch_add(batch.cache_misses as u64, Ordering::Relaxed);
        self.stats
            .invalid_records
            .fetch_add(batch.invalid_records as u64, Ordering::Relaxed);
    }
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn degrade(index: usize, id: Option<u64>, error: &TriageError, as_of: DateTime<Utc>) -> Outcome {
    warn!(
        index,
        issue_id = ?id,
        code = error.error_code(),
        %error,
        "issue record could not be classified, using uncategorized"
    );
    Outcome::Degraded(ClassificationResult::uncategorized(id, as_of))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
