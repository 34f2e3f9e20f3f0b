use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Category, ClassificationResult, Priority};

/// Aggregate output of one batch call.
///
/// `tasks[i]` is the classification of `issues[i]`. The engine keeps no
/// reference to this value once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub total_analyzed: usize,
    /// Mean score over all tasks; 0 for an empty batch.
    pub average_score: f64,
    pub processing_time_ms: f64,
    /// `cache_hits / total_analyzed`; 0 for an empty batch.
    pub cache_hit_rate: f64,
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Records that failed validation and were degraded to uncategorized.
    pub invalid_records: usize,
    pub tasks: Vec<ClassificationResult>,
}

impl BatchResult {
    /// Build a batch result from its tasks and bookkeeping counters.
    pub fn from_tasks(
        tasks: Vec<ClassificationResult>,
        cache_hits: usize,
        cache_misses: usize,
        invalid_records: usize,
        processing_time_ms: f64,
    ) -> Self {
        let total_analyzed = tasks.len();
        let (average_score, cache_hit_rate) = if total_analyzed == 0 {
            (0.0, 0.0)
        } else {
            let total: u64 = tasks.iter().map(|t| u64::from(t.score)).sum();
            (
                total as f64 / total_analyzed as f64,
                cache_hits as f64 / total_analyzed as f64,
            )
        };

        Self {
            total_analyzed,
            average_score,
            processing_time_ms,
            cache_hit_rate,
            cache_hits,
            cache_misses,
            invalid_records,
            tasks,
        }
    }

    /// Empty batch: all statistics are zero by convention.
    pub fn empty() -> Self {
        Self::from_tasks(Vec::new(), 0, 0, 0, 0.0)
    }

    /// Task count per category, for dashboard summaries.
    pub fn category_breakdown(&self) -> BTreeMap<Category, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            *counts.entry(task.category).or_insert(0) += 1;
        }
        counts
    }

    /// Task count per priority level.
    pub fn priority_breakdown(&self) -> BTreeMap<&'static str, usize> {
        let mut counts: BTreeMap<&'static str, usize> = Priority::ALL
            .iter()
            .map(|p| (p.as_str(), 0))
            .collect();
        for task in &self.tasks {
            *counts.entry(task.priority.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn task(id: u64, category: Category, score: u8) -> ClassificationResult {
        ClassificationResult {
            issue_id: Some(id),
            category,
            priority: Priority::Medium,
            score,
            matched_rules: vec![],
            classified_at: Utc::now(),
        }
    }

    #[test]
    fn empty_batch_statistics_are_zero() {
        let batch = BatchResult::empty();
        assert_eq!(batch.total_analyzed, 0);
        assert_eq!(batch.average_score, 0.0);
        assert_eq!(batch.cache_hit_rate, 0.0);
        assert!(batch.tasks.is_empty());
    }

    #[test]
    fn averages_and_hit_rate() {
        let tasks = vec![
            task(1, Category::Bug, 70),
            task(2, Category::Feature, 30),
            task(3, Category::Bug, 20),
            task(4, Category::Uncategorized, 0),
        ];
        let batch = BatchResult::from_tasks(tasks, 1, 3, 0, 1.5);
        assert_eq!(batch.total_analyzed, 4);
        assert!((batch.average_score - 30.0).abs() < f64::EPSILON);
        assert!((batch.cache_hit_rate - 0.25).abs() < f64::EPSILON);
        assert_eq!(batch.category_breakdown()[&Category::Bug], 2);
        assert_eq!(batch.priority_breakdown()["medium"], 4);
        assert_eq!(batch.priority_breakdown()["critical"], 0);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(BatchResult::empty()).unwrap();
        assert!(json.get("totalAnalyzed").is_some());
        assert!(json.get("cacheHitRate").is_some());
        assert!(json.get("tasks").unwrap().as_array().unwrap().is_empty());
    }
}
