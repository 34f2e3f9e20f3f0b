use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use triage_core::{BatchResult, Category, ClassificationResult, Priority};

fn task(score: u8) -> ClassificationResult {
    ClassificationResult {
        issue_id: Some(u64::from(score)),
        category: if score == 0 { Category::Uncategorized } else { Category::Bug },
        priority: Priority::Low,
        score,
        matched_rules: vec![],
        classified_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

proptest! {
    #[test]
    fn hit_rate_stays_in_unit_interval(scores in proptest::collection::vec(0u8..=100, 0..50), hit_share in 0.0f64..=1.0) {
        let total = scores.len();
        let hits = (total as f64 * hit_share).floor() as usize;
        let batch = BatchResult::from_tasks(scores.into_iter().map(task).collect(), hits, total - hits, 0, 0.0);
        prop_assert!((0.0..=1.0).contains(&batch.cache_hit_rate));
        prop_assert_eq!(batch.total_analyzed, total);
    }

    #[test]
    fn average_lies_between_min_and_max(scores in proptest::collection::vec(0u8..=100, 1..50)) {
        let min = f64::from(*scores.iter().min().unwrap());
        let max = f64::from(*scores.iter().max().unwrap());
        let batch = BatchResult::from_tasks(scores.into_iter().map(task).collect(), 0, 0, 0, 0.0);
        prop_assert!(batch.average_score >= min - 1e-9);
        prop_assert!(batch.average_score <= max + 1e-9);
    }

    #[test]
    fn breakdown_counts_every_task(scores in proptest::collection::vec(0u8..=100, 0..50)) {
        let total = scores.len();
        let batch = BatchResult::from_tasks(scores.into_iter().map(task).collect(), 0, total, 0, 0.0);
        let counted: usize = batch.category_breakdown().values().sum();
        prop_assert_eq!(counted, total);
        let by_priority: usize = batch.priority_breakdown().values().sum();
        prop_assert_eq!(by_priority, total);
    }
}
