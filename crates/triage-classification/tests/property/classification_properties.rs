use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use triage_classification::{score_issue, ClassificationCache, ClassificationEngine, RuleSet};
use triage_core::{BatchContext, Category, Issue, IssueRecord};

const LABELS: [&str; 8] = [
    "bug",
    "enhancement",
    "documentation",
    "question",
    "security",
    "chore",
    "wontfix",
    "triage",
];

fn as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

prop_compose! {
    fn arb_issue()(
        id in 1u64..10_000,
        title in "[a-zA-Z :]{0,60}",
        body in "[a-zA-Z .]{0,120}",
        labels in proptest::sample::subsequence(LABELS.to_vec(), 0..4),
        age_days in 0i64..400,
    ) -> Issue {
        Issue::new(id, title, as_of() - Duration::days(age_days))
            .with_body(body)
            .with_labels(labels)
    }
}

proptest! {
    #[test]
    fn score_is_always_within_bounds(issue in arb_issue()) {
        let result = score_issue(&issue, &RuleSet::default_rules(), as_of());
        prop_assert!(result.score <= 100);
    }

    #[test]
    fn scoring_is_deterministic(issue in arb_issue()) {
        let rules = RuleSet::default_rules();
        let first = score_issue(&issue, &rules, as_of());
        let second = score_issue(&issue, &rules, as_of());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn no_match_means_uncategorized_zero_empty(issue in arb_issue()) {
        let result = score_issue(&issue, &RuleSet::empty(), as_of());
        prop_assert_eq!(result.category, Category::Uncategorized);
        prop_assert_eq!(result.score, 0);
        prop_assert!(result.matched_rules.is_empty());
    }

    #[test]
    fn unmatched_results_are_always_uncategorized(issue in arb_issue()) {
        let result = score_issue(&issue, &RuleSet::default_rules(), as_of());
        if result.matched_rules.is_empty() {
            prop_assert_eq!(result.category, Category::Uncategorized);
            prop_assert_eq!(result.score, 0);
        } else {
            prop_assert_ne!(result.category, Category::Uncategorized);
        }
    }

    #[test]
    fn batch_tasks_align_with_input(issues in proptest::collection::vec(arb_issue(), 0..20)) {
        let engine = ClassificationEngine::new(
            RuleSet::default_rules(),
            ClassificationCache::with_capacity(1_000),
        );
        let records: Vec<IssueRecord> = issues.iter().map(IssueRecord::from).collect();
        let batch = engine.classify_issues_batch(&records, &BatchContext::default().with_as_of(as_of()));

        prop_assert_eq!(batch.total_analyzed, issues.len());
        prop_assert_eq!(batch.tasks.len(), issues.len());
        for (task, issue) in batch.tasks.iter().zip(&issues) {
            prop_assert_eq!(task.issue_id, Some(issue.id));
        }
        prop_assert!((0.0..=1.0).contains(&batch.cache_hit_rate));
        prop_assert_eq!(batch.cache_hits + batch.cache_misses, batch.total_analyzed);
    }

    #[test]
    fn second_pass_is_fully_cached(issues in proptest::collection::vec(arb_issue(), 1..20)) {
        let engine = ClassificationEngine::new(
            RuleSet::default_rules(),
            ClassificationCache::with_capacity(1_000),
        );
        // Unique ids: two issues sharing an id evict each other's entry.
        let records: Vec<IssueRecord> = issues
            .iter()
            .enumerate()
            .map(|(i, issue)| IssueRecord { id: Some(i as u64 + 1), ..IssueRecord::from(issue) })
            .collect();
        let context = BatchContext::default().with_as_of(as_of());
        let first = engine.classify_issues_batch(&records, &context);
        let second = engine.classify_issues_batch(&records, &context);

        prop_assert_eq!(second.cache_hit_rate, 1.0);
        prop_assert!(second.cache_hit_rate >= first.cache_hit_rate);
        prop_assert_eq!(first.tasks, second.tasks);
    }
}
