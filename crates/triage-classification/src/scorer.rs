//! Pure issue scorer.
//!
//! Matched rule contributions are summed and clamped to 0-100. The category
//! and priority come from the highest-priority matching rule; on equal
//! priority the first-declared rule wins.

use chrono::{DateTime, Duration, Utc};

use triage_core::constants::MAX_SCORE;
use triage_core::errors::TriageResult;
use triage_core::{ClassificationResult, Issue, IssueRecord};

use crate::rules::{ClassificationRule, RuleKind, RuleSet, TextFields};

/// Validate a record and score it.
///
/// Fails with `TriageError::InvalidInput` when the record has no id or no
/// `updated_at`. Not matching any rule is a normal, uncategorized result.
pub fn classify(
    record: &IssueRecord,
    rules: &RuleSet,
    as_of: DateTime<Utc>,
) -> TriageResult<ClassificationResult> {
    let issue = Issue::try_from(record)?;
    Ok(score_issue(&issue, rules, as_of))
}

/// Score a validated issue. `as_of` is "now" for staleness rules and
/// becomes the result's `classified_at`.
pub fn score_issue(issue: &Issue, rules: &RuleSet, as_of: DateTime<Utc>) -> ClassificationResult {
    let text = LoweredText::new(issue);

    let mut total: i64 = 0;
    let mut matched_rules = Vec::new();
    let mut leading: Option<&ClassificationRule> = None;

    for rule in rules {
        if !rule_matches(rule, issue, &text, as_of) {
            continue;
        }
        total += i64::from(rule.score);
        matched_rules.push(rule.id.clone());
        if leading.map_or(true, |current| rule.priority > current.priority) {
            leading = Some(rule);
        }
    }

    let Some(leading) = leading else {
        return ClassificationResult::uncategorized(Some(issue.id), as_of);
    };

    ClassificationResult {
        issue_id: Some(issue.id),
        category: leading.category,
        priority: leading.priority,
        score: total.clamp(0, i64::from(MAX_SCORE)) as u8,
        matched_rules,
        classified_at: as_of,
    }
}

/// Title and body lowercased once per issue.
struct LoweredText {
    title: String,
    body: String,
}

impl LoweredText {
    fn new(issue: &Issue) -> Self {
        Self {
            title: issue.title.to_lowercase(),
            body: issue.body.to_lowercase(),
        }
    }
}

/// Single dispatch point for every rule kind.
fn rule_matches(
    rule: &ClassificationRule,
    issue: &Issue,
    text: &LoweredText,
    as_of: DateTime<Utc>,
) -> bool {
    match &rule.kind {
        RuleKind::Keyword { keywords, fields } => keywords.iter().any(|keyword| {
            text_matches(*fields, text, |field| field.contains(keyword.as_str()))
        }),
        RuleKind::Label { labels } => labels.iter().any(|label| issue.labels.contains(label)),
        RuleKind::Staleness { days } => {
            issue.state.is_open() && as_of - issue.updated_at >= Duration::days(i64::from(*days))
        }
        RuleKind::Pattern { regex, fields } => {
            text_matches(*fields, text, |field| regex.is_match(field))
        }
    }
}

fn text_matches<F>(fields: TextFields, text: &LoweredText, predicate: F) -> bool
where
    F: Fn(&str) -> bool,
{
    (fields.includes_title() && predicate(&text.title))
        || (fields.includes_body() && predicate(&text.body))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use triage_core::{Category, IssueState, Priority};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn bug_rules() -> RuleSet {
        RuleSet::new(vec![
            ClassificationRule::new("bug-label", Category::Bug, Priority::High, 40, RuleKind::labels(&["bug"])),
            ClassificationRule::new("crash-keyword", Category::Bug, Priority::High, 30, RuleKind::keywords(&["crash"])),
        ])
        .unwrap()
    }

    #[test]
    fn label_and_keyword_scores_add_up() {
        let issue = Issue::new(1, "Crash on startup", now()).with_labels(["bug"]);
        let result = score_issue(&issue, &bug_rules(), now());
        assert_eq!(result.category, Category::Bug);
        assert_eq!(result.score, 70);
        assert_eq!(result.matched_rules, vec!["bug-label", "crash-keyword"]);
    }

    #[test]
    fn no_match_is_uncategorized() {
        let issue = Issue::new(2, "Hello", now());
        let result = score_issue(&issue, &bug_rules(), now());
        assert_eq!(result.category, Category::Uncategorized);
        assert_eq!(result.score, 0);
        assert!(result.matched_rules.is_empty());
    }

    #[test]
    fn keyword_match_is_case_insensitive_and_respects_fields() {
        let rules = RuleSet::new(vec![ClassificationRule::new(
            "title-only",
            Category::Question,
            Priority::Low,
            20,
            RuleKind::title_keywords(&["How To"]),
        )])
        .unwrap();
        let in_title = Issue::new(1, "HOW TO configure", now());
        let in_body = Issue::new(2, "Config", now()).with_body("how to configure");
        assert_eq!(score_issue(&in_title, &rules, now()).score, 20);
        assert!(score_issue(&in_body, &rules, now()).is_uncategorized());
    }

    #[test]
    fn labels_match_exactly() {
        let issue = Issue::new(1, "x", now()).with_labels(["Bug"]);
        assert!(score_issue(&issue, &bug_rules(), now()).is_uncategorized());
    }

    #[test]
    fn staleness_only_applies_to_open_issues_past_threshold() {
        let rules = RuleSet::new(vec![ClassificationRule::new(
            "stale",
            Category::Stale,
            Priority::Low,
            20,
            RuleKind::stale_after_days(30),
        )])
        .unwrap();
        let old = now() - Duration::days(30);
        let fresh = now() - Duration::days(29);

        assert_eq!(score_issue(&Issue::new(1, "a", old), &rules, now()).category, Category::Stale);
        assert!(score_issue(&Issue::new(2, "b", fresh), &rules, now()).is_uncategorized());
        let closed = Issue::new(3, "c", old).with_state(IssueState::Closed);
        assert!(score_issue(&closed, &rules, now()).is_uncategorized());
    }

    #[test]
    fn highest_priority_decides_category() {
        let rules = RuleSet::new(vec![
            ClassificationRule::new("docs", Category::Documentation, Priority::Low, 25, RuleKind::keywords(&["readme"])),
            ClassificationRule::new("sec", Category::Security, Priority::Critical, 30, RuleKind::keywords(&["xss"])),
        ])
        .unwrap();
        let issue = Issue::new(1, "XSS in README example", now());
        let result = score_issue(&issue, &rules, now());
        assert_eq!(result.category, Category::Security);
        assert_eq!(result.priority, Priority::Critical);
        assert_eq!(result.score, 55);
    }

    #[test]
    fn equal_priority_goes_to_first_declared_rule() {
        let rules = RuleSet::new(vec![
            ClassificationRule::new("feature", Category::Feature, Priority::Medium, 10, RuleKind::keywords(&["support"])),
            ClassificationRule::new("question", Category::Question, Priority::Medium, 10, RuleKind::keywords(&["support"])),
        ])
        .unwrap();
        let result = score_issue(&Issue::new(1, "support for X", now()), &rules, now());
        assert_eq!(result.category, Category::Feature);
    }

    #[test]
    fn totals_are_clamped_both_ways() {
        let rules = RuleSet::new(vec![
            ClassificationRule::new("a", Category::Bug, Priority::High, 100, RuleKind::keywords(&["x"])),
            ClassificationRule::new("b", Category::Bug, Priority::High, 100, RuleKind::keywords(&["x"])),
            ClassificationRule::new("neg", Category::Maintenance, Priority::Low, -100, RuleKind::labels(&["wontfix"])),
        ])
        .unwrap();
        assert_eq!(score_issue(&Issue::new(1, "x", now()), &rules, now()).score, 100);

        let negative = Issue::new(2, "nothing", now()).with_labels(["wontfix"]);
        let result = score_issue(&negative, &rules, now());
        assert_eq!(result.score, 0);
        assert_eq!(result.category, Category::Maintenance);
    }

    #[test]
    fn pattern_rules_use_regex() {
        let rules = RuleSet::new(vec![ClassificationRule::new(
            "cve",
            Category::Security,
            Priority::Critical,
            60,
            RuleKind::pattern(r"cve-\d{4}-\d+", TextFields::Body).unwrap(),
        )])
        .unwrap();
        let issue = Issue::new(1, "Upgrade openssl", now()).with_body("Fixes CVE-2024-1234");
        assert_eq!(score_issue(&issue, &rules, now()).score, 60);
    }

    #[test]
    fn classify_rejects_records_without_id() {
        let record = IssueRecord {
            title: Some("Crash".to_string()),
            updated_at: Some(now()),
            ..Default::default()
        };
        assert!(classify(&record, &bug_rules(), now()).is_err());
    }
}
