use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Priority};

/// Outcome of classifying one issue.
///
/// Flat and JSON-serializable so the data-fetch step can attach it to the
/// issue it came from. Callers get their own copy; the cached one is never
/// handed out by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    /// `None` only for a degraded result whose record had no id.
    pub issue_id: Option<u64>,
    pub category: Category,
    pub priority: Priority,
    /// Confidence score in `0..=100`.
    pub score: u8,
    /// Ids of the matching rules, in rule declaration order.
    pub matched_rules: Vec<String>,
    pub classified_at: DateTime<Utc>,
}

impl ClassificationResult {
    /// The "no rule matched" / degraded result.
    pub fn uncategorized(issue_id: Option<u64>, classified_at: DateTime<Utc>) -> Self {
        Self {
            issue_id,
            category: Category::Uncategorized,
            priority: Priority::Low,
            score: 0,
            matched_rules: Vec::new(),
            classified_at,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category == Category::Uncategorized
    }
}
