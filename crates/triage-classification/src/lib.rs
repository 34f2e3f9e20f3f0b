//! # triage-classification
//!
//! Rule-based issue classification.
//! Rules match on keywords, labels, regex patterns, and staleness; matched
//! contributions are summed and clamped to 0-100, and the highest-priority
//! match decides the category. Results are cached per `(id, updated_at)`
//! fingerprint so unchanged issues are not rescored.

pub mod cache;
pub mod engine;
pub mod rules;
pub mod scorer;

pub use cache::ClassificationCache;
pub use engine::{ClassificationEngine, EngineStats};
pub use rules::{ClassificationRule, RuleKind, RuleSet, TextFields};
pub use scorer::{classify, score_issue};
