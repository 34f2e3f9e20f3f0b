//! # triage-core
//!
//! Foundation crate for issue triage.
//! Defines the issue boundary types, classification models, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod issue;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use config::TriageConfig;
pub use errors::{ConfigError, TriageError, TriageResult};
pub use issue::{Issue, IssueRecord, IssueState};
pub use models::{BatchContext, BatchResult, Category, ClassificationResult, Priority};
