use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied context for one batch.
///
/// `owner`/`repo` only feed logging. `as_of` pins "now" for staleness rules;
/// when unset the engine uses the wall clock at batch start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchContext {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub as_of: Option<DateTime<Utc>>,
}

impl BatchContext {
    pub fn for_repository(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            as_of: None,
        }
    }

    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// `owner/repo`, or `-` when unknown.
    pub fn repository_label(&self) -> String {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => format!("{owner}/{repo}"),
            (None, Some(repo)) => repo.clone(),
            _ => "-".to_string(),
        }
    }
}
