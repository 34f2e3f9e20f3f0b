use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{IssueRecord, IssueState};
use crate::errors::TriageError;

/// A validated issue. `id` and `updated_at` are required; everything else
/// defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: Option<u64>,
    pub title: String,
    pub body: String,
    pub labels: BTreeSet<String>,
    pub state: IssueState,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Minimal open issue, mostly for tests and fixtures.
    pub fn new(id: u64, title: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            number: None,
            title: title.into(),
            body: String::new(),
            labels: BTreeSet::new(),
            state: IssueState::Open,
            created_at: None,
            updated_at,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_state(mut self, state: IssueState) -> Self {
        self.state = state;
        self
    }
}

impl TryFrom<&IssueRecord> for Issue {
    type Error = TriageError;

    fn try_from(record: &IssueRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .ok_or_else(|| TriageError::invalid_input("missing id"))?;
        let updated_at = record.updated_at.ok_or_else(|| {
            TriageError::invalid_input(format!("issue {id} is missing updated_at"))
        })?;

        Ok(Self {
            id,
            number: record.number,
            title: record.title.clone().unwrap_or_default(),
            body: record.body.clone().unwrap_or_default(),
            labels: record
                .labels
                .iter()
                .filter_map(|l| l.name())
                .map(str::to_string)
                .collect(),
            state: record.state.unwrap_or_default(),
            created_at: record.created_at,
            updated_at,
        })
    }
}

impl From<&Issue> for IssueRecord {
    fn from(issue: &Issue) -> Self {
        Self {
            id: Some(issue.id),
            number: issue.number,
            title: Some(issue.title.clone()),
            body: Some(issue.body.clone()),
            labels: issue
                .labels
                .iter()
                .map(|l| super::LabelRecord::Name(l.clone()))
                .collect(),
            state: Some(issue.state),
            created_at: issue.created_at,
            updated_at: Some(issue.updated_at),
        }
    }
}
