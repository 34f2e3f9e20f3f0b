use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::IssueState;

/// An issue as handed over by the data-fetch step.
///
/// GitHub REST returns labels as objects with a `name`; normalized feeds
/// often flatten them to strings. Both shapes are accepted. Only `id` and
/// `updated_at` are required downstream, so a `null` label list or an
/// unrecognized state reads as absent instead of failing the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueRecord {
    pub id: Option<u64>,
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub labels: Vec<LabelRecord>,
    #[serde(deserialize_with = "lenient_state")]
    pub state: Option<IssueState>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<LabelRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<LabelRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_state<'de, D>(deserializer: D) -> Result<Option<IssueState>, D::Error>
where
    D: Deserializer<'de>,
{
    let state = Option::<String>::deserialize(deserializer)?;
    Ok(state.as_deref().and_then(IssueState::parse_str))
}

/// A label in either of its wire shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelRecord {
    Name(String),
    Object { name: Option<String> },
}

impl LabelRecord {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name.as_str()),
            Self::Object { name } => name.as_deref(),
        }
    }
}

impl From<&str> for LabelRecord {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}
