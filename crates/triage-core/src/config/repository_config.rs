use serde::{Deserialize, Serialize};

/// Repository the dashboard is built for. Only used for logging context;
/// it never affects rule evaluation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    pub owner: Option<String>,
    pub name: Option<String>,
    /// GitHub token. Skipped on serialization and redacted in `Debug`.
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl RepositoryConfig {
    /// `owner/name` when both are set.
    pub fn slug(&self) -> Option<String> {
        match (&self.owner, &self.name) {
            (Some(owner), Some(name)) => Some(format!("{owner}/{name}")),
            _ => None,
        }
    }
}

impl std::fmt::Debug for RepositoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositoryConfig")
            .field("owner", &self.owner)
            .field("name", &self.name)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
