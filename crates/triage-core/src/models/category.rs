use serde::{Deserialize, Serialize};

/// Closed set of issue categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Feature,
    Documentation,
    Maintenance,
    Question,
    Security,
    Stale,
    /// Assigned when no rule matches or the record could not be scored.
    #[default]
    Uncategorized,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Self::Bug,
        Self::Feature,
        Self::Documentation,
        Self::Maintenance,
        Self::Question,
        Self::Security,
        Self::Stale,
        Self::Uncategorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Documentation => "documentation",
            Self::Maintenance => "maintenance",
            Self::Question => "question",
            Self::Security => "security",
            Self::Stale => "stale",
            Self::Uncategorized => "uncategorized",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Category::parse_str("Bug"), Some(Category::Bug));
        assert_eq!(Category::parse_str(" stale "), Some(Category::Stale));
        assert_eq!(Category::parse_str("enhancement"), None);
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Category::Documentation).unwrap();
        assert_eq!(json, "\"documentation\"");
    }
}
