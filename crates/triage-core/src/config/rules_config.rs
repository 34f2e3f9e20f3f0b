use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Where the classification rule table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// TOML file with `[[rules]]` entries, appended after the built-in rules.
    pub path: Option<PathBuf>,
    /// Whether the built-in rule table is included.
    pub include_defaults: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: None,
            include_defaults: defaults::DEFAULT_INCLUDE_DEFAULT_RULES,
        }
    }
}
