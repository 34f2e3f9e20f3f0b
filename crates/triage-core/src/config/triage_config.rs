//! Top-level triage configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CacheConfig, RepositoryConfig, RulesConfig};
use crate::constants::PROJECT_CONFIG_FILENAME;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`TRIAGE_*`, `GITHUB_*`)
/// 3. Project config (`triage.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    pub cache: CacheConfig,
    pub rules: RulesConfig,
    pub repository: RepositoryConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub rules_path: Option<PathBuf>,
    pub include_default_rules: Option<bool>,
    pub cache_max_entries: Option<u64>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

impl TriageConfig {
    /// Load configuration from `root`, the environment, and CLI flags.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        Self::load_with_env(root, cli_overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`TriageConfig::load`] with an explicit environment lookup.
    pub fn load_with_env<F>(
        root: &Path,
        cli_overrides: Option<&CliOverrides>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_config_path = root.join(PROJECT_CONFIG_FILENAME);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config, env);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML file.
    /// Unknown keys are silently ignored.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &TriageConfig) -> Result<(), ConfigError> {
        if config.cache.max_entries == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "cache.max_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.cache.ttl_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cache.ttl_secs".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `TRIAGE_CACHE_MAX_ENTRIES`, `TRIAGE_RULES_PATH`, `GITHUB_TOKEN`, etc.
    fn apply_env_overrides<F>(config: &mut TriageConfig, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env("TRIAGE_CACHE_MAX_ENTRIES").and_then(|v| v.parse::<u64>().ok()) {
            config.cache.max_entries = v;
        }
        if let Some(v) = env("TRIAGE_CACHE_TTL_SECS").and_then(|v| v.parse::<u64>().ok()) {
            config.cache.ttl_secs = Some(v);
        }
        if let Some(v) = env("TRIAGE_RULES_PATH") {
            config.rules.path = Some(PathBuf::from(v));
        }
        if let Some(v) = env("TRIAGE_INCLUDE_DEFAULT_RULES").and_then(|v| v.parse::<bool>().ok()) {
            config.rules.include_defaults = v;
        }
        if let Some(v) = env("GITHUB_OWNER") {
            config.repository.owner = Some(v);
        }
        if let Some(v) = env("GITHUB_REPO") {
            config.repository.name = Some(v);
        }
        if let Some(v) = env("GITHUB_TOKEN") {
            config.repository.token = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut TriageConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.rules_path {
            config.rules.path = Some(v.clone());
        }
        if let Some(v) = cli.include_default_rules {
            config.rules.include_defaults = v;
        }
        if let Some(v) = cli.cache_max_entries {
            config.cache.max_entries = v;
        }
        if let Some(ref v) = cli.owner {
            config.repository.owner = Some(v.clone());
        }
        if let Some(ref v) = cli.repo {
            config.repository.name = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML. The token is never written.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
