//! Configuration errors.

use super::error_code::{self, TriageErrorCode};

/// Errors that can occur while loading config files or rule sets.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("invalid rule '{rule_id}': {message}")]
    InvalidRule { rule_id: String, message: String },
}

impl TriageErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
