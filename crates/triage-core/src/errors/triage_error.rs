use super::config_error::ConfigError;
use super::error_code::{self, TriageErrorCode};

/// Top-level error for the triage workspace.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// A single issue record is structurally invalid (missing id or timestamp).
    #[error("invalid issue record: {reason}")]
    InvalidInput { reason: String },

    /// Rule set or config failed to load. Fatal at engine construction.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The batch argument itself is unusable (e.g. not a JSON array).
    #[error("invalid batch: {reason}")]
    InvalidBatch { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TriageError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl TriageErrorCode for TriageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => error_code::INVALID_INPUT,
            Self::Configuration(e) => e.error_code(),
            Self::InvalidBatch { .. } => error_code::INVALID_BATCH,
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

pub type TriageResult<T> = Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_string_includes_code() {
        let err = TriageError::invalid_input("missing id");
        assert_eq!(
            err.tagged_string(),
            "[INVALID_INPUT] invalid issue record: missing id"
        );
    }

    #[test]
    fn config_errors_keep_their_code_when_wrapped() {
        let err: TriageError = ConfigError::InvalidRule {
            rule_id: "r1".to_string(),
            message: "empty keyword list".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
    }
}
