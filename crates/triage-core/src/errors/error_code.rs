//! Stable error codes for callers that serialize failures (CLI output, JSON reports).

/// Every error enum implements this to expose a machine-readable code.
pub trait TriageErrorCode {
    /// Returns the error code string (e.g., "INVALID_INPUT").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_BATCH: &str = "INVALID_BATCH";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
