mod config_error;
pub mod error_code;
mod triage_error;

pub use config_error::ConfigError;
pub use error_code::TriageErrorCode;
pub use triage_error::{TriageError, TriageResult};
