//! Span definitions per operation.

/// Span wrapping one classification batch.
#[macro_export]
macro_rules! classification_span {
    ($repository:expr, $batch_size:expr) => {
        tracing::info_span!(
            $crate::tracing_setup::spans::names::CLASSIFICATION,
            repository = %$repository,
            batch_size = $batch_size
        )
    };
}

/// Span wrapping a rule-set load.
#[macro_export]
macro_rules! rules_load_span {
    ($source:expr) => {
        tracing::info_span!($crate::tracing_setup::spans::names::RULES_LOAD, source = %$source)
    };
}

/// Span names, shared by the macros above and by log filters.
pub mod names {
    pub const CLASSIFICATION: &str = "triage.classification";
    pub const RULES_LOAD: &str = "triage.rules_load";
}
