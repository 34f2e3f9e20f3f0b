pub mod classify;
pub mod rules;

use triage_classification::ClassificationEngine;
use triage_core::config::CliOverrides;
use triage_core::errors::TriageResult;
use triage_core::TriageConfig;

use crate::cli::RuleOptions;

/// Resolve config and build the engine; either step may fail.
pub fn build_engine(
    options: &RuleOptions,
    overrides: &CliOverrides,
) -> TriageResult<(TriageConfig, ClassificationEngine)> {
    let config = TriageConfig::load(&options.root(), Some(overrides))?;
    let engine = ClassificationEngine::from_config(&config)?;
    Ok((config, engine))
}
