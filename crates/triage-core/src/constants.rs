/// Triage system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of a classification score.
pub const MAX_SCORE: u8 = 100;

/// Largest absolute score contribution a single rule may declare.
pub const MAX_RULE_CONTRIBUTION: i32 = 100;

/// Project-level config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILENAME: &str = "triage.toml";
