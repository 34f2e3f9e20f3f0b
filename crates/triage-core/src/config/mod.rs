pub mod cache_config;
pub mod defaults;
pub mod repository_config;
pub mod rules_config;
pub mod triage_config;

pub use cache_config::CacheConfig;
pub use repository_config::RepositoryConfig;
pub use rules_config::RulesConfig;
pub use triage_config::{CliOverrides, TriageConfig};
