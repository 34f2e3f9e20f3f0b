//! CLI argument parsing via `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use triage_core::config::CliOverrides;

#[derive(Parser)]
#[command(
    name = "triage",
    version,
    about = "Rule-based GitHub issue classification for the project dashboard",
    long_about = "Classify fetched GitHub issues with keyword, label, pattern, and staleness rules.\n\nConfiguration precedence: CLI > environment > triage.toml > defaults.",
    after_help = "Examples:\n  triage classify --input data/raw/issues.json --output-dir data\n  triage classify --input issues.json --rules rules.toml --owner acme --repo widgets\n  triage rules --rules rules.toml",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version
    Version,
    /// Classify an issues.json file
    #[command(
        long_about = "Classify every issue in the input array and write issues.json plus one file per issue. If the classifier cannot be configured, the data is written unclassified."
    )]
    Classify(ClassifyArgs),
    /// List the effective rule table
    Rules(RulesArgs),
}

/// Options shared by every command that builds a classifier.
#[derive(Args, Debug, Clone, Default)]
pub struct RuleOptions {
    #[arg(long, help = "Project root holding triage.toml (default: current dir)")]
    pub project_root: Option<PathBuf>,
    #[arg(long, help = "TOML rule file appended after the built-in rules")]
    pub rules: Option<PathBuf>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Do not include the built-in rules")]
    pub no_default_rules: bool,
}

impl RuleOptions {
    pub fn root(&self) -> PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            rules_path: self.rules.clone(),
            include_default_rules: self.no_default_rules.then_some(false),
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(long, help = "JSON array of GitHub issues")]
    pub input: PathBuf,
    #[arg(long, default_value = "data", help = "Directory for issues.json and issues/<number>.json")]
    pub output_dir: PathBuf,
    #[arg(long, help = "Repository owner (logging only)")]
    pub owner: Option<String>,
    #[arg(long, help = "Repository name (logging only)")]
    pub repo: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Print the batch summary as JSON")]
    pub json: bool,
    #[command(flatten)]
    pub rule_options: RuleOptions,
}

impl ClassifyArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            owner: self.owner.clone(),
            repo: self.repo.clone(),
            ..self.rule_options.overrides()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RulesArgs {
    #[command(flatten)]
    pub rule_options: RuleOptions,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn classify_args_map_to_overrides() {
        let cli = Cli::parse_from([
            "triage",
            "classify",
            "--input",
            "issues.json",
            "--rules",
            "rules.toml",
            "--no-default-rules",
            "--owner",
            "acme",
        ]);
        let Commands::Classify(args) = cli.cmd else {
            panic!("expected classify");
        };
        let overrides = args.overrides();
        assert_eq!(overrides.rules_path, Some(PathBuf::from("rules.toml")));
        assert_eq!(overrides.include_default_rules, Some(false));
        assert_eq!(overrides.owner.as_deref(), Some("acme"));
        assert_eq!(args.output_dir, PathBuf::from("data"));
    }
}
