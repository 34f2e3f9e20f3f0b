//! `triage` binary entry point.

use clap::Parser;

use triage_cli::cli::{Cli, Commands};
use triage_cli::commands;

fn main() -> anyhow::Result<()> {
    triage_observability::init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", triage_core::constants::VERSION);
        }
        Commands::Classify(args) => {
            let outcome = commands::classify::run(&args)?;
            commands::classify::print_summary(&outcome, args.json)?;
        }
        Commands::Rules(args) => {
            commands::rules::run(&args)?;
        }
    }
    Ok(())
}
