//! Tracing initialization and span definitions.

pub mod spans;

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use triage_core::config::defaults::DEFAULT_LOG_FILTER;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "TRIAGE_LOG";

static INIT: Once = Once::new();

/// Initialize human-readable tracing output on stderr.
///
/// Reads `TRIAGE_LOG` for per-target levels, e.g.
/// `TRIAGE_LOG=triage_classification=debug,triage_cli=info`.
/// Falls back to `triage=info` if unset or invalid. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(env_filter())
            .init();
    });
}

/// Initialize tracing with structured JSON lines on stderr. Idempotent,
/// and shares its guard with [`init_tracing`]: whichever runs first wins.
pub fn init_tracing_json() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter())
            .with_target(true)
            .json()
            .init();
    });
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
