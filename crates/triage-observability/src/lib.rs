//! # triage-observability
//!
//! Tracing subscriber setup and span macros.

pub mod tracing_setup;

pub use tracing_setup::{init_tracing, init_tracing_json};
