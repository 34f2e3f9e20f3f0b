//! # triage-cli
//!
//! The classification step of the dashboard's data fetch: read the fetched
//! `issues.json`, classify it, and write the augmented data files.

pub mod cli;
pub mod commands;
pub mod output;
