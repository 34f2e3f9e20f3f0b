//! Issue shapes at the engine boundary.
//!
//! `IssueRecord` is what arrives from the data-fetch step: loosely typed,
//! every field optional. `Issue` is the validated form the scorer works on.

mod record;
mod state;
mod validated;

pub use record::{IssueRecord, LabelRecord};
pub use state::IssueState;
pub use validated::Issue;
