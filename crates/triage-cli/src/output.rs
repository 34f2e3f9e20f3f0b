//! Writing the dashboard data files.
//!
//! `issues.json` keeps every fetched field and gains a `classification`
//! object per issue; `issues/<number>.json` holds one issue each.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use triage_core::BatchResult;

pub const ISSUES_FILE: &str = "issues.json";
pub const ISSUE_DIR: &str = "issues";
pub const CLASSIFICATION_FIELD: &str = "classification";

/// Attach `batch.tasks[i]` to `issues[i]`. Non-object elements are left alone.
pub fn augment(issues: &mut [Value], batch: &BatchResult) -> anyhow::Result<()> {
    for (issue, task) in issues.iter_mut().zip(&batch.tasks) {
        if let Value::Object(fields) = issue {
            fields.insert(CLASSIFICATION_FIELD.to_string(), serde_json::to_value(task)?);
        }
    }
    Ok(())
}

/// File stem for one issue: its number, else its id.
pub fn issue_key(issue: &Value) -> Option<u64> {
    issue
        .get("number")
        .and_then(Value::as_u64)
        .or_else(|| issue.get("id").and_then(Value::as_u64))
}

/// Write `issues.json` and the per-issue files. Returns the paths written.
pub fn write_issue_files(output_dir: &Path, issues: &[Value]) -> anyhow::Result<Vec<PathBuf>> {
    let issue_dir = output_dir.join(ISSUE_DIR);
    fs::create_dir_all(&issue_dir)
        .with_context(|| format!("creating {}", issue_dir.display()))?;

    let mut written = Vec::with_capacity(issues.len() + 1);

    let all_path = output_dir.join(ISSUES_FILE);
    write_json(&all_path, &Value::Array(issues.to_vec()))?;
    written.push(all_path);

    for (index, issue) in issues.iter().enumerate() {
        let Some(key) = issue_key(issue) else {
            debug!(index, "issue has no number or id, skipping per-issue file");
            continue;
        };
        let path = issue_dir.join(format!("{key}.json"));
        write_json(&path, issue)?;
        written.push(path);
    }
    Ok(written)
}

fn write_json(path: &Path, value: &Value) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content + "\n").with_context(|| format!("writing {}", path.display()))
}
