//! `triage classify`: classify a fetched issues.json and write the data files.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use serde_json::Value;
use tracing::{info, warn};

use triage_core::errors::TriageErrorCode;
use triage_core::{BatchContext, BatchResult};

use crate::cli::ClassifyArgs;
use crate::output;

/// What one `classify` run produced.
#[derive(Debug)]
pub struct ClassifyOutcome {
    /// `None` when the classifier could not be built and the data was
    /// written unclassified.
    pub batch: Option<BatchResult>,
    pub files_written: Vec<PathBuf>,
}

impl ClassifyOutcome {
    pub fn classified(&self) -> bool {
        self.batch.is_some()
    }
}

pub fn run(args: &ClassifyArgs) -> anyhow::Result<ClassifyOutcome> {
    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let mut input: Value = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    if !input.is_array() {
        bail!("{} must contain a JSON array of issues", args.input.display());
    }

    let batch = match super::build_engine(&args.rule_options, &args.overrides()) {
        Ok((config, engine)) => {
            let context = BatchContext {
                owner: config.repository.owner.clone(),
                repo: config.repository.name.clone(),
                as_of: None,
            };
            let batch = engine.classify_json_batch(&input, &context)?;
            if let Value::Array(issues) = &mut input {
                output::augment(issues, &batch)?;
            }
            Some(batch)
        }
        Err(error) => {
            warn!(
                code = error.error_code(),
                %error,
                "classifier unavailable, writing unclassified issue data"
            );
            None
        }
    };

    let issues = input.as_array().map(Vec::as_slice).unwrap_or_default();
    let files_written = output::write_issue_files(&args.output_dir, issues)?;
    info!(
        files = files_written.len(),
        output_dir = %args.output_dir.display(),
        classified = batch.is_some(),
        "issue data written"
    );

    Ok(ClassifyOutcome {
        batch,
        files_written,
    })
}

/// Print the batch summary, human-readable or as JSON.
pub fn print_summary(outcome: &ClassifyOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        let summary = outcome.batch.as_ref().map(summary_json);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(batch) = &outcome.batch else {
        println!(
            "wrote {} files (unclassified: classifier unavailable)",
            outcome.files_written.len()
        );
        return Ok(());
    };

    println!(
        "classified {} issues: avg score {:.1}, cache hit rate {:.0}%, {:.2} ms, {} invalid",
        batch.total_analyzed,
        batch.average_score,
        batch.cache_hit_rate * 100.0,
        batch.processing_time_ms,
        batch.invalid_records
    );
    for (category, count) in batch.category_breakdown() {
        println!("  {category:<14} {count}");
    }
    println!("wrote {} files", outcome.files_written.len());
    Ok(())
}

/// Batch statistics without the per-issue tasks.
fn summary_json(batch: &BatchResult) -> Value {
    serde_json::json!({
        "totalAnalyzed": batch.total_analyzed,
        "averageScore": batch.average_score,
        "processingTimeMs": batch.processing_time_ms,
        "cacheHitRate": batch.cache_hit_rate,
        "invalidRecords": batch.invalid_records,
        "categories": batch
            .category_breakdown()
            .into_iter()
            .map(|(category, count)| (category.to_string(), Value::from(count)))
            .collect::<serde_json::Map<_, _>>(),
        "priorities": batch.priority_breakdown(),
    })
}
