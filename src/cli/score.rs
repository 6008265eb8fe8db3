//! Score command - rank a saved annotation-service response without network access.
//!
//! The input is the JSON array returned by the VEP region endpoint, or a concatenation of
//! such entries. Entries may carry an `origin_identifier` field to fill the rsID column.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::output::{print_delimited_results, print_text_results};
use crate::cli::OutputFormat;
use crate::core::annotation::AnnotationResult;
use crate::report::TierSummary;
use crate::scoring::rank;

#[derive(Args)]
pub struct ScoreArgs {
    /// JSON file holding an array of annotation entries
    #[arg(required = true)]
    pub annotations: PathBuf,

    /// Only list results at or above this score
    #[arg(long, allow_hyphen_values = true)]
    pub min_score: Option<i64>,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not an annotation array.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.annotations)
        .with_context(|| format!("Failed to read {}", args.annotations.display()))?;
    let annotations: Vec<AnnotationResult> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not an annotation array", args.annotations.display()))?;

    if verbose {
        eprintln!("Loaded {} annotation(s)", annotations.len());
    }

    let mut results = rank(annotations);
    if let Some(min) = args.min_score {
        results.retain(|r| r.score >= min);
    }
    let summary = TierSummary::from_results(&results);

    match format {
        OutputFormat::Text => print_text_results(&results, &summary, &[], verbose),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "generated_at": chrono::Utc::now(),
                "summary": summary,
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_delimited_results(&results, b'\t')?,
        OutputFormat::Csv => print_delimited_results(&results, b',')?,
    }

    Ok(())
}
