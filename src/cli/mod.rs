//! Command-line interface for variant-prioritizer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **prioritize**: Parse, resolve, annotate, score and rank a variant file
//! - **parse**: Parse a variant file offline and list the records
//! - **score**: Score a saved annotation-service response offline
//! - **hook**: Run the automation hook for one identifier
//!
//! ## Usage
//!
//! ```text
//! # Rank variants from a VCF
//! variant-prioritizer prioritize sample.vcf.gz
//!
//! # Keep going when single regions fail to annotate, export CSV
//! variant-prioritizer prioritize genome.txt --isolate-failures --format csv > ranked.csv
//!
//! # Check what a file parses to without touching the network
//! variant-prioritizer parse variants.csv
//!
//! # Re-score a saved VEP response
//! variant-prioritizer score vep_response.json --format json
//! ```

use clap::{Args, Parser, Subcommand};

use crate::config::{
    HookConfig, ServiceConfig, DEFAULT_ENSEMBL_BASE_URL, DEFAULT_HOOK_TIMEOUT_SECS,
    DEFAULT_RESPONSE_KEY,
};

pub mod hook;
pub mod output;
pub mod parse;
pub mod prioritize;
pub mod score;

#[derive(Parser)]
#[command(name = "variant-prioritizer")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Annotate genetic variants and rank them by clinical priority")]
#[command(
    long_about = "variant-prioritizer turns VCF files, rsID lists, 23andMe exports and CSV/TSV tables into a ranked list of variants.\n\nEach variant is placed on the genome, annotated with Ensembl VEP, and scored from:\n- ClinVar clinical significance\n- Functional consequence\n- gnomAD population frequency"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, annotate, score and rank the variants in a file
    Prioritize(prioritize::PrioritizeArgs),

    /// Parse a variant file and list its records (no network)
    Parse(parse::ParseArgs),

    /// Score and rank a saved annotation-service response (no network)
    Score(score::ScoreArgs),

    /// Run the automation hook for one identifier
    Hook(hook::HookArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
    Csv,
}

/// Connection options for the Ensembl REST service
#[derive(Args, Debug, Clone)]
pub struct ServiceArgs {
    /// Base URL of the Ensembl REST service
    #[arg(long, env = "ENSEMBL_BASE_URL", default_value = DEFAULT_ENSEMBL_BASE_URL)]
    pub ensembl_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub request_timeout: u64,
}

impl ServiceArgs {
    #[must_use]
    pub fn to_config(&self) -> ServiceConfig {
        ServiceConfig {
            timeout: std::time::Duration::from_secs(self.request_timeout),
            ..ServiceConfig::default()
        }
        .with_base_url(&self.ensembl_url)
    }
}

/// Automation webhook options
#[derive(Args, Debug, Clone)]
pub struct HookOptions {
    /// Automation webhook URL
    #[arg(long, env = "AUTOMATION_WEBHOOK_URL")]
    pub hook_url: Option<String>,

    /// JSON key holding the text in webhook responses
    #[arg(long, env = "AUTOMATION_RESPONSE_KEY", default_value = DEFAULT_RESPONSE_KEY)]
    pub hook_response_key: String,

    /// Webhook timeout in seconds
    #[arg(long, env = "AUTOMATION_TIMEOUT_SECONDS", default_value_t = DEFAULT_HOOK_TIMEOUT_SECS)]
    pub hook_timeout: u64,
}

impl HookOptions {
    #[must_use]
    pub fn to_config(&self) -> HookConfig {
        HookConfig {
            url: self.hook_url.clone(),
            response_key: self.hook_response_key.clone(),
            timeout_secs: self.hook_timeout,
        }
    }
}

/// Read an input file and validate its name and content
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn read_input(path: &std::path::Path) -> anyhow::Result<(String, Vec<u8>)> {
    let content = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let filename = crate::utils::validation::validate_upload(&name, &content)
        .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?;
    Ok((filename, content))
}
