//! Prioritize command - the full parse, resolve, annotate, score pipeline.

use std::cell::RefCell;
use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::output::{print_delimited_results, print_text_results};
use crate::cli::{read_input, HookOptions, OutputFormat, ServiceArgs};
use crate::config::{AnnotationFailurePolicy, PipelineConfig};
use crate::ensembl::EnsemblClient;
use crate::hook::AutomationHook;
use crate::pipeline::{Pipeline, ProgressObserver, Stage};
use crate::utils::validation::MAX_VARIANTS;

#[derive(Args)]
pub struct PrioritizeArgs {
    /// Input file (.vcf, .vcf.gz, .txt, .csv or .tsv)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Record regions that fail to annotate and continue, instead of aborting the batch
    #[arg(long)]
    pub isolate_failures: bool,

    /// Run the automation hook for every result with an identifier (text and JSON output)
    #[arg(long)]
    pub hook: bool,

    /// Refuse files holding more than this many variant records
    #[arg(long, default_value_t = MAX_VARIANTS)]
    pub max_variants: usize,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    #[command(flatten)]
    pub service: ServiceArgs,

    #[command(flatten)]
    pub hook_options: HookOptions,
}

/// Progress bars on stderr, one per network-bound stage
struct BarObserver {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarObserver {
    fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }
}

impl ProgressObserver for BarObserver {
    fn start(&self, stage: Stage, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        bar.set_message(stage.to_string());
        *self.bar.borrow_mut() = Some(bar);
    }

    fn advance(&self, _stage: Stage, current: usize, _total: usize) {
        if let Some(bar) = self.bar.borrow().as_ref() {
            bar.set_position(current as u64);
        }
    }

    fn finish(&self, _stage: Stage) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }
}

/// Execute the prioritize command
///
/// # Errors
///
/// Returns an error if the input cannot be parsed or, unless `--isolate-failures` is set,
/// if any variant fails to annotate.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PrioritizeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (filename, content) = read_input(&args.input)?;
    if args.hook && matches!(format, OutputFormat::Tsv | OutputFormat::Csv) {
        eprintln!("Warning: --hook only runs with text or JSON output; ignoring it");
    }

    let client = EnsemblClient::new(args.service.to_config())?;
    let config = PipelineConfig {
        failure_policy: if args.isolate_failures {
            AnnotationFailurePolicy::Isolate
        } else {
            AnnotationFailurePolicy::FailFast
        },
        max_variants: args.max_variants,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(&client, &client, config);

    let observer: Box<dyn ProgressObserver> = if args.no_progress {
        Box::new(crate::pipeline::NoProgress)
    } else {
        Box::new(BarObserver::new())
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let report = runtime.block_on(pipeline.run_file(&filename, &content, observer.as_ref()))?;

    if verbose {
        eprintln!(
            "Parsed {} record(s); annotated {} variant(s)",
            report.parsed, report.annotated
        );
    }
    if !report.unresolved.is_empty() {
        let shown: Vec<&str> = report.unresolved.iter().take(10).map(String::as_str).collect();
        eprintln!(
            "Could not resolve {} identifier(s): {}",
            report.unresolved.len(),
            shown.join(", ")
        );
    }
    if !report.failed_regions.is_empty() {
        eprintln!(
            "Annotation failed for {} region(s): {}",
            report.failed_regions.len(),
            report.failed_regions.join(", ")
        );
    }
    if report.annotated == 0 {
        eprintln!("No coordinate variants available for annotation.");
    }

    let hook_text = if args.hook && matches!(format, OutputFormat::Text | OutputFormat::Json) {
        let hook = AutomationHook::new(args.hook_options.to_config())?;
        runtime.block_on(async {
            let mut texts = Vec::new();
            for (i, result) in report.results.iter().enumerate() {
                if let Some(rsid) = &result.rsid {
                    texts.push((i, hook.call(rsid).await));
                }
            }
            texts
        })
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Text => {
            print_text_results(&report.results, &report.summary, &hook_text, verbose);
        }
        OutputFormat::Json => {
            let mut output = serde_json::to_value(&report)?;
            if !hook_text.is_empty() {
                output["hook"] = hook_text
                    .iter()
                    .map(|(i, text)| serde_json::json!({ "index": i, "text": text }))
                    .collect();
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_delimited_results(&report.results, b'\t')?,
        OutputFormat::Csv => print_delimited_results(&report.results, b',')?,
    }

    Ok(())
}
