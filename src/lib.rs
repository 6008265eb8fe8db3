//! # variant-prioritizer
//!
//! A library for ranking genetic variants by clinical priority.
//!
//! Variant files come in many shapes: VCFs with full coordinates, bare rsID lists,
//! consumer genotype-array exports, ad hoc CSV tables. `variant-prioritizer` normalizes all of
//! them into one record type, places identifier-only records on the genome, annotates each
//! variant with Ensembl VEP, and combines three evidence signals into an explainable score.
//!
//! ## Features
//!
//! - **Format detection**: VCF (plain or gzip), rsID lists, 23andMe exports, CSV/TSV tables
//! - **Coordinate resolution**: rsIDs are expanded to one variant per alternate allele
//! - **Deterministic scoring**: ClinVar class, consequence impact and gnomAD frequency
//! - **Explainable output**: every score comes with the reasons that produced it
//! - **Failure policy**: fail-fast batches, or per-variant isolation on request
//!
//! ## Example
//!
//! ```rust,no_run
//! use variant_prioritizer::config::{PipelineConfig, ServiceConfig};
//! use variant_prioritizer::ensembl::EnsemblClient;
//! use variant_prioritizer::pipeline::{NoProgress, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = EnsemblClient::new(ServiceConfig::default())?;
//! let pipeline = Pipeline::new(&client, &client, PipelineConfig::default());
//!
//! let report = pipeline
//!     .run_file("variants.txt", b"rs429358\nrs7412\n", &NoProgress)
//!     .await?;
//!
//! for result in &report.results {
//!     println!("{}: {} ({})", result.label(), result.score, result.tier);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Variant records, annotation payloads, scores and tiers
//! - [`parsing`]: Format detection and parsers for every supported input
//! - [`ensembl`]: Identifier resolution and effect annotation services
//! - [`scoring`]: Evidence extraction and the priority scorer
//! - [`pipeline`]: End-to-end batch orchestration
//! - [`report`]: Tier summaries and tabular export
//! - [`hook`]: Optional automation webhook
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod config;
pub mod core;
pub mod ensembl;
pub mod hook;
pub mod parsing;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::annotation::AnnotationResult;
pub use crate::core::priority::PriorityResult;
pub use crate::core::types::*;
pub use crate::core::variant::{GenomicVariant, VariantRecord};
pub use pipeline::{BatchReport, Pipeline};
pub use scoring::{rank, score};
