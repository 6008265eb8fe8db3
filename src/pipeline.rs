//! End-to-end batch orchestration.
//!
//! ```text
//! bytes ─▶ parse ─▶ partition ─┬─ coordinates ───────────────┬─▶ annotate ─▶ rank ─▶ BatchReport
//!                              └─ identifiers ─▶ resolve ────┘
//! ```
//!
//! Each stage consumes its whole input before the next starts. Resolution failures are
//! collected in the report; annotation failures abort the batch unless the pipeline is
//! configured with [`AnnotationFailurePolicy::Isolate`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::config::{AnnotationFailurePolicy, PipelineConfig};
use crate::core::priority::PriorityResult;
use crate::core::variant::{partition, VariantRecord};
use crate::ensembl::{annotate, resolve_all, EffectPredictor, ServiceError, VariationLookup};
use crate::parsing::{parse_input, ParseError};
use crate::report::TierSummary;
use crate::scoring::rank;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Pipeline stage reported to a [`ProgressObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Resolve,
    Annotate,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve => write!(f, "Resolving identifiers"),
            Self::Annotate => write!(f, "Annotating variants"),
        }
    }
}

/// Receives incremental progress for the network-bound stages
pub trait ProgressObserver {
    /// Called once before a stage with its item count
    fn start(&self, _stage: Stage, _total: usize) {}

    /// Called after each item
    fn advance(&self, _stage: Stage, _current: usize, _total: usize) {}

    fn finish(&self, _stage: Stage) {}
}

/// Observer that ignores all progress
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Outcome of one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub failure_policy: AnnotationFailurePolicy,
    /// Records produced by the parser
    pub parsed: usize,
    /// Coordinate variants submitted for annotation
    pub annotated: usize,
    /// Identifiers the lookup service could not place
    pub unresolved: Vec<String>,
    /// Regions whose annotation failed (isolation policy only)
    pub failed_regions: Vec<String>,
    pub summary: TierSummary,
    /// Ranked by descending score
    pub results: Vec<PriorityResult>,
}

/// Batch pipeline over an identifier lookup and an effect predictor
pub struct Pipeline<'a, L: ?Sized, P: ?Sized> {
    lookup: &'a L,
    predictor: &'a P,
    config: PipelineConfig,
}

impl<'a, L, P> Pipeline<'a, L, P>
where
    L: VariationLookup + ?Sized,
    P: EffectPredictor + ?Sized,
{
    pub fn new(lookup: &'a L, predictor: &'a P, config: PipelineConfig) -> Self {
        Self {
            lookup,
            predictor,
            config,
        }
    }

    /// Parse `content` (format chosen from `filename`) and run the batch
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Parse` if the file cannot be parsed or holds more than
    /// `max_variants` records, or
    /// `PipelineError::Service` if annotation fails under the fail-fast policy.
    pub async fn run_file(
        &self,
        filename: &str,
        content: &[u8],
        observer: &dyn ProgressObserver,
    ) -> Result<BatchReport, PipelineError> {
        let records = parse_input(filename, content, self.config.max_variants)?;
        info!(filename, records = records.len(), "Parsed input");
        self.run_records(records, observer).await
    }

    /// Run the batch over already parsed records
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Parse` with `TooManyVariants` if the batch exceeds the configured
    /// maximum, or `PipelineError::Service` if annotation fails under the fail-fast policy.
    pub async fn run_records(
        &self,
        records: Vec<VariantRecord>,
        observer: &dyn ProgressObserver,
    ) -> Result<BatchReport, PipelineError> {
        let parsed = records.len();
        if parsed > self.config.max_variants {
            return Err(ParseError::TooManyVariants(self.config.max_variants).into());
        }

        let (mut coordinates, identifiers) = partition(records);

        let mut unresolved = Vec::new();
        if !identifiers.is_empty() {
            observer.start(Stage::Resolve, identifiers.len());
            let resolution = resolve_all(self.lookup, &identifiers, |current, total| {
                observer.advance(Stage::Resolve, current, total);
            })
            .await;
            observer.finish(Stage::Resolve);

            info!(
                identifiers = identifiers.len(),
                resolved = resolution.resolved.len(),
                unresolved = resolution.unresolved.len(),
                "Resolved identifiers"
            );
            coordinates.extend(resolution.resolved);
            unresolved = resolution.unresolved;
        }

        observer.start(Stage::Annotate, coordinates.len());
        let outcome = annotate(
            self.predictor,
            &coordinates,
            self.config.failure_policy,
            |current, total| observer.advance(Stage::Annotate, current, total),
        )
        .await;
        observer.finish(Stage::Annotate);
        let outcome = outcome?;

        let results = rank(outcome.annotations);
        let summary = TierSummary::from_results(&results);
        info!(
            scored = results.len(),
            critical = summary.critical,
            high = summary.high,
            "Scored variants"
        );

        Ok(BatchReport {
            generated_at: Utc::now(),
            failure_policy: self.config.failure_policy,
            parsed,
            annotated: coordinates.len(),
            unresolved,
            failed_regions: outcome.failed_regions,
            summary,
            results,
        })
    }
}
