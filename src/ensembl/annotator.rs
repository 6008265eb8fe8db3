use tracing::{debug, warn};

use crate::config::AnnotationFailurePolicy;
use crate::core::annotation::AnnotationResult;
use crate::core::variant::GenomicVariant;
use crate::ensembl::{EffectPredictor, ServiceError};

/// Annotations gathered for a batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationOutcome {
    /// One entry per variant the service annotated, in input order
    pub annotations: Vec<AnnotationResult>,
    /// Region strings that failed; only filled under [`AnnotationFailurePolicy::Isolate`]
    pub failed_regions: Vec<String>,
}

/// Annotate coordinate variants one region query at a time.
///
/// The first entry of each response is kept and tagged with the variant's identifier. An
/// empty response contributes nothing. `progress` receives `(current, total)` after every
/// variant, including failed ones under [`AnnotationFailurePolicy::Isolate`].
///
/// # Errors
///
/// Under [`AnnotationFailurePolicy::FailFast`], returns `ServiceError::AnnotationFailed`
/// naming the region of the first failed query; no partial results are returned.
pub async fn annotate<P, F>(
    predictor: &P,
    variants: &[GenomicVariant],
    policy: AnnotationFailurePolicy,
    mut progress: F,
) -> Result<AnnotationOutcome, ServiceError>
where
    P: EffectPredictor + ?Sized,
    F: FnMut(usize, usize),
{
    let mut outcome = AnnotationOutcome::default();
    let total = variants.len();

    for (i, variant) in variants.iter().enumerate() {
        let region = variant.region_string();

        match predictor.predict(&region).await {
            Ok(results) => {
                if let Some(mut first) = results.into_iter().next() {
                    first.origin_identifier = variant.rsid.clone();
                    outcome.annotations.push(first);
                } else {
                    debug!(region = %region, "Annotation service returned no entries");
                }
            }
            Err(e) => match policy {
                AnnotationFailurePolicy::FailFast => {
                    return Err(ServiceError::AnnotationFailed {
                        region,
                        message: e.to_string(),
                    });
                }
                AnnotationFailurePolicy::Isolate => {
                    warn!(region = %region, error = %e, "Annotation failed; continuing");
                    outcome.failed_regions.push(region);
                }
            },
        }

        progress(i + 1, total);
    }

    Ok(outcome)
}
