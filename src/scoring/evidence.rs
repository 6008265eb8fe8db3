//! Evidence signals pulled from an annotation's colocated variants.
//!
//! Both extractors are total: missing data is `None`, never zero.

use crate::core::annotation::AnnotationResult;
use crate::core::types::ClinicalSignificance;

/// Primary population-frequency source (gnomAD genomes)
pub const PRIMARY_FREQUENCY_SOURCE: &str = "gnomadg";

/// Fallback population-frequency source (gnomAD exomes)
pub const SECONDARY_FREQUENCY_SOURCE: &str = "gnomade";

/// Strongest ClinVar classification of the first colocated variant that carries one.
///
/// Classifications are ranked pathogenic > likely pathogenic > uncertain > likely benign >
/// benign. An entry whose `clin_sig` has no recognised term does not end the scan.
#[must_use]
pub fn clinical_significance(annotation: &AnnotationResult) -> Option<ClinicalSignificance> {
    annotation
        .colocated_variants
        .iter()
        .filter(|colocated| !colocated.clin_sig.is_empty())
        .find_map(|colocated| {
            ClinicalSignificance::PRIORITY.into_iter().find(|class| {
                colocated
                    .clin_sig
                    .iter()
                    .any(|term| term == class.as_str())
            })
        })
}

/// First gnomAD allele frequency found across colocated variants and their alleles.
///
/// For each allele the genomes value is preferred, then the exomes value. Non-numeric
/// values are treated as missing.
#[must_use]
pub fn population_frequency(annotation: &AnnotationResult) -> Option<f64> {
    annotation
        .colocated_variants
        .iter()
        .flat_map(|colocated| colocated.frequencies.iter())
        .find_map(|(_, sources)| {
            [PRIMARY_FREQUENCY_SOURCE, SECONDARY_FREQUENCY_SOURCE]
                .iter()
                .find_map(|source| sources.get(*source).and_then(serde_json::Value::as_f64))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(colocated: &str) -> AnnotationResult {
        serde_json::from_str(&format!(
            r#"{{"seq_region_name": "1", "start": 1, "colocated_variants": {colocated}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_strongest_class_within_entry() {
        let a = annotation(r#"[{"clin_sig": ["benign", "likely_pathogenic", "uncertain_significance"]}]"#);
        assert_eq!(
            clinical_significance(&a),
            Some(ClinicalSignificance::LikelyPathogenic)
        );
    }

    #[test]
    fn test_first_classified_entry_wins() {
        let a = annotation(
            r#"[{"id": "COSV1"}, {"clin_sig": ["benign"]}, {"clin_sig": ["pathogenic"]}]"#,
        );
        assert_eq!(clinical_significance(&a), Some(ClinicalSignificance::Benign));
    }

    #[test]
    fn test_unrecognised_terms_do_not_stop_scan() {
        let a = annotation(r#"[{"clin_sig": ["drug_response"]}, {"clin_sig": ["likely_benign"]}]"#);
        assert_eq!(
            clinical_significance(&a),
            Some(ClinicalSignificance::LikelyBenign)
        );
    }

    #[test]
    fn test_no_classification() {
        assert_eq!(clinical_significance(&annotation("[]")), None);
        assert_eq!(
            clinical_significance(&annotation(r#"[{"clin_sig": []}]"#)),
            None
        );
    }

    #[test]
    fn test_genomes_preferred_over_exomes() {
        let a = annotation(r#"[{"frequencies": {"G": {"gnomade": 0.2, "gnomadg": 0.1}}}]"#);
        assert_eq!(population_frequency(&a), Some(0.1));
    }

    #[test]
    fn test_exomes_fallback_per_allele() {
        let a = annotation(
            r#"[{"frequencies": {"G": {"af": 0.3, "gnomade": 0.02}, "T": {"gnomadg": 0.5}}}]"#,
        );
        assert_eq!(population_frequency(&a), Some(0.02));
    }

    #[test]
    fn test_zero_frequency_is_not_missing() {
        let a = annotation(r#"[{"frequencies": {"A": {"gnomadg": 0}}}]"#);
        assert_eq!(population_frequency(&a), Some(0.0));
    }

    #[test]
    fn test_frequency_scan_crosses_entries() {
        let a = annotation(
            r#"[{"frequencies": {"A": {"af": 0.5}}}, {"frequencies": {"A": {"gnomadg": 0.00005}}}]"#,
        );
        assert_eq!(population_frequency(&a), Some(0.00005));
        assert_eq!(population_frequency(&annotation("[]")), None);
    }
}
