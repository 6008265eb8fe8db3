use std::collections::BTreeSet;

use crate::core::annotation::AnnotationResult;
use crate::core::priority::PriorityResult;
use crate::core::types::{ClinicalSignificance, Tier};
use crate::scoring::evidence::{clinical_significance, population_frequency};

/// Loss-of-function consequence terms
pub const HIGH_IMPACT: &[&str] = &[
    "stop_gained",
    "frameshift_variant",
    "splice_donor_variant",
    "splice_acceptor_variant",
    "start_lost",
    "stop_lost",
];

pub const MODERATE_IMPACT: &[&str] = &["missense_variant", "inframe_deletion", "inframe_insertion"];

pub const LOW_IMPACT: &[&str] = &["synonymous_variant", "intron_variant", "intergenic_variant"];

/// Score assigned to a ClinVar-benign variant, which skips all other evidence
pub const BENIGN_SCORE: i64 = 1;

/// Score contribution and reason for a ClinVar class, or `None` for the benign short-circuit
fn clinvar_contribution(class: ClinicalSignificance) -> Option<(i64, &'static str)> {
    match class {
        ClinicalSignificance::Pathogenic => Some((1000, "ClinVar: PATHOGENIC")),
        ClinicalSignificance::LikelyPathogenic => Some((500, "ClinVar: Likely Pathogenic")),
        ClinicalSignificance::UncertainSignificance => Some((50, "ClinVar: VUS (uncertain)")),
        ClinicalSignificance::LikelyBenign => Some((5, "ClinVar: Likely Benign")),
        ClinicalSignificance::Benign => None,
    }
}

/// Matching terms from `set`, sorted, or `None` if nothing matches
fn impact_matches(consequences: &BTreeSet<String>, set: &[&str]) -> Option<String> {
    let matched: Vec<&str> = consequences
        .iter()
        .map(String::as_str)
        .filter(|term| set.contains(term))
        .collect();
    (!matched.is_empty()).then(|| matched.join(", "))
}

fn consequence_contribution(consequences: &BTreeSet<String>) -> (i64, String) {
    if let Some(terms) = impact_matches(consequences, HIGH_IMPACT) {
        (100, format!("High impact: {terms}"))
    } else if let Some(terms) = impact_matches(consequences, MODERATE_IMPACT) {
        (50, format!("Moderate impact: {terms}"))
    } else if let Some(terms) = impact_matches(consequences, LOW_IMPACT) {
        (5, format!("Low impact: {terms}"))
    } else {
        (1, "No coding consequence".to_string())
    }
}

fn frequency_contribution(af: Option<f64>) -> (i64, String) {
    match af {
        None => (0, "No frequency data".to_string()),
        Some(af) if af == 0.0 => (30, "Absent in gnomAD (AF=0)".to_string()),
        Some(af) if af < 0.0001 => (20, format!("Ultra-rare (AF={af:.6})")),
        Some(af) if af < 0.001 => (10, format!("Very rare (AF={af:.4})")),
        Some(af) if af < 0.01 => (5, format!("Rare (AF={af:.3})")),
        Some(af) => (-20, format!("Common variant (AF={:.2}%)", af * 100.0)),
    }
}

/// Score one annotation.
///
/// Evidence is applied in a fixed order, each step adding one reason: ClinVar class,
/// functional consequence, population frequency, gene presence. A benign ClinVar class ends
/// scoring immediately with score 1 and tier low.
#[must_use]
pub fn score(annotation: AnnotationResult) -> PriorityResult {
    let mut consequences = BTreeSet::new();
    let mut genes = BTreeSet::new();
    for tc in &annotation.transcript_consequences {
        consequences.extend(tc.consequence_terms.iter().cloned());
        if let Some(gene) = tc.gene_symbol.as_ref().filter(|g| !g.is_empty()) {
            genes.insert(gene.clone());
        }
    }

    let clinvar = clinical_significance(&annotation);
    let gnomad_af = population_frequency(&annotation);

    let mut total = 0i64;
    let mut reasons = Vec::new();

    if let Some(class) = clinvar {
        match clinvar_contribution(class) {
            Some((points, reason)) => {
                total += points;
                reasons.push(reason.to_string());
            }
            None => {
                return build(
                    annotation,
                    genes,
                    clinvar,
                    gnomad_af,
                    BENIGN_SCORE,
                    Tier::Low,
                    vec!["ClinVar: Benign".to_string()],
                );
            }
        }
    }

    let (points, reason) = consequence_contribution(&consequences);
    total += points;
    reasons.push(reason);

    let (points, reason) = frequency_contribution(gnomad_af);
    total += points;
    reasons.push(reason);

    if genes.is_empty() {
        total -= 10;
        reasons.push("Intergenic (no gene)".to_string());
    } else {
        let names: Vec<&str> = genes.iter().map(String::as_str).collect();
        reasons.push(format!("Gene(s): {}", names.join(", ")));
    }

    build(
        annotation,
        genes,
        clinvar,
        gnomad_af,
        total,
        Tier::from_score(total),
        reasons,
    )
}

fn build(
    annotation: AnnotationResult,
    genes: BTreeSet<String>,
    clinvar: Option<ClinicalSignificance>,
    gnomad_af: Option<f64>,
    score: i64,
    tier: Tier,
    reasons: Vec<String>,
) -> PriorityResult {
    let location = annotation.location();
    PriorityResult {
        variant_id: annotation.variant_id,
        rsid: annotation.origin_identifier,
        location,
        consequence: annotation
            .most_severe_consequence
            .unwrap_or_else(|| "unknown".to_string()),
        genes,
        clinvar,
        gnomad_af,
        score,
        tier,
        reasons,
    }
}

/// Score every annotation and sort by descending score; ties keep input order.
#[must_use]
pub fn rank(annotations: Vec<AnnotationResult>) -> Vec<PriorityResult> {
    let mut results: Vec<PriorityResult> = annotations.into_iter().map(score).collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));
    results
}
