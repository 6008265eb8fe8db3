//! Batch summaries and the flattened export projection.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::core::priority::PriorityResult;
use crate::core::types::Tier;

/// Result counts per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl TierSummary {
    #[must_use]
    pub fn from_results(results: &[PriorityResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.tier {
                Tier::Critical => summary.critical += 1,
                Tier::High => summary.high += 1,
                Tier::Medium => summary.medium += 1,
                Tier::Low => summary.low += 1,
            }
        }
        summary
    }

    #[must_use]
    pub fn count(&self, tier: Tier) -> usize {
        match tier {
            Tier::Critical => self.critical,
            Tier::High => self.high,
            Tier::Medium => self.medium,
            Tier::Low => self.low,
        }
    }
}

/// One row of the tabular export; absent values are empty cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Variant ID")]
    pub variant_id: String,
    #[serde(rename = "rsID")]
    pub rsid: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Consequence")]
    pub consequence: String,
    #[serde(rename = "Genes")]
    pub genes: String,
    #[serde(rename = "ClinVar")]
    pub clinvar: String,
    #[serde(rename = "gnomAD AF")]
    pub gnomad_af: String,
    #[serde(rename = "Score")]
    pub score: i64,
    #[serde(rename = "Tier")]
    pub tier: String,
    #[serde(rename = "Reasons")]
    pub reasons: String,
}

impl From<&PriorityResult> for ExportRow {
    fn from(result: &PriorityResult) -> Self {
        Self {
            variant_id: result.variant_id.clone().unwrap_or_default(),
            rsid: result.rsid.clone().unwrap_or_default(),
            location: result.location.clone(),
            consequence: result.consequence.clone(),
            genes: result
                .genes
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            clinvar: result
                .clinvar
                .map(|c| c.as_str().to_string())
                .unwrap_or_default(),
            gnomad_af: result.gnomad_af.map(|af| af.to_string()).unwrap_or_default(),
            score: result.score,
            tier: result.tier.as_str().to_string(),
            reasons: result.reasons.join(" | "),
        }
    }
}

#[must_use]
pub fn export_rows(results: &[PriorityResult]) -> Vec<ExportRow> {
    results.iter().map(ExportRow::from).collect()
}

/// Write the export projection with a header row
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_delimited<W: Write>(
    results: &[PriorityResult],
    writer: W,
    delimiter: u8,
) -> Result<(), csv::Error> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for row in export_rows(results) {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}
