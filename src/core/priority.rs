use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::types::{ClinicalSignificance, Tier};

/// Final prioritization of one annotated variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityResult {
    /// Identifier assigned by the annotation service
    pub variant_id: Option<String>,

    /// Identifier of the originating input record
    pub rsid: Option<String>,

    /// `chrom:pos`
    pub location: String,

    /// Most severe consequence, `unknown` when the service reported none
    pub consequence: String,

    /// Gene symbols across all transcript consequences
    pub genes: BTreeSet<String>,

    pub clinvar: Option<ClinicalSignificance>,

    /// gnomAD allele frequency in [0, 1]; `None` means no data, not zero
    pub gnomad_af: Option<f64>,

    pub score: i64,

    pub tier: Tier,

    /// Human-readable scoring narrative, in evaluation order
    pub reasons: Vec<String>,
}

impl PriorityResult {
    /// Display label: service identifier, falling back to location
    #[must_use]
    pub fn label(&self) -> &str {
        self.variant_id.as_deref().unwrap_or(&self.location)
    }
}
