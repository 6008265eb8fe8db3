use serde::{Deserialize, Serialize};

/// ClinVar clinical significance, in descending priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalSignificance {
    Pathogenic,
    LikelyPathogenic,
    UncertainSignificance,
    LikelyBenign,
    Benign,
}

impl ClinicalSignificance {
    /// All classifications, highest priority first
    pub const PRIORITY: [Self; 5] = [
        Self::Pathogenic,
        Self::LikelyPathogenic,
        Self::UncertainSignificance,
        Self::LikelyBenign,
        Self::Benign,
    ];

    /// The term used for this classification in annotation payloads
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pathogenic => "pathogenic",
            Self::LikelyPathogenic => "likely_pathogenic",
            Self::UncertainSignificance => "uncertain_significance",
            Self::LikelyBenign => "likely_benign",
            Self::Benign => "benign",
        }
    }
}

impl std::fmt::Display for ClinicalSignificance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clinical priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Medium,
    High,
    Critical,
}

impl Tier {
    /// All tiers, most urgent first
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Tier thresholds are inclusive lower bounds.
    #[must_use]
    pub fn from_score(score: i64) -> Self {
        if score >= 500 {
            Self::Critical
        } else if score >= 100 {
            Self::High
        } else if score >= 30 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
