//! Clinical-priority scoring.
//!
//! Three independent evidence signals are combined into one explainable score:
//!
//! | Evidence | Contribution |
//! |----------|--------------|
//! | ClinVar class | pathogenic +1000, likely pathogenic +500, uncertain +50, likely benign +5; benign ends scoring at 1 |
//! | Consequence | high impact +100, moderate +50, low +5, otherwise +1 |
//! | gnomAD AF | 0 → +30, <0.0001 → +20, <0.001 → +10, <0.01 → +5, common → −20, missing → 0 |
//! | Genes | none → −10 |
//!
//! Tiers: `>= 500` critical, `>= 100` high, `>= 30` medium, otherwise low.

pub mod evidence;
pub mod scorer;

pub use evidence::{clinical_significance, population_frequency};
pub use scorer::{rank, score};
