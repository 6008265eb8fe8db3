//! Core data types for variant prioritization.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`VariantRecord`]: A parsed input variant, either positioned or identifier-only
//! - [`GenomicVariant`]: Chromosome, position, reference and alternate allele
//! - [`AnnotationResult`]: One functional-annotation service response entry
//! - [`PriorityResult`]: Score, tier and scoring narrative for one variant
//! - [`ClinicalSignificance`], [`Tier`]: Classification types
//!
//! ## Record kinds
//!
//! | Kind | Source formats | Needs resolution |
//! |------|----------------|------------------|
//! | Coordinate | VCF, delimited with chrom/pos/ref/alt | No |
//! | Identifier-only | rsID lists, genotype-array exports, delimited with rsid only | Yes |
//!
//! [`VariantRecord`]: variant::VariantRecord
//! [`GenomicVariant`]: variant::GenomicVariant
//! [`AnnotationResult`]: annotation::AnnotationResult
//! [`PriorityResult`]: priority::PriorityResult
//! [`ClinicalSignificance`]: types::ClinicalSignificance
//! [`Tier`]: types::Tier

pub mod annotation;
pub mod priority;
pub mod types;
pub mod variant;
