//! External services: identifier lookup and functional-effect prediction.
//!
//! Both services are modelled as traits so the resolver, annotator and pipeline can run
//! against the Ensembl REST client ([`client::EnsemblClient`]) or an in-memory fake.
//!
//! - [`resolver`]: identifier-only records to coordinate variants
//! - [`annotator`]: coordinate variants to annotation payloads, one region query at a time

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::annotation::AnnotationResult;

pub mod annotator;
pub mod client;
pub mod resolver;

pub use annotator::{annotate, AnnotationOutcome};
pub use client::EnsemblClient;
pub use resolver::{resolve, resolve_all, Resolution};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("Annotation failed for variant {region}: {message}")]
    AnnotationFailed { region: String, message: String },
}

/// One genomic placement of an identifier, as listed by the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub seq_region_name: String,
    pub start: u64,
    #[serde(default)]
    pub allele_string: String,
}

/// Maps a stable identifier to its genomic placements, in service-listed order
#[async_trait]
pub trait VariationLookup: Send + Sync {
    async fn lookup(&self, identifier: &str) -> Result<Vec<Mapping>, ServiceError>;
}

/// Predicts the functional effect of a single-allele region query
#[async_trait]
pub trait EffectPredictor: Send + Sync {
    /// `region` has the form `{chrom}:{start}-{end}:{strand}/{alt}`
    async fn predict(&self, region: &str) -> Result<Vec<AnnotationResult>, ServiceError>;
}
