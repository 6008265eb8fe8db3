//! Coordinate resolution for identifier-only records.
//!
//! Resolution is best effort: an identifier that cannot be placed is reported back as
//! unresolved, never retried.

use tracing::{debug, warn};

use crate::core::variant::{GenomicVariant, IdentifierVariant};
use crate::ensembl::{Mapping, VariationLookup};

/// Outcome of resolving a batch of identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Coordinate variants in input order, one per alternate allele
    pub resolved: Vec<GenomicVariant>,
    /// Identifiers that could not be placed, in input order
    pub unresolved: Vec<String>,
}

/// Expand the first mapping's `ref/alt1/alt2/...` allele string into coordinate variants.
///
/// Returns `None` if the allele string has fewer than two alleles or no non-empty alternate.
#[must_use]
pub fn expand_mapping(identifier: &str, mapping: &Mapping) -> Option<Vec<GenomicVariant>> {
    let alleles: Vec<&str> = mapping.allele_string.split('/').collect();
    if alleles.len() < 2 {
        return None;
    }

    let reference = alleles[0];
    let variants: Vec<GenomicVariant> = alleles[1..]
        .iter()
        .filter(|alt| !alt.is_empty())
        .map(|alt| {
            GenomicVariant::new(&mapping.seq_region_name, mapping.start, reference, *alt)
                .with_rsid(Some(identifier.to_string()))
        })
        .collect();

    (!variants.is_empty()).then_some(variants)
}

/// Resolve one identifier to coordinate variants.
///
/// Only the first listed mapping is used. Returns `None` when the lookup errors, lists no
/// mappings, or the allele string cannot be expanded.
pub async fn resolve<L: VariationLookup + ?Sized>(
    lookup: &L,
    identifier: &str,
) -> Option<Vec<GenomicVariant>> {
    let mappings = match lookup.lookup(identifier).await {
        Ok(mappings) => mappings,
        Err(e) => {
            warn!(identifier, error = %e, "Identifier lookup failed");
            return None;
        }
    };

    let Some(mapping) = mappings.first() else {
        debug!(identifier, "No mappings returned");
        return None;
    };

    let expanded = expand_mapping(identifier, mapping);
    if expanded.is_none() {
        debug!(identifier, allele_string = %mapping.allele_string, "Unusable allele string");
    }
    expanded
}

/// Resolve identifiers sequentially, reporting `(current, total)` after each one
pub async fn resolve_all<L, F>(
    lookup: &L,
    identifiers: &[IdentifierVariant],
    mut progress: F,
) -> Resolution
where
    L: VariationLookup + ?Sized,
    F: FnMut(usize, usize),
{
    let mut resolution = Resolution::default();
    let total = identifiers.len();

    for (i, ident) in identifiers.iter().enumerate() {
        match resolve(lookup, &ident.rsid).await {
            Some(variants) => resolution.resolved.extend(variants),
            None => resolution.unresolved.push(ident.rsid.clone()),
        }
        progress(i + 1, total);
    }

    if !resolution.unresolved.is_empty() {
        warn!(
            count = resolution.unresolved.len(),
            "Some identifiers could not be resolved"
        );
    }

    resolution
}
