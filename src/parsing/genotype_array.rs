//! Parser for genotype-array raw data exports (23andMe format).
//!
//! ```text
//! # rsid	chromosome	position	genotype
//! rs548049170	1	69869	TT
//! i7001348	1	69870	GG
//! ```
//!
//! These files carry the subject's genotype but no reference allele, so every row becomes an
//! identifier-only record and is positioned later by the resolver. Chromosome and genotype are
//! kept as side metadata.

use tracing::debug;

use crate::core::variant::{ArrayCall, IdentifierVariant, VariantRecord};
use crate::parsing::{ensure_capacity, ParseError};
use crate::utils::validation::is_stable_identifier;

/// Parse genotype-array export text
///
/// # Errors
///
/// Returns `ParseError::TooManyVariants` if more than `limit` rs rows are present.
pub fn parse_genotype_array_text(
    text: &str,
    limit: usize,
) -> Result<Vec<VariantRecord>, ParseError> {
    let mut records = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = stripped.split('\t').collect();
        if fields.len() < 4 {
            debug!(line = i + 1, "Skipping genotype row with fewer than 4 fields");
            continue;
        }

        let rsid = fields[0].trim();
        // Internal array identifiers (e.g. i7001348) cannot be resolved
        if !is_stable_identifier(rsid) {
            debug!(line = i + 1, id = rsid, "Skipping non-rs identifier");
            continue;
        }

        ensure_capacity(records.len(), limit)?;

        records.push(VariantRecord::IdentifierOnly(IdentifierVariant {
            rsid: rsid.to_string(),
            array_call: Some(ArrayCall {
                chrom: fields[1].trim().to_string(),
                genotype: fields[3].trim().to_string(),
            }),
        }));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::VariantKind;

    #[test]
    fn test_parse_genotype_array() {
        let text = "# rsid\tchromosome\tposition\tgenotype\nrs548049170\t1\t69869\tTT\n";
        let records = parse_genotype_array_text(text, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), VariantKind::IdentifierOnly);
        assert_eq!(records[0].rsid(), Some("rs548049170"));

        let VariantRecord::IdentifierOnly(ident) = &records[0] else {
            panic!("expected identifier-only record");
        };
        let call = ident.array_call.as_ref().unwrap();
        assert_eq!(call.chrom, "1");
        assert_eq!(call.genotype, "TT");
    }

    #[test]
    fn test_internal_identifiers_are_skipped() {
        let text = "# rsid\tchromosome\tposition\tgenotype\n\
i7001348\t1\t69870\tGG\n\
rs9283150\t1\t565508\tAA\n";
        let records = parse_genotype_array_text(text, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rsid(), Some("rs9283150"));
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let text = "rs1\t1\t100\nrs2\t1\t200\tCC\n\n";
        let records = parse_genotype_array_text(text, 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rsid(), Some("rs2"));
    }

    #[test]
    fn test_limit_ignores_skipped_rows() {
        let text = "# rsid\tchromosome\tposition\tgenotype\n\
i1\t1\t1\tAA\n\
rs1\t1\t2\tAA\n\
i2\t1\t3\tAA\n\
rs2\t1\t4\tCC\n";
        assert_eq!(parse_genotype_array_text(text, 2).unwrap().len(), 2);
        assert!(matches!(
            parse_genotype_array_text(text, 1),
            Err(ParseError::TooManyVariants(1))
        ));
    }
}
