//! VCF parsing using noodles.
//!
//! Each (record, alternate allele) pair becomes one coordinate record. Gzip and bgzip input
//! is recognised by its magic bytes and decompressed transparently.

use std::io::{BufRead, BufReader, ErrorKind};

use flate2::read::MultiGzDecoder;
use noodles::vcf;
use noodles::vcf::variant::record::{AlternateBases, Ids};
use tracing::warn;

use crate::core::variant::VariantRecord;
use crate::parsing::{ensure_capacity, ParseError};
use crate::utils::validation::is_gzip;

/// Parse VCF content (plain or gzip-compressed)
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if the header is unreadable or a record cannot be read,
/// or `ParseError::TooManyVariants` past `limit` (position, allele) records.
pub fn parse_vcf_bytes(content: &[u8], limit: usize) -> Result<Vec<VariantRecord>, ParseError> {
    if is_gzip(content) {
        parse_vcf_reader(BufReader::new(MultiGzDecoder::new(content)), limit)
    } else {
        parse_vcf_reader(content, limit)
    }
}

/// Parse VCF from a buffered reader
///
/// # Errors
///
/// See [`parse_vcf_bytes`].
pub fn parse_vcf_reader<R: BufRead>(
    reader: R,
    limit: usize,
) -> Result<Vec<VariantRecord>, ParseError> {
    let mut reader = vcf::io::Reader::new(reader);
    let header = reader
        .read_header()
        .map_err(|e| ParseError::MalformedInput(format!("Failed to parse VCF header: {e}")))?;

    let mut records = Vec::new();
    let mut record = vcf::variant::RecordBuf::default();
    let mut line = 0usize;

    loop {
        line += 1;
        match reader.read_record_buf(&header, &mut record) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(record = line, error = %e, "Skipping unreadable VCF record");
                continue;
            }
            Err(e) => {
                return Err(ParseError::MalformedInput(format!(
                    "Failed to read VCF record {line}: {e}"
                )));
            }
        }

        let Some(pos) = record.variant_start().map(|p| p.get() as u64) else {
            warn!(record = line, "Skipping VCF record without a position");
            continue;
        };

        let chrom = record.reference_sequence_name().to_string();
        let reference = record.reference_bases().to_string();
        let rsid = {
            let ids = record.ids();
            if ids.is_empty() {
                None
            } else {
                Some(
                    ids.iter()
                        .map(|id| id.to_string())
                        .collect::<Vec<_>>()
                        .join(";"),
                )
            }
        };

        for allele in record.alternate_bases().iter() {
            let allele = allele.map_err(|e| {
                ParseError::MalformedInput(format!("Invalid ALT in VCF record {line}: {e}"))
            })?;
            if allele.is_empty() || allele == "." {
                continue;
            }

            ensure_capacity(records.len(), limit)?;

            records.push(VariantRecord::coordinate(
                chrom.clone(),
                pos,
                reference.clone(),
                allele,
                rsid.clone(),
            ));
        }
    }

    Ok(records)
}
