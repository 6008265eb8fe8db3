//! Parsers turning variant files into [`VariantRecord`]s.
//!
//! This module provides parsers for:
//!
//! - **VCF files**: One coordinate record per (position, alternate allele), plain or gzip-compressed
//! - **rsID lists**: One identifier per non-blank line
//! - **Genotype-array exports**: 23andMe-style raw data, tab-separated `rsid chromosome position genotype`
//! - **Delimited tables**: CSV/TSV with `chrom`, `pos`, `ref`, `alt` and/or `rsid` columns
//!
//! The format is chosen by [`detection::detect_format`] from the filename and, for `.txt`
//! files, a look at the content.
//!
//! ## Example
//!
//! ```rust
//! use variant_prioritizer::parsing::parse_input;
//! use variant_prioritizer::core::variant::VariantKind;
//!
//! let records = parse_input("variants.txt", b"rs7412\nrs429358\n", 1_000).unwrap();
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].kind(), VariantKind::IdentifierOnly);
//! ```
//!
//! ## Leniency
//!
//! Rows that cannot yield a valid record are skipped, never partially emitted. Only a file
//! that cannot be read as its format at all fails with [`ParseError::MalformedInput`].
//!
//! [`VariantRecord`]: crate::core::variant::VariantRecord

use thiserror::Error;

use crate::core::variant::VariantRecord;

pub mod delimited;
pub mod detection;
pub mod genotype_array;
pub mod rsid_list;
pub mod vcf;

pub use detection::{detect_format, InputFormat};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Holds the limit that was exceeded
    #[error("Too many variants: more than {0} records")]
    TooManyVariants(usize),
}

/// Refuse another record once `count` records already fill `limit`.
pub(crate) fn ensure_capacity(count: usize, limit: usize) -> Result<(), ParseError> {
    if count >= limit {
        Err(ParseError::TooManyVariants(limit))
    } else {
        Ok(())
    }
}

/// Detect the format of `content` from `filename` and parse at most `limit` records.
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` for unrecognised extensions,
/// `ParseError::MalformedInput` if the content cannot be read as the detected format,
/// or `ParseError::TooManyVariants` if the file holds more than `limit` records.
pub fn parse_input(
    filename: &str,
    content: &[u8],
    limit: usize,
) -> Result<Vec<VariantRecord>, ParseError> {
    let format = detect_format(filename, content)?;
    tracing::debug!(filename, format = %format, "Detected input format");
    parse_with_format(content, format, limit)
}

/// Parse content with the specified format
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if the content cannot be read as `format`,
/// or `ParseError::TooManyVariants` if it holds more than `limit` records.
pub fn parse_with_format(
    content: &[u8],
    format: InputFormat,
    limit: usize,
) -> Result<Vec<VariantRecord>, ParseError> {
    match format {
        InputFormat::Vcf => vcf::parse_vcf_bytes(content, limit),
        InputFormat::RsidList => {
            rsid_list::parse_rsid_list_text(as_text(content, format)?, limit)
        }
        InputFormat::GenotypeArray => {
            genotype_array::parse_genotype_array_text(as_text(content, format)?, limit)
        }
        InputFormat::Delimited(delimiter) => {
            delimited::parse_delimited_bytes(content, delimiter, limit)
        }
    }
}

fn as_text(content: &[u8], format: InputFormat) -> Result<&str, ParseError> {
    std::str::from_utf8(content).map_err(|e| {
        ParseError::MalformedInput(format!("{format} content is not valid UTF-8: {e}"))
    })
}
