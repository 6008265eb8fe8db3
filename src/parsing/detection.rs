use std::ffi::OsStr;
use std::path::Path;

use crate::parsing::ParseError;
use crate::utils::validation::is_stable_identifier;

/// Supported variant input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// VCF, plain or gzip/bgzip compressed
    Vcf,
    /// One identifier per line
    RsidList,
    /// Genotype-array raw data export (23andMe style)
    GenotypeArray,
    /// Delimited table with a header row; holds the delimiter byte
    Delimited(u8),
}

impl InputFormat {
    /// Get the display name for this format
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            InputFormat::Vcf => "VCF File",
            InputFormat::RsidList => "rsID List",
            InputFormat::GenotypeArray => "Genotype Array Export",
            InputFormat::Delimited(b'\t') => "TSV Table",
            InputFormat::Delimited(_) => "CSV Table",
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Detect input format from the filename, sniffing content only to disambiguate `.txt`.
///
/// # Errors
///
/// Returns `ParseError::UnsupportedFormat` if the extension is missing or unrecognised.
pub fn detect_format(filename: &str, content: &[u8]) -> Result<InputFormat, ParseError> {
    let lower_name = filename.to_lowercase();

    // Check for compressed formats first (multi-extension patterns)
    if lower_name.ends_with(".vcf.gz") || lower_name.ends_with(".vcf.bgz") {
        return Ok(InputFormat::Vcf);
    }

    let extension = Path::new(&lower_name)
        .extension()
        .and_then(OsStr::to_str)
        .ok_or_else(|| ParseError::UnsupportedFormat(format!("no extension on '{filename}'")))?;

    match extension {
        "vcf" => Ok(InputFormat::Vcf),
        "csv" => Ok(InputFormat::Delimited(b',')),
        "tsv" => Ok(InputFormat::Delimited(b'\t')),
        "txt" => {
            let text = String::from_utf8_lossy(content);
            if looks_like_genotype_array(&text) {
                Ok(InputFormat::GenotypeArray)
            } else {
                Ok(InputFormat::RsidList)
            }
        }
        other => Err(ParseError::UnsupportedFormat(format!(".{other}"))),
    }
}

/// Decide whether `.txt` content is a genotype-array export rather than a plain rsID list.
///
/// Leading `#` lines are scanned for the `rsid` column-header signature. Otherwise the
/// first data line decides: at least four tab-separated fields with an rs-style first field.
#[must_use]
pub fn looks_like_genotype_array(text: &str) -> bool {
    for line in text.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }

        if let Some(comment) = stripped.strip_prefix('#') {
            if comment.trim_start().to_lowercase().starts_with("rsid") {
                return true;
            }
            continue;
        }

        let fields: Vec<&str> = stripped.split('\t').collect();
        return fields.len() >= 4 && is_stable_identifier(fields[0]);
    }

    false
}
