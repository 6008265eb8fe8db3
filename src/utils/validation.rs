//! Input hygiene for variant files: filename checks, text sniffing and batch limits.
//!
//! Every file handed to [`crate::parsing`] by the CLI passes through [`validate_upload`] first.

/// Default cap on variant records parsed from one file.
///
/// Large enough for a full genotype-array export (roughly 600k to 1M rs rows).
pub const MAX_VARIANTS: usize = 2_000_000;

/// Longest accepted input filename, in bytes
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Extensions that may appear on a filename that otherwise looks hidden (e.g. `.vcf`)
const INPUT_EXTENSIONS: [&str; 6] = [".vcf", ".vcf.gz", ".vcf.bgz", ".txt", ".csv", ".tsv"];

/// Fraction of control bytes (1 in N) tolerated in text input longer than 100 bytes
const CONTROL_BYTE_RATIO: usize = 20;

/// Check whether an identifier is a stable dbSNP-style identifier (`rs` prefix, any case).
///
/// Genotype-array exports also contain internal identifiers such as `i7001348`,
/// which the resolution service cannot map.
///
/// # Examples
///
/// ```
/// use variant_prioritizer::utils::validation::is_stable_identifier;
///
/// assert!(is_stable_identifier("rs548049170"));
/// assert!(is_stable_identifier("RS429358"));
/// assert!(!is_stable_identifier("i7001348"));
/// ```
#[must_use]
pub fn is_stable_identifier(s: &str) -> bool {
    s.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("rs"))
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Input filename is empty")]
    EmptyFilename,
    #[error("Input filename is longer than {MAX_FILENAME_LENGTH} bytes")]
    FilenameTooLong,
    #[error("Input filename contains path separators or control characters")]
    InvalidFilename,
    #[error("Input does not look like a text variant file")]
    InvalidFileContent,
}

/// Validate an input filename and return its sanitized form.
///
/// Path separators, `..`, NUL and control characters are rejected outright. Anything else
/// outside `[A-Za-z0-9._- ]` is dropped. A name left starting with `.` is only accepted when
/// it ends in a supported input extension.
///
/// # Errors
///
/// Returns `ValidationError::EmptyFilename` for a blank name,
/// `ValidationError::FilenameTooLong` past [`MAX_FILENAME_LENGTH`], and
/// `ValidationError::InvalidFilename` for anything unsafe.
pub fn validate_filename(filename: &str) -> Result<String, ValidationError> {
    if filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename);
    }
    if filename.len() > MAX_FILENAME_LENGTH {
        return Err(ValidationError::FilenameTooLong);
    }

    let escapes_directory = filename.contains("..") || filename.contains(['/', '\\']);
    if escapes_directory || filename.chars().any(|c| c.is_ascii_control()) {
        return Err(ValidationError::InvalidFilename);
    }

    let mut sanitized = filename.to_string();
    sanitized.retain(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' '));

    let looks_hidden = sanitized.starts_with('.') && !is_input_extension(&sanitized);
    if sanitized.trim().is_empty() || looks_hidden {
        return Err(ValidationError::InvalidFilename);
    }

    Ok(sanitized)
}

fn is_input_extension(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    INPUT_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Check that uncompressed input is UTF-8 text and not a binary blob.
///
/// Empty input is valid text; it parses to an empty batch.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFileContent` for invalid UTF-8, or input longer than
/// 100 bytes where more than 5% of bytes are control characters.
pub fn validate_text_content(content: &[u8]) -> Result<(), ValidationError> {
    // Tabs, newlines and carriage returns are fine
    let control_bytes = content
        .iter()
        .filter(|&&b| b == 0x7f || (b < 0x20 && !(b'\t'..=b'\r').contains(&b)))
        .count();
    if content.len() > 100 && control_bytes > content.len() / CONTROL_BYTE_RATIO {
        return Err(ValidationError::InvalidFileContent);
    }

    std::str::from_utf8(content)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidFileContent)
}

/// Validate an input file's name and content before parsing.
///
/// Compressed VCF input is binary, so only its name is checked.
///
/// # Errors
///
/// Returns a `ValidationError` if the filename or the text content is rejected.
pub fn validate_upload(filename: &str, content: &[u8]) -> Result<String, ValidationError> {
    let sanitized = validate_filename(filename)?;
    if !is_gzip(content) {
        validate_text_content(content)?;
    }
    Ok(sanitized)
}

/// Gzip/BGZF magic bytes
#[must_use]
pub fn is_gzip(content: &[u8]) -> bool {
    content.starts_with(&[0x1f, 0x8b])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_stable_identifier() {
        assert!(is_stable_identifier("rs1"));
        assert!(is_stable_identifier("Rs12345"));
        assert!(!is_stable_identifier("i7001348"));
        assert!(!is_stable_identifier("r"));
        assert!(!is_stable_identifier(""));
        assert!(!is_stable_identifier("ésrs"));
    }

    #[test]
    fn test_accepts_variant_filenames() {
        for name in ["sample.vcf", "my-variants.csv", "genome_data.txt", "sample 123.vcf.gz"] {
            assert_eq!(validate_filename(name).unwrap(), name);
        }
    }

    #[test]
    fn test_rejects_unsafe_filenames() {
        for name in ["../ids.txt", "a\\b.csv", "ids\0.txt", "ids\x07.txt", "calls\x7f.vcf", ".profile"] {
            assert!(
                matches!(validate_filename(name), Err(ValidationError::InvalidFilename)),
                "{name:?}"
            );
        }
        assert!(matches!(validate_filename(""), Err(ValidationError::EmptyFilename)));
        assert!(matches!(
            validate_filename(&"x".repeat(MAX_FILENAME_LENGTH + 1)),
            Err(ValidationError::FilenameTooLong)
        ));
    }

    #[test]
    fn test_strips_unexpected_characters() {
        assert_eq!(validate_filename("trio(1)#.tsv").unwrap(), "trio1.tsv");
        assert_eq!(validate_filename(".vcf").unwrap(), ".vcf");
    }

    #[test]
    fn test_validate_text_content() {
        assert!(validate_text_content(b"rs1\r\nrs2\n").is_ok());
        assert!(validate_text_content(b"").is_ok());
        assert!(validate_text_content(&[0u8; 1000]).is_err());
        assert!(validate_text_content(&[0xff, 0xfe, 0x41]).is_err());

        // A few stray control bytes in a long file are tolerated
        let mut text = "rs7412\n".repeat(30).into_bytes();
        text.push(0x01);
        assert!(validate_text_content(&text).is_ok());
    }

    #[test]
    fn test_validate_upload_accepts_gzip() {
        let gz = [0x1f, 0x8b, 0x08, 0x00, 0x00];
        assert_eq!(validate_upload("calls.vcf.gz", &gz).unwrap(), "calls.vcf.gz");
        assert!(validate_upload("../calls.vcf.gz", &gz).is_err());
        assert!(validate_upload("ids.txt", &[0u8; 200]).is_err());
    }
}
