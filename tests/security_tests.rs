//! Input hardening tests
//!
//! Variant files arrive from users and are read whole into memory, so every input path
//! must reject hostile filenames, binary payloads and oversized batches before any
//! network call is made.

use variant_prioritizer::parsing::{parse_input, ParseError};
use variant_prioritizer::utils::validation::{
    validate_filename, validate_text_content, validate_upload, ValidationError, MAX_VARIANTS,
};

/// Test filename validation and sanitization
#[test]
fn test_filename_validation_security() {
    // Test directory traversal prevention
    let traversal_attempts = vec![
        "../etc/passwd",
        "..\\windows\\system32",
        "variants/../../secret.vcf",
        "..\\..\\..\\windows\\system.ini",
    ];

    for attempt in traversal_attempts {
        match validate_filename(attempt) {
            Err(ValidationError::InvalidFilename) => {}
            Ok(_) => panic!("Directory traversal attempt '{attempt}' should have been blocked"),
            Err(e) => panic!("Unexpected error for '{attempt}': {e:?}"),
        }
    }

    // Test null byte and control character injection
    for attempt in ["ids\0.txt", "calls.vcf\0", "file\x1f.csv", "name\x0b.tsv"] {
        assert!(
            validate_filename(attempt).is_err(),
            "Injection attempt '{attempt:?}' should be blocked"
        );
    }

    // Test valid filenames are accepted and properly sanitized
    let valid_tests = vec![
        ("sample.vcf.gz", "sample.vcf.gz"),
        ("my-variants_123.csv", "my-variants_123.csv"),
        ("genome@#$%data.txt", "genomedata.txt"),
        ("trio 42.tsv", "trio 42.tsv"),
        (".vcf", ".vcf"),
    ];

    for (input, expected) in valid_tests {
        match validate_filename(input) {
            Ok(sanitized) => assert_eq!(sanitized, expected, "Sanitization failed for '{input}'"),
            Err(e) => panic!("Valid filename '{input}' should be accepted: {e:?}"),
        }
    }

    assert!(matches!(validate_filename("   "), Err(ValidationError::EmptyFilename)));
    assert!(matches!(
        validate_filename(&"a".repeat(300)),
        Err(ValidationError::FilenameTooLong)
    ));
    assert!(validate_filename(".bashrc").is_err());
}

/// Test content integrity validation
#[test]
fn test_content_integrity_validation() {
    assert!(validate_text_content(b"rs7412\nrs429358\n").is_ok());

    // Mostly binary payloads are rejected
    let mut binary = vec![0u8; 500];
    binary.extend_from_slice(b"rs7412\n");
    assert!(validate_text_content(&binary).is_err());

    // Invalid UTF-8
    assert!(validate_text_content(b"rs7412\n\xff\xfe\n").is_err());
}

/// Test comprehensive upload validation
#[test]
fn test_comprehensive_upload_validation() {
    let result = validate_upload("ids.txt", b"rs7412\n");
    assert_eq!(result.unwrap(), "ids.txt");

    assert!(validate_upload("../ids.txt", b"rs7412\n").is_err());
    assert!(validate_upload("ids.txt", &[0u8; 200]).is_err());

    // Gzip content skips the text checks
    let gzip_magic = [0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00];
    assert!(validate_upload("calls.vcf.gz", &gzip_magic).is_ok());
}

/// Test that oversized batches are refused during parsing
#[test]
fn test_variant_count_limit() {
    let content: String = (0..=50).map(|i| format!("rs{i}\n")).collect();

    match parse_input("ids.txt", content.as_bytes(), 50) {
        Err(ParseError::TooManyVariants(limit)) => assert_eq!(limit, 50),
        other => panic!("expected the variant limit to trip, got {other:?}"),
    }

    // Exactly at the limit is fine
    assert_eq!(parse_input("ids.txt", content.as_bytes(), 51).unwrap().len(), 51);

    // The default admits a full genotype-array export
    assert!(MAX_VARIANTS >= 1_000_000);
}

/// Test that empty text uploads are accepted and parse to nothing
#[test]
fn test_empty_text_upload() {
    for name in ["ids.txt", "table.csv", "table.tsv"] {
        assert!(validate_upload(name, b"").is_ok());
        assert!(parse_input(name, b"", MAX_VARIANTS).unwrap().is_empty());
    }
}

/// Test that unsupported or hostile inputs fail cleanly instead of panicking
#[test]
fn test_hostile_input_fails_cleanly() {
    let garbage = "\x00\x01\x02\x03 not a table";

    assert!(matches!(
        parse_input("payload.exe", garbage.as_bytes(), MAX_VARIANTS),
        Err(ParseError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        parse_input("noextension", b"rs1\n", MAX_VARIANTS),
        Err(ParseError::UnsupportedFormat(_))
    ));
    assert!(parse_input("variants.vcf.gz", b"\x1f\x8b\x08\x00broken", MAX_VARIANTS).is_err());
    assert!(matches!(
        parse_input("table.csv", b"foo,bar\n1,2\n", MAX_VARIANTS),
        Err(ParseError::MalformedInput(_))
    ));
}
