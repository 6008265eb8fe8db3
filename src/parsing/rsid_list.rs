use crate::core::variant::VariantRecord;
use crate::parsing::{ensure_capacity, ParseError};

/// Parse a plain identifier list: one identifier-only record per non-blank line.
///
/// Identifier syntax is not validated here; unknown identifiers fail later at resolution.
///
/// # Errors
///
/// Returns `ParseError::TooManyVariants` if there are more than `limit` identifiers.
pub fn parse_rsid_list_text(text: &str, limit: usize) -> Result<Vec<VariantRecord>, ParseError> {
    let mut records = Vec::new();

    for line in text.lines() {
        let rsid = line.trim();
        if rsid.is_empty() {
            continue;
        }

        ensure_capacity(records.len(), limit)?;
        records.push(VariantRecord::identifier(rsid));
    }

    Ok(records)
}
