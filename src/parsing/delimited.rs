use tracing::debug;

use crate::core::variant::VariantRecord;
use crate::parsing::{ensure_capacity, ParseError};

/// Column positions resolved from the header row
#[derive(Debug, Default)]
struct Columns {
    chrom: Option<usize>,
    pos: Option<usize>,
    reference: Option<usize>,
    alternate: Option<usize>,
    rsid: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Self {
        let mut columns = Self::default();
        for (i, name) in header.iter().enumerate() {
            let slot = match name.trim().to_lowercase().as_str() {
                "chrom" => &mut columns.chrom,
                "pos" => &mut columns.pos,
                "ref" => &mut columns.reference,
                "alt" => &mut columns.alternate,
                "rsid" => &mut columns.rsid,
                _ => continue,
            };
            slot.get_or_insert(i);
        }
        columns
    }

    fn is_usable(&self) -> bool {
        (self.chrom.is_some() && self.pos.is_some()) || self.rsid.is_some()
    }
}

fn field<'a>(record: &'a csv::StringRecord, column: Option<usize>) -> Option<&'a str> {
    column
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Parse a delimited table with a header row naming `chrom`, `pos`, `ref`, `alt` and `rsid`.
///
/// A row with all four coordinate fields becomes a coordinate record. Otherwise a row with
/// an identifier becomes identifier-only and any partial coordinates are dropped. Rows with
/// neither, or with a non-numeric position, are skipped. A blank file is an empty batch.
///
/// # Errors
///
/// Returns `ParseError::MalformedInput` if the header is unreadable or names neither
/// `chrom`+`pos` nor `rsid`, or `ParseError::TooManyVariants` past `limit` records.
pub fn parse_delimited_bytes(
    content: &[u8],
    delimiter: u8,
    limit: usize,
) -> Result<Vec<VariantRecord>, ParseError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content);

    let header = reader
        .headers()
        .map_err(|e| ParseError::MalformedInput(format!("Failed to read header row: {e}")))?
        .clone();
    let columns = Columns::from_header(&header);
    if !columns.is_usable() {
        return Err(ParseError::MalformedInput(
            "Header must name chrom and pos columns, or an rsid column".to_string(),
        ));
    }

    let mut records = Vec::new();

    for (i, row) in reader.records().enumerate() {
        // Header is line 1
        let line_num = i + 2;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                debug!(line = line_num, error = %e, "Skipping unreadable row");
                continue;
            }
        };

        let rsid = field(&row, columns.rsid);
        let coordinates = (
            field(&row, columns.chrom),
            field(&row, columns.pos),
            field(&row, columns.reference),
            field(&row, columns.alternate),
        );

        let record = match coordinates {
            (Some(chrom), Some(pos), Some(reference), Some(alternate)) => {
                let Ok(pos) = pos.parse::<u64>() else {
                    debug!(line = line_num, pos, "Skipping row with non-numeric position");
                    continue;
                };
                VariantRecord::coordinate(chrom, pos, reference, alternate, rsid.map(String::from))
            }
            _ => match rsid {
                Some(rsid) => VariantRecord::identifier(rsid),
                None => {
                    debug!(line = line_num, "Skipping row with neither coordinates nor rsid");
                    continue;
                }
            },
        };

        ensure_capacity(records.len(), limit)?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::{GenomicVariant, VariantKind};

    #[test]
    fn test_coordinate_row_has_integer_position() {
        let csv = "chrom,pos,ref,alt,rsid\n1,69869,A,G,rs548049170\n";
        let records = parse_delimited_bytes(csv.as_bytes(), b',', 10).unwrap();

        assert_eq!(records.len(), 1);
        let expected = GenomicVariant::new("1", 69869, "A", "G")
            .with_rsid(Some("rs548049170".to_string()));
        assert_eq!(records[0].as_coordinate(), Some(&expected));
    }

    #[test]
    fn test_missing_chrom_becomes_identifier_only() {
        let csv = "chrom,pos,ref,alt,rsid\n,69869,A,G,rs548049170\n";
        let records = parse_delimited_bytes(csv.as_bytes(), b',', 10).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind(), VariantKind::IdentifierOnly);
        assert_eq!(records[0].rsid(), Some("rs548049170"));
    }

    #[test]
    fn test_unusable_rows_are_skipped() {
        let csv = "chrom,pos,ref,alt,rsid\n\
1,abc,A,G,\n\
,,,,\n\
2,500,C,T,\n";
        let records = parse_delimited_bytes(csv.as_bytes(), b',', 10).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].as_coordinate().map(|v| v.pos), Some(500));
        assert_eq!(records[0].rsid(), None);
    }

    #[test]
    fn test_tab_delimited_with_reordered_columns() {
        let tsv = "RSID\tALT\tREF\tPOS\tCHROM\nrs1\tT\tC\t10\tX\nrs2\t\t\t\t\n";
        let records = parse_delimited_bytes(tsv.as_bytes(), b'\t', 10).unwrap();

        assert_eq!(records.len(), 2);
        let first = records[0].as_coordinate().unwrap();
        assert_eq!(first.chrom, "X");
        assert_eq!(first.reference, "C");
        assert_eq!(first.alternate, "T");
        assert_eq!(records[1], VariantRecord::identifier("rs2"));
    }

    #[test]
    fn test_rsid_only_table() {
        let records = parse_delimited_bytes(b"rsid\nrs7412\nrs429358\n", b',', 10).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.kind() == VariantKind::IdentifierOnly));
    }

    #[test]
    fn test_header_without_known_columns() {
        let result = parse_delimited_bytes(b"gene,score\nBRCA1,5\n", b',', 10);
        assert!(matches!(result, Err(ParseError::MalformedInput(_))));
    }

    #[test]
    fn test_blank_table_is_empty_batch() {
        assert!(parse_delimited_bytes(b"", b',', 10).unwrap().is_empty());
        assert!(parse_delimited_bytes(b"\n  \n", b'\t', 10).unwrap().is_empty());
    }

    #[test]
    fn test_limit_exceeded() {
        let csv = "rsid\nrs1\nrs2\nrs3\n";
        assert!(matches!(
            parse_delimited_bytes(csv.as_bytes(), b',', 2),
            Err(ParseError::TooManyVariants(2))
        ));
    }
}
