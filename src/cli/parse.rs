//! Parse command - show what a variant file parses to, without any network calls.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{read_input, OutputFormat};
use crate::core::variant::{VariantKind, VariantRecord};
use crate::parsing::{detect_format, parse_with_format};
use crate::utils::validation::MAX_VARIANTS;

#[derive(Args)]
pub struct ParseArgs {
    /// Input file (.vcf, .vcf.gz, .txt, .csv or .tsv)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Refuse files holding more than this many variant records
    #[arg(long, default_value_t = MAX_VARIANTS)]
    pub max_variants: usize,
}

/// Execute the parse command
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ParseArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let (filename, content) = read_input(&args.input)?;
    let input_format = detect_format(&filename, &content)?;
    let records = parse_with_format(&content, input_format, args.max_variants)?;

    if verbose {
        eprintln!("Detected format: {input_format}");
    }

    match format {
        OutputFormat::Text => print_text(&records, &input_format.to_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Tsv => print_delimited(&records, '\t'),
        OutputFormat::Csv => print_delimited(&records, ','),
    }

    Ok(())
}

fn print_text(records: &[VariantRecord], format_name: &str) {
    let coordinates = records
        .iter()
        .filter(|r| r.kind() == VariantKind::Coordinate)
        .count();
    println!(
        "{format_name}: {} record(s), {coordinates} with coordinates, {} identifier-only",
        records.len(),
        records.len() - coordinates
    );

    for record in records {
        match record {
            VariantRecord::Coordinate(v) => println!(
                "  {}\t{}>{}\t{}",
                v.location(),
                v.reference,
                v.alternate,
                v.rsid.as_deref().unwrap_or(".")
            ),
            VariantRecord::IdentifierOnly(v) => match &v.array_call {
                Some(call) => println!("  {}\t(chr {}, genotype {})", v.rsid, call.chrom, call.genotype),
                None => println!("  {}", v.rsid),
            },
        }
    }
}

fn print_delimited(records: &[VariantRecord], sep: char) {
    println!("kind{sep}chrom{sep}pos{sep}ref{sep}alt{sep}rsid");
    for record in records {
        match record {
            VariantRecord::Coordinate(v) => println!(
                "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
                record.kind(),
                v.chrom,
                v.pos,
                v.reference,
                v.alternate,
                v.rsid.as_deref().unwrap_or_default()
            ),
            VariantRecord::IdentifierOnly(v) => {
                println!("{}{sep}{sep}{sep}{sep}{sep}{}", record.kind(), v.rsid);
            }
        }
    }
}
