//! Rendering of ranked results for the terminal.

use crate::core::priority::PriorityResult;
use crate::core::types::Tier;
use crate::report::{write_delimited, TierSummary};

/// Print ranked results as human-readable cards.
///
/// `hook_text` pairs result indices with automation hook output.
pub fn print_text_results(
    results: &[PriorityResult],
    summary: &TierSummary,
    hook_text: &[(usize, String)],
    verbose: bool,
) {
    let counts: Vec<String> = Tier::ALL
        .iter()
        .map(|tier| format!("{}: {}", tier.as_str(), summary.count(*tier)))
        .collect();
    println!("Total variants: {}  ({})", summary.total, counts.join(", "));

    for (i, result) in results.iter().enumerate() {
        println!("\n{}", "─".repeat(60));
        println!(
            "#{} {} (score {}, {})",
            i + 1,
            result.label(),
            result.score,
            result.tier.as_str().to_uppercase()
        );
        println!("   Location: {}", result.location);
        println!("   Consequence: {}", result.consequence);
        println!("   Genes: {}", or_dash(&join_genes(result)));
        println!(
            "   ClinVar: {}",
            result.clinvar.map_or("—", |c| c.as_str())
        );
        match result.gnomad_af {
            Some(af) => println!("   gnomAD AF: {af:.6}"),
            None => println!("   gnomAD AF: —"),
        }
        println!("   rsID: {}", result.rsid.as_deref().unwrap_or("—"));

        // Critical and high results always show their reasoning
        if verbose || matches!(result.tier, Tier::Critical | Tier::High) {
            println!("   Reasons:");
            for reason in &result.reasons {
                println!("     - {reason}");
            }
        }

        for (_, text) in hook_text.iter().filter(|(index, _)| *index == i) {
            println!("   Automation hook:");
            for line in text.lines() {
                println!("     {line}");
            }
        }
    }
}

/// Print results as TSV/CSV export rows
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn print_delimited_results(results: &[PriorityResult], delimiter: u8) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_delimited(results, stdout.lock(), delimiter)?;
    Ok(())
}

fn join_genes(result: &PriorityResult) -> String {
    result
        .genes
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "—"
    } else {
        s
    }
}
