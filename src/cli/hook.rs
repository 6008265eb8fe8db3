//! Hook command - run the automation webhook for a single identifier.

use clap::Args;

use crate::cli::{HookOptions, OutputFormat};
use crate::hook::AutomationHook;

#[derive(Args)]
pub struct HookArgs {
    /// Variant identifier, e.g. rs429358
    #[arg(required = true)]
    pub identifier: String,

    #[command(flatten)]
    pub hook: HookOptions,
}

/// Execute the hook command
///
/// Hook failures are printed as text; only setup errors are returned.
///
/// # Errors
///
/// Returns an error if the HTTP client or async runtime cannot be created.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: HookArgs, format: OutputFormat, _verbose: bool) -> anyhow::Result<()> {
    let hook = AutomationHook::new(args.hook.to_config())?;
    let runtime = tokio::runtime::Runtime::new()?;
    let text = runtime.block_on(hook.call(&args.identifier));

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "identifier": args.identifier,
                "configured": hook.is_configured(),
                "text": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text | OutputFormat::Tsv | OutputFormat::Csv => println!("{text}"),
    }

    Ok(())
}
