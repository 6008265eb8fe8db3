use clap::Parser;
use tracing_subscriber::EnvFilter;

use variant_prioritizer::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("variant_prioritizer=debug,info")
    } else {
        EnvFilter::new("variant_prioritizer=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Prioritize(args) => {
            cli::prioritize::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Parse(args) => {
            cli::parse::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Score(args) => {
            cli::score::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Hook(args) => {
            cli::hook::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
