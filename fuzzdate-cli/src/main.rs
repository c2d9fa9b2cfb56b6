//! fuzzdate - resolve fuzzy date strings into structured dates

use clap::Parser;
use fuzzdate_cli::commands::Commands;

/// Fuzzy date resolution from the command line
#[derive(Debug, Parser)]
#[command(name = "fuzzdate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match &cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Batch(args) => args.execute(),
        Commands::GenerateConfig(args) => args.execute(),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
