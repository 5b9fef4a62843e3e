//! tickbars CLI - multi-window tick summaries from trade exports.

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "tickbars")]
#[command(about = "Resampled OHLC series and lookback window bars from tick data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the lookback windows at an anchor
    Summarize {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Anchor bucket index (defaults to the last bucket)
        #[arg(long, conflicts_with = "time")]
        at: Option<usize>,

        /// Anchor instant (epoch milliseconds or RFC 3339)
        #[arg(long)]
        time: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the resampled OHLC series
    Series {
        #[command(flatten)]
        input: InputArgs,

        /// Resample interval (e.g. 60, 60s, 1m, 5m, 1h)
        #[arg(short, long, default_value = "1m")]
        interval: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show tick and series statistics for a file
    Info {
        #[command(flatten)]
        input: InputArgs,

        /// Resample interval (e.g. 60, 60s, 1m, 5m, 1h)
        #[arg(short, long, default_value = "1m")]
        interval: String,
    },
}

/// Tick file and column mapping.
#[derive(Args)]
struct InputArgs {
    /// Path to the CSV tick file
    file: PathBuf,

    /// Column holding epoch-millisecond timestamps
    #[arg(long, default_value = "T")]
    timestamp_column: String,

    /// Column holding trade prices
    #[arg(long, default_value = "p")]
    price_column: String,

    /// Column holding the aggressor side flag
    #[arg(long, default_value = "m")]
    side_column: String,

    /// Side flag means "buyer is maker" (true = sell)
    #[arg(long)]
    buyer_maker: bool,
}

/// Engine configuration overrides.
#[derive(Args)]
struct EngineArgs {
    /// JSON engine configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resample interval (e.g. 60, 60s, 1m, 5m, 1h)
    #[arg(short, long)]
    interval: Option<String>,

    /// First lookback window in seconds (replaces configured window 1)
    #[arg(long)]
    range1: Option<u32>,

    /// Second lookback window in seconds (replaces configured window 2)
    #[arg(long)]
    range2: Option<u32>,

    /// Third lookback window in seconds (replaces configured window 3)
    #[arg(long)]
    range3: Option<u32>,

    /// Lookback window (repeatable, replaces the configured windows)
    #[arg(short, long = "window", conflicts_with_all = ["range1", "range2", "range3"])]
    windows: Vec<String>,
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Summarize {
            input,
            engine,
            at,
            time,
            format,
            output,
        } => {
            commands::summarize::summarize(
                &input,
                &engine,
                at,
                time.as_deref(),
                format,
                output,
                cli.quiet,
            )
            .await
        }
        Commands::Series {
            input,
            interval,
            format,
            output,
        } => commands::series::write_series(&input, &interval, format, output, cli.quiet).await,
        Commands::Info { input, interval } => {
            commands::info::show_info(&input, &interval, cli.quiet).await
        }
    }
}
