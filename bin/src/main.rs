//! trendbar CLI - Drive and inspect the concurrent trend bar service.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use trendbar_lib::prelude::*;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "trendbar")]
#[command(about = "Aggregate streaming quotes into OHLC trend bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only, no periodic reports)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run random-walk producers against a live service
    Simulate {
        /// Instruments to quote
        #[arg(short, long, value_delimiter = ',', default_value = "EURUSD,EURJPY,GBPUSD")]
        instruments: Vec<String>,

        /// Number of producer tasks
        #[arg(short, long, default_value = "2")]
        producers: usize,

        /// Stop after this many seconds (runs until Ctrl-C if omitted)
        #[arg(short, long)]
        seconds: Option<u64>,

        /// Maintenance interval in milliseconds
        #[arg(long, default_value = "100")]
        maintenance_ms: u64,

        /// Per-producer feed interval in milliseconds
        #[arg(long, default_value = "50")]
        feed_ms: u64,

        /// Report interval in milliseconds
        #[arg(long, default_value = "1000")]
        report_ms: u64,

        /// Seed for reproducible price paths
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replay NDJSON quotes and print the committed bars
    Replay {
        /// Input file with one JSON quote per line (`-` for stdin)
        input: PathBuf,

        /// Only print this instrument
        #[arg(short, long)]
        instrument: Option<String>,

        /// Only print this period (m1, h1, d1)
        #[arg(short, long)]
        period: Option<Period>,

        /// Range start (unix seconds)
        #[arg(long, allow_hyphen_values = true)]
        from: Option<i64>,

        /// Range end (unix seconds)
        #[arg(long, allow_hyphen_values = true)]
        to: Option<i64>,

        /// Clock time for the maintenance pass. Defaults to last quote + 1 day.
        #[arg(long, allow_hyphen_values = true)]
        now: Option<i64>,

        /// Let the quote that closes a window open the next one
        #[arg(long)]
        reseed: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// List supported bar periods
    Periods,
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
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
        Commands::Simulate {
            instruments,
            producers,
            seconds,
            maintenance_ms,
            feed_ms,
            report_ms,
            seed,
        } => {
            let instruments = instruments
                .iter()
                .map(|id| id.parse::<Instrument>())
                .collect::<Result<Vec<_>, _>>()?;
            let options = commands::simulate::SimulateOptions {
                instruments,
                producers,
                seconds,
                maintenance_interval: Duration::from_millis(maintenance_ms),
                feed_interval: Duration::from_millis(feed_ms),
                report_interval: Duration::from_millis(report_ms),
                seed,
            };
            commands::simulate::simulate(options, cli.quiet).await
        }
        Commands::Replay {
            input,
            instrument,
            period,
            from,
            to,
            now,
            reseed,
            format,
        } => {
            let options = commands::replay::ReplayOptions {
                instrument,
                period,
                from,
                to,
                now,
                reseed,
                format,
            };
            commands::replay::replay(&input, &options)
        }
        Commands::Periods => {
            commands::periods::list_periods();
            Ok(())
        }
    }
}
