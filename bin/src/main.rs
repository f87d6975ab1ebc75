//! Vantage CLI binary.
//!
//! Maintains a ticker list, pulls quarterly income statements from FMP and
//! writes a ranked report of forward valuation multiples.

mod cmd;
mod config;
mod store;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{AppConfig, DEFAULT_REPORT_FILE};
use std::path::PathBuf;
use std::process;
use store::Store;
use vantage_fmp::{FmpClient, QUARTERLY_LIMIT};
use vantage_valuation::ReportFormat;

#[derive(Parser)]
#[command(name = "vantage")]
#[command(about = "Forward valuation from quarterly trend extrapolation", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the ticker list and statement snapshot
    /// (overrides VANTAGE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the stored ticker list
    Tickers {
        #[command(subcommand)]
        action: TickerAction,
    },

    /// Fetch quarterly income statements for every stored ticker
    Pull {
        /// Maximum number of quarters per ticker
        #[arg(short, long, default_value_t = QUARTERLY_LIMIT)]
        limit: u32,
    },

    /// Forecast, value and rank every pulled ticker
    Predict {
        /// Report file (defaults to forward-valuations.txt, or .json/.csv to match --format)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (text, json or csv)
        #[arg(short, long, default_value = "text")]
        format: ReportFormat,

        /// Divide without guarding zero or missing denominators
        #[arg(long)]
        raw_division: bool,

        /// Print the report instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
}

#[derive(Subcommand)]
enum TickerAction {
    /// Replace the ticker list with a JSON array of symbols
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },

    /// Print the stored ticker list
    List,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
///
/// `RUST_LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if std::env::var("RUST_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let store = Store::new(&config.data_dir);

    match cli.command {
        Commands::Tickers { action } => match action {
            TickerAction::Import { file } => cmd::tickers::import(&store, &file)?,
            TickerAction::List => cmd::tickers::list(&store)?,
        },
        Commands::Pull { limit } => {
            let client = FmpClient::new(config.require_api_key()?);
            cmd::pull::pull(&client, &store, limit).await?;
        }
        Commands::Predict {
            output,
            format,
            raw_division,
            stdout,
        } => {
            let client = FmpClient::new(config.require_api_key()?);
            let output = if stdout {
                None
            } else {
                Some(output.unwrap_or_else(|| default_report_path(format)))
            };
            let options = cmd::predict::PredictOptions {
                output: output.as_deref(),
                format,
                raw_division,
            };
            cmd::predict::predict(&client, &store, &options).await?;
        }
    }

    Ok(())
}

fn default_report_path(format: ReportFormat) -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_FILE).with_extension(format.extension())
}
