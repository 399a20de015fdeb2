//! logquery CLI
//!
//! Command-line interface for querying activity logs:
//! - run a query-language query against a log directory
//! - print an ingestion summary
//! - list the queryable fields

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logquery::config::Config;
use logquery::ingest::LogIngestor;
use logquery::query::{Field, QueryExecutor};
use logquery::store::RecordStore;

#[derive(Parser)]
#[command(name = "logquery")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query activity logs with a small query language")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: standard locations)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log directory (overrides config)
    #[arg(short = 'd', long, global = true)]
    log_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a query, e.g. 'get user for event = "LOGIN"'
    Query {
        /// The query string
        query: String,
    },
    /// Ingest the log directory and print a summary
    Stats,
    /// List the queryable fields
    Fields,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("logquery={}", config.logging.level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.ingest.log_dir));

    // Fields listing needs no ingestion
    if matches!(cli.command, Commands::Fields) {
        print_values(
            Field::all().iter().map(|f| f.token().to_string()).collect(),
            cli.format,
        )?;
        return Ok(());
    }

    let report = LogIngestor::new(&log_dir)
        .load()
        .with_context(|| format!("failed to ingest logs from {:?}", log_dir))?;
    let lines_read = report.lines_read;
    let lines_skipped = report.lines_skipped;
    let store = Arc::new(RecordStore::from_records(report.records));

    match cli.command {
        Commands::Query { query } => {
            let executor = QueryExecutor::new(store);
            let result = executor.execute_str(&query)?;

            // Results are sets; sort the text forms for stable display only
            let mut values: Vec<String> = result.iter().map(|v| v.to_string()).collect();
            values.sort();
            print_values(values, cli.format)?;
        }
        Commands::Stats => match cli.format {
            Format::Table => {
                println!("records:       {}", store.len());
                println!("lines read:    {}", lines_read);
                println!("lines skipped: {}", lines_skipped);
            }
            Format::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "records": store.len(),
                        "lines_read": lines_read,
                        "lines_skipped": lines_skipped,
                    })
                );
            }
        },
        Commands::Fields => unreachable!("handled above"),
    }

    Ok(())
}

fn print_values(values: Vec<String>, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Table => {
            for value in values {
                println!("{}", value);
            }
        }
        Format::Json => {
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
    }
    Ok(())
}
