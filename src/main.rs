//! Bracket-Harvest main entry point
//!
//! This is the command-line interface for the Bracket-Harvest link summarizer.

use anyhow::Context;
use bracket_harvest::config::{load_config, validate_queue_config, Config, SecretKey};
use bracket_harvest::crawler::{harvest, DispatchQueue, HttpFetcher, Pipeline};
use bracket_harvest::output::{logger_for, JsonLinesOutput};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};
use tracing_subscriber::EnvFilter;

/// Bracket-Harvest: a polite bracketed-link summarizer
///
/// Reads text line by line, fetches every URL found inside square brackets
/// (once, at most one request per delay), and prints one JSON line per page
/// with its title and an HMAC of the first email on it. The HMAC key is read
/// from the IM_SECRET environment variable.
#[derive(Parser, Debug)]
#[command(name = "bracket-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Summarizes pages linked inside bracketed text", long_about = None)]
struct Cli {
    /// Text file to read; standard input when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Milliseconds between the starts of two requests
    #[arg(long, value_name = "MS")]
    request_delay: Option<u64>,

    /// Milliseconds to wait before retrying a failed request
    #[arg(long, value_name = "MS")]
    retry_delay: Option<u64>,

    /// Report unexpected errors and increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all diagnostics except terminal failures
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A .env file is optional
    dotenvy::dotenv().ok();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;
    let key = SecretKey::from_env().context("Cannot redact emails without a key")?;

    tracing::debug!(
        "Request delay {}ms, retry delay {}ms",
        config.queue.request_delay,
        config.queue.retry_delay
    );

    let reader = open_input(&cli).await?;

    let fetcher = HttpFetcher::new(&config.http).context("Failed to build HTTP client")?;
    let pipeline = Pipeline::new(Arc::new(fetcher), Arc::new(JsonLinesOutput::stdio(key)))
        .with_logger(logger_for(cli.verbose > 0));
    let queue = DispatchQueue::spawn(&config.queue, pipeline);

    let found = harvest(reader, &queue).await;

    // Work already queued still runs if reading failed part-way
    queue.finish().await;

    let found = found.context("Failed to read input")?;
    tracing::info!("Input exhausted after {} URLs", found);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Diagnostics go to stderr so that stdout carries nothing but records.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("off")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bracket_harvest=warn")),
            1 => EnvFilter::new("bracket_harvest=debug,warn"),
            2 => EnvFilter::new("bracket_harvest=trace,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(request_delay) = cli.request_delay {
        config.queue.request_delay = request_delay;
    }
    if let Some(retry_delay) = cli.retry_delay {
        config.queue.retry_delay = retry_delay;
    }

    validate_queue_config(&config.queue).context("Invalid delay options")?;
    Ok(config)
}

/// Opens the input file, or stdin when no file was given
async fn open_input(cli: &Cli) -> anyhow::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}
