//! QuoteGrouper - fetch quotes and group them by author
//!
//! A CLI tool that calls a quote API a fixed number of times, keeps the
//! records with a non-blank author and quote, and writes them grouped by
//! author to a JSON file.
//!
//! A failed run prints a single "Network error ..." or "Unexpected error ..."
//! line and still exits 0. Only invalid arguments exit with 1.

mod analysis;
mod cli;
mod collector;
mod config;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use cli::Args;
use collector::{Collection, CollectionSummary, CollectorConfig, QuoteCollector};
use config::{Config, CONFIG_FILE_NAME};
use models::GroupedQuotes;
use report::WriteOutcome;
use source::{FetchError, HttpQuoteSource};
use std::path::Path;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("QuoteGrouper v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        debug!("Run failed: {:?}", e);
        eprintln!("{}", describe_failure(&e));
    }

    Ok(())
}

/// Handle --init-config: generate a default .quotegrouper.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change the API URL, attempt count, or output path.");
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` wins when set.
fn init_logging(args: &Args) -> Result<()> {
    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Turn a failed run into the single line shown to the user.
fn describe_failure(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FetchError>() {
        Some(fetch_err) if fetch_err.is_network() => {
            format!("Network error while fetching API data: {:#}", err)
        }
        _ => format!("Unexpected error: {:#}", err),
    }
}

/// Run the complete fetch-group-persist workflow.
async fn run(args: Args) -> Result<()> {
    let started_at = Utc::now();

    // Load configuration
    let mut config = load_config(&args, Path::new("."))?;
    config.merge_with_args(&args);
    config.validate()?;

    // Step 1: Fetch and validate
    let source = HttpQuoteSource::new(config.source.url.clone(), config.source.timeout_seconds)?;
    let collector = QuoteCollector::new(
        CollectorConfig {
            attempts: config.source.attempts,
            show_progress: args.show_progress(),
        },
        source,
    );

    let collection = collector.run().await?;

    // Step 2: Group and persist
    let output = config.output.path.as_path();
    if let Some(grouped) = persist(&collection, output)? {
        print_summary(&collection.summary, &grouped, output, started_at);
    }

    Ok(())
}

/// Group the collected quotes and write them to `output`.
///
/// Returns `None` without touching the file system when nothing was collected.
fn persist(collection: &Collection, output: &Path) -> Result<Option<GroupedQuotes>> {
    if collection.is_empty() {
        println!("No valid quotes were fetched.");
        return Ok(None);
    }

    println!("Grouping records by author...");
    let grouped = analysis::group_by_author(&collection.quotes);
    println!("Records grouped into {} authors.", grouped.len());

    println!("Saving grouped data into a JSON file...");
    let outcome = report::write_grouped_quotes(&grouped, output)?;
    if outcome == WriteOutcome::Overwritten {
        info!("Replaced previous output at {}", output.display());
    }
    println!("Data saved successfully to {}.", output.display());

    Ok(Some(grouped))
}

fn print_summary(
    summary: &CollectionSummary,
    grouped: &GroupedQuotes,
    output: &Path,
    started_at: DateTime<Utc>,
) {
    let duration = (Utc::now() - started_at).num_milliseconds() as f64 / 1000.0;

    println!("\n📊 Run Summary:");
    println!(
        "   Attempts: {} ({} empty responses)",
        summary.attempts, summary.empty_responses
    );
    println!(
        "   Records fetched: {} | Valid: {} | Invalid: {}",
        summary.records_fetched, summary.valid, summary.invalid
    );
    println!(
        "   Authors: {} | Quotes saved: {}",
        grouped.len(),
        analysis::total_quotes(grouped)
    );
    for (author, count) in analysis::most_quoted_authors(grouped, 3) {
        println!("   - {}: {}", author, count);
    }
    println!("   Output: {}", output.display());
    println!("   Started: {}", started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("   Duration: {:.1}s", duration);
}

/// Load configuration from `--config`, else from `dir`, else use defaults.
///
/// A config file that exists but cannot be read or parsed is an error.
fn load_config(args: &Args, dir: &Path) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_from_dir(dir)? {
        Some(config) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
