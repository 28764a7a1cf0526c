//! ssr-scraper main entry point
//!
//! This is the command-line interface for the listing scraper.

use anyhow::Context;
use clap::Parser;
use ssr_scraper::config::{load_config_with_hash, validate, Config};
use ssr_scraper::crawler::PageScheduler;
use ssr_scraper::output::{generate_markdown_summary, log_summary, print_summary, RunSummary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ssr-scraper: scrape a paginated listing into one JSON file per item
///
/// Every index page from 1 to the configured total is fetched, each linked
/// detail page is parsed, and the extracted record is written to the results
/// directory. Pages are spread over a pool of workers.
#[derive(Parser, Debug)]
#[command(name = "ssr-scraper")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a paginated listing into JSON records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Base address of the listing site
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Number of index pages to scrape
    #[arg(long, value_name = "N")]
    total_pages: Option<u32>,

    /// Directory that receives the JSON records
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Worker pool size (defaults to available parallelism)
    #[arg(short, long, value_name = "N")]
    workers: Option<usize>,

    /// Keep scraping a page after one of its items fails to save
    #[arg(long)]
    isolate_item_failures: bool,

    /// Write a markdown report of the run to this file
    #[arg(long, value_name = "FILE")]
    summary: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_scrape(config, cli.summary.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ssr_scraper=info,warn"),
            1 => EnvFilter::new("ssr_scraper=debug,info"),
            2 => EnvFilter::new("ssr_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line values take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(base_url) = &cli.base_url {
        config.scraper.base_url = base_url.clone();
    }
    if let Some(total_pages) = cli.total_pages {
        config.scraper.total_pages = total_pages;
    }
    if let Some(workers) = cli.workers {
        config.scraper.workers = Some(workers);
    }
    if cli.isolate_item_failures {
        config.scraper.isolate_item_failures = true;
    }
    if let Some(output_dir) = &cli.output_dir {
        config.output.results_dir = output_dir.clone();
    }
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config) {
    println!("=== ssr-scraper Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Base URL: {}", config.scraper.base_url);
    println!("  Total pages: {}", config.scraper.total_pages);
    println!("  Workers: {}", config.scraper.effective_workers());
    println!(
        "  Item failures: {}",
        if config.scraper.isolate_item_failures {
            "isolated"
        } else {
            "abort page"
        }
    );

    println!("\nOutput:");
    println!("  Results directory: {}", config.output.results_dir);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would scrape index pages 1..={}",
        config.scraper.total_pages
    );
}

/// Handles the main scrape operation
async fn handle_scrape(
    config: Config,
    summary_path: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Scraping {} from page 1 to {} into {}",
        config.scraper.base_url,
        config.scraper.total_pages,
        config.output.results_dir
    );

    let summary = PageScheduler::new(config)
        .run()
        .await
        .context("scrape failed to start")?;

    log_summary(&summary);
    print_summary(&summary);

    if let Some(path) = summary_path {
        generate_markdown_summary(&summary, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!("Run report written to: {}", path.display());
    }

    ensure_clean(&summary)
}

/// Fails unless every requested page ran to completion
fn ensure_clean(summary: &RunSummary) -> anyhow::Result<()> {
    if summary.is_clean() {
        return Ok(());
    }

    let missing = summary
        .pages_requested
        .saturating_sub(summary.pages.len() + summary.failures.len());
    anyhow::bail!(
        "{} of {} pages did not complete ({} aborted, {} unreported)",
        summary.pages_requested.saturating_sub(summary.pages.len()),
        summary.pages_requested,
        summary.failures.len(),
        missing
    );
}
