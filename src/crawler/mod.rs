//! Crawler module for page fetching and item extraction
//!
//! This module contains the scraping logic, including:
//! - HTTP fetching that reports failures as absent documents
//! - Index page parsing into detail links
//! - Detail page field extraction
//! - The per-page pipeline and the parallel page scheduler

mod detail;
mod fetcher;
mod parser;
mod pipeline;
mod scheduler;

#[cfg(test)]
mod test_logs;

pub use detail::{parse_detail, RELEASE_MARKER};
pub use fetcher::{build_http_client, fetch_document, FetchResult, Fetcher};
pub use parser::{parse_index, IndexLinks};
pub use pipeline::PagePipeline;
pub use scheduler::PageScheduler;

use crate::config::Config;
use crate::output::RunSummary;
use crate::ScrapeError;

/// Runs a complete scrape
///
/// This is the main entry point. It will:
/// 1. Create the results directory
/// 2. Start one pipeline per worker
/// 3. Scrape pages `1..=total_pages`
/// 4. Return the per-page outcome counts
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Every page ran (some may have been aborted)
/// * `Err(ScrapeError)` - The run could not start
pub async fn scrape(config: Config) -> Result<RunSummary, ScrapeError> {
    PageScheduler::new(config).run().await
}
