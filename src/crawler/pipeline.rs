//! Page pipeline - scraping of a single index page
//!
//! For one page number the pipeline fetches the index document, walks the
//! detail links it contains in document order, and for each link fetches the
//! detail document, extracts a record and persists it. Everything inside a
//! page runs sequentially.

use crate::config::Config;
use crate::crawler::detail::parse_detail;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_index;
use crate::output::{JsonPersister, OutputResult, PageOutcome, Persister};
use crate::record::ItemRecord;
use crate::url::{index_url, parse_base};
use crate::ScrapeError;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Runs fetch, extraction and persistence for index pages
///
/// A pipeline owns its fetcher and persister; it is never shared between
/// workers. Writes run on the blocking thread pool.
pub struct PagePipeline<P: Persister = JsonPersister> {
    base: Url,
    fetcher: Fetcher,
    persister: Arc<P>,
    isolate_item_failures: bool,
}

impl PagePipeline<JsonPersister> {
    /// Builds a pipeline writing JSON records to the configured results dir
    ///
    /// The results directory is expected to exist already; the scheduler
    /// creates it once before any pipeline runs.
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        let base = parse_base(&config.scraper.base_url)?;
        let fetcher = Fetcher::new()?;
        let persister = JsonPersister::new(&config.output.results_dir);

        Ok(Self::new(
            base,
            fetcher,
            persister,
            config.scraper.isolate_item_failures,
        ))
    }
}

impl<P: Persister> PagePipeline<P> {
    /// Creates a pipeline from its parts
    ///
    /// # Arguments
    ///
    /// * `base` - Base address index pages and relative links resolve against
    /// * `fetcher` - Fetcher used for index and detail documents
    /// * `persister` - Destination for extracted records
    /// * `isolate_item_failures` - Continue the page after a failed write
    pub fn new(base: Url, fetcher: Fetcher, persister: P, isolate_item_failures: bool) -> Self {
        Self {
            base,
            fetcher,
            persister: Arc::new(persister),
            isolate_item_failures,
        }
    }

    /// Returns the persister records are written through
    pub fn persister(&self) -> &P {
        &self.persister
    }

    /// Scrapes index page `page` and every item it links to
    ///
    /// Fetch failures never abort the page: a missing index yields an
    /// outcome with no links, a missing detail document skips that item. A
    /// failed write aborts the remaining items of the page with
    /// [`ScrapeError::PageAborted`] unless item failures are isolated.
    ///
    /// # Returns
    ///
    /// * `Ok(PageOutcome)` - Counts for the page
    /// * `Err(ScrapeError)` - The page was aborted
    pub async fn run_page(&self, page: u32) -> Result<PageOutcome, ScrapeError> {
        let mut outcome = PageOutcome::new(page);

        let index_url = index_url(&self.base, page)?;
        tracing::info!("scraping {}...", index_url);

        let Some(index_html) = self.fetcher.fetch(index_url.as_str()).await else {
            tracing::warn!("Index page {} unavailable, no items scraped", page);
            outcome.fetch_failures += 1;
            return Ok(outcome);
        };
        outcome.index_fetched = true;

        for detail_url in parse_index(Some(index_html.as_str()), &self.base) {
            outcome.links_found += 1;
            tracing::info!("scraping {}...", detail_url);

            let Some(detail_html) = self.fetcher.fetch(detail_url.as_str()).await else {
                tracing::warn!("Skipping {}: detail page unavailable", detail_url);
                outcome.fetch_failures += 1;
                continue;
            };

            let record = parse_detail(Some(detail_html.as_str()));
            tracing::info!("get detail data {:?}", record);

            match self.persist(record).await {
                Ok(_) => outcome.saved += 1,
                Err(e) if self.isolate_item_failures => {
                    tracing::error!("Failed to save item from {}: {}", detail_url, e);
                    outcome.persist_failures += 1;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to save item from {}, aborting page {}: {}",
                        detail_url,
                        page,
                        e
                    );
                    return Err(ScrapeError::PageAborted {
                        page,
                        saved: outcome.saved,
                        source: Box::new(e.into()),
                    });
                }
            }
        }

        tracing::info!(
            "Page {} done: {} links, {} saved, {} fetch failures",
            page,
            outcome.links_found,
            outcome.saved,
            outcome.fetch_failures
        );

        Ok(outcome)
    }

    async fn persist(&self, record: ItemRecord) -> OutputResult<PathBuf> {
        let persister = Arc::clone(&self.persister);
        tokio::task::spawn_blocking(move || persister.persist(&record)).await?
    }
}
