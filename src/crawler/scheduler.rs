//! Page scheduler - parallel execution of page pipelines
//!
//! Page numbers are placed on a shared queue and drained by a fixed pool of
//! worker tasks. Each worker builds its own [`PagePipeline`] and runs pages
//! one at a time; workers share nothing but the queue. Pages complete in no
//! particular order.

use crate::config::Config;
use crate::crawler::pipeline::PagePipeline;
use crate::output::{JsonPersister, PageFailure, PageOutcome, RunSummary};
use crate::ScrapeError;
use std::collections::VecDeque;
use std::ops::RangeInclusive;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;

/// What a worker reports for each page it ran
#[derive(Debug)]
enum PageReport {
    Completed(PageOutcome),
    Aborted(PageFailure),
}

/// Scheduler runs the page pipeline across a range of page numbers
pub struct PageScheduler {
    config: Config,
}

impl PageScheduler {
    /// Creates a new scheduler
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Returns the configured worker pool size
    pub fn workers(&self) -> usize {
        self.config.scraper.effective_workers()
    }

    /// Runs every page from 1 to the configured total
    pub async fn run(&self) -> Result<RunSummary, ScrapeError> {
        self.run_all(1..=self.config.scraper.total_pages).await
    }

    /// Runs the page pipeline once for each page in `pages`
    ///
    /// Creates the results directory, starts the worker pool and waits until
    /// every page has either completed or been aborted. An aborted page does
    /// not affect other pages.
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - Per-page outcomes and failures
    /// * `Err(ScrapeError)` - The run could not start (results directory or
    ///   pipeline construction failed)
    pub async fn run_all(&self, pages: RangeInclusive<u32>) -> Result<RunSummary, ScrapeError> {
        JsonPersister::new(&self.config.output.results_dir).ensure_root()?;

        let queue: VecDeque<u32> = pages.collect();
        let pages_requested = queue.len();
        let workers = self.workers().min(pages_requested).max(1);
        let mut summary = RunSummary::new(workers, pages_requested);

        tracing::info!(
            "Scraping {} pages with {} workers",
            pages_requested,
            workers
        );

        let queue = Arc::new(Mutex::new(queue));
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let mut join_set = JoinSet::new();

        for worker_idx in 0..workers {
            let pipeline = PagePipeline::from_config(&self.config)?;
            let queue = Arc::clone(&queue);
            let report_tx = report_tx.clone();

            join_set.spawn(async move {
                loop {
                    let next = {
                        let mut guard = queue.lock().await;
                        guard.pop_front()
                    };

                    let Some(page) = next else {
                        tracing::debug!(worker = worker_idx, "worker terminating (queue empty)");
                        break;
                    };

                    tracing::debug!(worker = worker_idx, page, "worker picked up page");

                    let report = match pipeline.run_page(page).await {
                        Ok(outcome) => PageReport::Completed(outcome),
                        Err(e) => {
                            tracing::error!(worker = worker_idx, page, "page failed: {}", e);
                            let saved = match &e {
                                ScrapeError::PageAborted { saved, .. } => *saved,
                                _ => 0,
                            };
                            PageReport::Aborted(PageFailure {
                                page,
                                saved,
                                message: e.to_string(),
                            })
                        }
                    };
                    if report_tx.send(report).is_err() {
                        break;
                    }
                }
            });
        }
        drop(report_tx);

        collect_reports(join_set, report_rx, &mut summary).await;

        summary.finish();
        Ok(summary)
    }
}

/// Waits for every worker and files the reports they sent
///
/// Reports are sent as each page finishes, so a worker that panics only loses
/// the page it was running.
async fn collect_reports(
    mut join_set: JoinSet<()>,
    mut reports: mpsc::UnboundedReceiver<PageReport>,
    summary: &mut RunSummary,
) {
    while let Some(joined) = join_set.join_next().await {
        if let Err(e) = joined {
            tracing::error!("Worker task failed: {}", e);
        }
    }

    while let Some(report) = reports.recv().await {
        match report {
            PageReport::Completed(outcome) => summary.pages.push(outcome),
            PageReport::Aborted(failure) => summary.failures.push(failure),
        }
    }
}
