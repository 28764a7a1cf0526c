//! Output traits and run report types
//!
//! This module defines the persister interface records are written through
//! and the per-page and per-run outcome counts collected while scraping.

use crate::record::ItemRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Persist task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record persisters
///
/// A persister stores one record per call, keyed by the record's `name`.
/// Storing a record under a key that already exists replaces it.
pub trait Persister: Send + Sync + 'static {
    /// Stores a record
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Where the record was written
    /// * `Err(OutputError)` - The write failed; nothing is retried
    fn persist(&self, record: &ItemRecord) -> OutputResult<PathBuf>;
}

/// Counts collected while running the pipeline for one index page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOutcome {
    /// Index page number
    pub page: u32,

    /// Whether the index page itself was fetched
    pub index_fetched: bool,

    /// Detail links found on the index page
    pub links_found: usize,

    /// Records written
    pub saved: usize,

    /// Index or detail documents that could not be fetched
    pub fetch_failures: usize,

    /// Records that failed to write (only counted when failures are isolated)
    pub persist_failures: usize,
}

impl PageOutcome {
    /// Creates an empty outcome for `page`
    pub fn new(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Returns true if every link found was saved
    pub fn is_complete(&self) -> bool {
        self.index_fetched && self.saved == self.links_found
    }
}

/// A page whose pipeline was aborted by an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// Index page number
    pub page: u32,

    /// Records written before the abort
    pub saved: usize,

    /// Error description
    pub message: String,
}

/// Summary of a whole scheduler run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub workers: usize,
    pub pages_requested: usize,

    /// Outcomes of pages that ran to completion, sorted by page number
    pub pages: Vec<PageOutcome>,

    /// Pages that were aborted, sorted by page number
    pub failures: Vec<PageFailure>,
}

impl RunSummary {
    /// Creates a new summary for a run that starts now
    pub fn new(workers: usize, pages_requested: usize) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            workers,
            pages_requested,
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Marks the run as finished and orders results by page
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
        self.pages.sort_by_key(|outcome| outcome.page);
        self.failures.sort_by_key(|failure| failure.page);
    }

    /// Total detail links found across completed pages
    pub fn total_links(&self) -> usize {
        self.pages.iter().map(|p| p.links_found).sum()
    }

    /// Total records written, including those on aborted pages
    pub fn total_saved(&self) -> usize {
        self.pages.iter().map(|p| p.saved).sum::<usize>()
            + self.failures.iter().map(|f| f.saved).sum::<usize>()
    }

    /// Total documents that could not be fetched on completed pages
    pub fn total_fetch_failures(&self) -> usize {
        self.pages.iter().map(|p| p.fetch_failures).sum()
    }

    /// Total isolated persist failures on completed pages
    pub fn total_persist_failures(&self) -> usize {
        self.pages.iter().map(|p| p.persist_failures).sum()
    }

    /// Returns the run duration in seconds if finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Percentage of found links on completed pages that were saved
    pub fn success_rate(&self) -> f64 {
        let links = self.total_links();
        if links == 0 {
            return 0.0;
        }
        let saved: usize = self.pages.iter().map(|p| p.saved).sum();
        (saved as f64 / links as f64) * 100.0
    }

    /// Returns true if every requested page completed
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.pages.len() == self.pages_requested
    }
}
