//! Output module for persisting records and reporting runs
//!
//! This module handles:
//! - Writing each item record to its own JSON file
//! - Reading persisted records back
//! - Printing and exporting per-run statistics

mod json;
mod markdown;
pub mod stats;
mod traits;

pub use json::{file_stem, load_record, JsonPersister, RECORD_EXTENSION, UNNAMED_STEM};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{log_summary, print_summary};
pub use traits::{
    OutputError, OutputResult, PageFailure, PageOutcome, Persister, RunSummary,
};
