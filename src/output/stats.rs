//! Run statistics display
//!
//! Prints the counts gathered in a [`RunSummary`] to stdout and to the log.

use crate::output::traits::RunSummary;

/// Prints a run summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===\n");

    println!("Overview:");
    println!("  Pages requested: {}", summary.pages_requested);
    println!("  Pages completed: {}", summary.pages.len());
    println!("  Pages aborted: {}", summary.failures.len());
    println!("  Workers: {}", summary.workers);
    if let Some(duration) = summary.duration_seconds() {
        println!("  Duration: {:.2}s", duration);
    }
    println!();

    println!("Items:");
    println!("  Detail links found: {}", summary.total_links());
    println!("  Records saved: {}", summary.total_saved());
    println!("  Fetch failures: {}", summary.total_fetch_failures());
    println!("  Persist failures: {}", summary.total_persist_failures());
    println!();

    if !summary.pages.is_empty() {
        println!("Pages:");
        for outcome in &summary.pages {
            println!(
                "  {:>4}: {} links, {} saved, {} fetch failures{}",
                outcome.page,
                outcome.links_found,
                outcome.saved,
                outcome.fetch_failures,
                if outcome.index_fetched {
                    ""
                } else {
                    " (index unavailable)"
                }
            );
        }
        println!();
    }

    if !summary.failures.is_empty() {
        println!("Aborted Pages:");
        for failure in &summary.failures {
            println!(
                "  {:>4}: {} saved before abort: {}",
                failure.page, failure.saved, failure.message
            );
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} items saved on completed pages)",
        summary.success_rate(),
        summary.pages.iter().map(|p| p.saved).sum::<usize>(),
        summary.total_links()
    );
}

/// Emits a one-line summary through the log
pub fn log_summary(summary: &RunSummary) {
    if summary.is_clean() {
        tracing::info!(
            "Scrape completed: {} pages, {} records saved, {} fetch failures",
            summary.pages.len(),
            summary.total_saved(),
            summary.total_fetch_failures()
        );
    } else {
        tracing::warn!(
            "Scrape completed with {} aborted pages: {} of {} pages completed, {} records saved",
            summary.failures.len(),
            summary.pages.len(),
            summary.pages_requested,
            summary.total_saved()
        );
    }
}
