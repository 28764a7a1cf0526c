//! Markdown run report generation
//!
//! Writes a human-readable report of a scheduler run, with one table row
//! per page and a section for aborted pages.

use crate::output::traits::{OutputError, OutputResult, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes the markdown report for `summary` to `output_path`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_summary(summary: &RunSummary, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_summary(summary);

    let mut file = File::create(output_path).map_err(|source| OutputError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a run summary as markdown
pub fn format_markdown_summary(summary: &RunSummary) -> String {
    let mut md = String::new();

    md.push_str("# Scrape Run Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", summary.started_at.to_rfc3339()));
    if let Some(finished) = &summary.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    if let Some(duration) = summary.duration_seconds() {
        md.push_str(&format!("- **Duration**: {:.2} seconds\n", duration));
    }
    md.push_str(&format!("- **Workers**: {}\n\n", summary.workers));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Pages Requested**: {}\n",
        summary.pages_requested
    ));
    md.push_str(&format!("- **Pages Completed**: {}\n", summary.pages.len()));
    md.push_str(&format!("- **Pages Aborted**: {}\n", summary.failures.len()));
    md.push_str(&format!("- **Detail Links**: {}\n", summary.total_links()));
    md.push_str(&format!("- **Records Saved**: {}\n", summary.total_saved()));
    md.push_str(&format!(
        "- **Fetch Failures**: {}\n",
        summary.total_fetch_failures()
    ));
    md.push_str(&format!(
        "- **Persist Failures**: {}\n",
        summary.total_persist_failures()
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        summary.success_rate()
    ));

    // Per-page breakdown
    if !summary.pages.is_empty() {
        md.push_str("## Page Breakdown\n\n");
        md.push_str("| Page | Index | Links | Saved | Fetch Failures | Persist Failures |\n");
        md.push_str("|------|-------|-------|-------|----------------|------------------|\n");

        for outcome in &summary.pages {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                outcome.page,
                if outcome.index_fetched { "ok" } else { "missing" },
                outcome.links_found,
                outcome.saved,
                outcome.fetch_failures,
                outcome.persist_failures
            ));
        }
        md.push('\n');
    }

    // Aborted pages
    if !summary.failures.is_empty() {
        md.push_str("## Aborted Pages\n\n");
        md.push_str("| Page | Saved Before Abort | Error |\n");
        md.push_str("|------|--------------------|-------|\n");

        for failure in &summary.failures {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                failure.page,
                failure.saved,
                failure.message.replace('|', "\\|")
            ));
        }
        md.push('\n');
    }

    md
}
