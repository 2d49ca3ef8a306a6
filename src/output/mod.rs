//! Output formatting module.
//!
//! Renders probe results as a markdown summary and a JSON artifact, and
//! provides styled terminal messages.

mod json_format;
mod markdown;
mod plain;

pub use json_format::{parse_json, render_json};
pub use markdown::{render_summary, render_table, NO_RESULTS_MESSAGE, SUMMARY_HEADING};
pub use plain::{print_info, print_scan_header, print_success, print_tally, print_warning};

use crate::probe::ProbeResult;

/// Both renderings of one result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Markdown step summary.
    pub summary: String,
    /// JSON result array.
    pub json: String,
}

/// Render a result list. Identical input always yields identical output.
pub fn render(results: &[ProbeResult]) -> serde_json::Result<RenderedReport> {
    Ok(RenderedReport {
        summary: render_summary(results),
        json: render_json(results)?,
    })
}
