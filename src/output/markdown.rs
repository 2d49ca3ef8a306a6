//! Markdown summary rendering.
//!
//! Produces a GitHub-flavoured pipe table with padded columns so the summary
//! reads well both rendered and as raw text.

use crate::probe::ProbeResult;

pub const SUMMARY_HEADING: &str = "### SQL Exposure Scan (Postgres/Redshift)";
pub const NO_RESULTS_MESSAGE: &str = "No results found.  This is good!";

pub const EXPOSED_GLYPH: &str = ":red_circle:";
pub const OK_GLYPH: &str = ":white_check_mark:";

const HEADERS: [&str; 6] = ["Type", "Host", "Port", "Exposed?", "Status", "Error"];
const PORT_COLUMN: usize = 2;

/// Render the step summary for a result list.
pub fn render_summary(results: &[ProbeResult]) -> String {
    if results.is_empty() {
        format!("{}\n\n{}", SUMMARY_HEADING, NO_RESULTS_MESSAGE)
    } else {
        format!("{}\n\n{}\n", SUMMARY_HEADING, render_table(results))
    }
}

/// Render the results as a pipe table, one row per result in input order.
pub fn render_table(results: &[ProbeResult]) -> String {
    let rows: Vec<[String; 6]> = results.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&HEADERS.map(String::from), &widths));
    lines.push(separator(&widths));
    lines.extend(rows.iter().map(|row| format_row(row, &widths)));
    lines.join("\n")
}

fn row(result: &ProbeResult) -> [String; 6] {
    [
        result.db_type.to_string(),
        escape_cell(&result.host),
        result.port.to_string(),
        if result.exposed { EXPOSED_GLYPH } else { OK_GLYPH }.to_string(),
        escape_cell(&result.status),
        escape_cell(&result.error),
    ]
}

fn format_row(cells: &[String; 6], widths: &[usize; 6]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(column, (cell, &width))| {
            if column == PORT_COLUMN {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .collect();
    format!("| {} |", padded.join(" | "))
}

fn separator(widths: &[usize; 6]) -> String {
    let dashes: Vec<String> = widths.iter().map(|&w| "-".repeat(w + 2)).collect();
    format!("|{}|", dashes.join("|"))
}

/// Keep a cell on one line and stop `|` from splitting it.
fn escape_cell(value: &str) -> String {
    value
        .replace('|', "\\|")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
}
