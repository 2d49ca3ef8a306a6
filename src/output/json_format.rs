//! JSON artifact formatting.

use crate::probe::ProbeResult;

/// Serialize the result list with 2-space indentation, preserving order.
pub fn render_json(results: &[ProbeResult]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(results)
}

/// Parse a previously written result artifact.
pub fn parse_json(content: &str) -> serde_json::Result<Vec<ProbeResult>> {
    serde_json::from_str(content)
}
