//! Render subcommand implementation.
//!
//! Handles `sqlexpose render <RESULTS>`, which rebuilds the markdown summary
//! from a saved `sql_access_results.json` artifact.

use crate::error::{CliResult, ReportError};
use crate::output;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Re-render the markdown summary from a saved JSON artifact.
#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    /// Path to a results artifact
    #[arg(value_name = "RESULTS", default_value = "sql_access_results.json")]
    pub results: PathBuf,

    /// Write the summary to this file (prints to stdout if not specified)
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output_file: Option<PathBuf>,
}

impl RenderCommand {
    /// Build the summary for the artifact.
    pub fn summary(&self) -> CliResult<String> {
        let content = fs::read_to_string(&self.results).map_err(|e| ReportError::ReadFailed {
            path: self.results.clone(),
            reason: e.to_string(),
        })?;
        let results = output::parse_json(&content).map_err(ReportError::from)?;

        Ok(output::render_summary(&results))
    }

    /// Execute the render command.
    pub fn execute(&self, quiet: bool) -> CliResult<()> {
        let summary = self.summary()?;

        match &self.output_file {
            Some(path) => {
                fs::write(path, &summary).map_err(|e| ReportError::WriteFailed {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                if !quiet {
                    output::print_success(&format!("Summary written to {}", path.display()));
                }
            }
            None => println!("{}", summary),
        }

        Ok(())
    }
}
