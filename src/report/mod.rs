//! Result publishing.
//!
//! Writes the markdown summary to the CI step summary (or stdout and a local
//! file), always writes the JSON artifact, and forwards the JSON to a webhook
//! when one is configured. Webhook failures are logged, never returned.

mod webhook;

pub use webhook::{WebhookClient, WEBHOOK_TIMEOUT};

use crate::config::ScanConfig;
use crate::error::{ReportError, ReportResult};
use crate::output::RenderedReport;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Local markdown summary, written when no CI sink is configured.
pub const SUMMARY_FILE: &str = "sql_check_summary.md";
/// Local JSON artifact, always written.
pub const RESULTS_FILE: &str = "sql_access_results.json";

/// Publishes a rendered report.
pub struct Reporter {
    step_summary: Option<PathBuf>,
    output_dir: PathBuf,
    webhook: Option<WebhookClient>,
}

impl Reporter {
    /// Create a reporter.
    pub fn new(
        step_summary: Option<PathBuf>,
        output_dir: impl Into<PathBuf>,
        webhook: Option<WebhookClient>,
    ) -> Self {
        Self {
            step_summary,
            output_dir: output_dir.into(),
            webhook,
        }
    }

    /// Create a reporter from the scan configuration.
    pub fn from_config(config: &ScanConfig) -> ReportResult<Self> {
        let webhook = config
            .webhook_url
            .as_deref()
            .map(WebhookClient::new)
            .transpose()?;

        Ok(Self::new(
            config.step_summary.clone(),
            config.output_dir.clone(),
            webhook,
        ))
    }

    /// Path of the local summary file.
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE)
    }

    /// Path of the JSON artifact.
    pub fn results_path(&self) -> PathBuf {
        self.output_dir.join(RESULTS_FILE)
    }

    /// Publish the report to every configured sink.
    pub async fn publish(&self, report: &RenderedReport) -> ReportResult<()> {
        match &self.step_summary {
            Some(path) => append(path, &report.summary)?,
            None => {
                println!("{}", report.summary);
                write(&self.summary_path(), &report.summary)?;
            }
        }

        write(&self.results_path(), &report.json)?;

        if let Some(webhook) = &self.webhook {
            match webhook.deliver(&report.json).await {
                Ok(status) => info!(status = status.as_u16(), "webhook response"),
                Err(e) => warn!(url = webhook.url(), error = %e, "webhook failed"),
            }
        }

        Ok(())
    }
}

fn write(path: &Path, content: &str) -> ReportResult<()> {
    fs::write(path, content).map_err(|e| ReportError::WriteFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn append(path: &Path, content: &str) -> ReportResult<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|e| ReportError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
