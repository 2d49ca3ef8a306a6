//! Scan subcommand implementation.
//!
//! Handles `sqlexpose scan`, which is also what runs when no subcommand is
//! given. Every option can be supplied through its environment variable, which
//! is how CI jobs usually configure it.

use crate::config::{hosts, ScanConfig};
use crate::error::{CliResult, ReportError};
use crate::output;
use crate::probe::classify::STATUS_UNEXPECTED_SUCCESS;
use crate::probe::{self, ExposureProbe, ProbeResult};
use crate::report::Reporter;
use crate::types::Port;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Probe Postgres and Redshift hosts for public exposure.
#[derive(Parser, Debug, Clone)]
pub struct ScanCommand {
    /// Comma-separated Postgres hosts
    #[arg(long, env = "POSTGRES_HOSTS", default_value = "", value_name = "HOSTS")]
    pub postgres_hosts: String,

    /// Comma-separated Redshift hosts
    #[arg(long, env = "REDSHIFT_HOSTS", default_value = "", value_name = "HOSTS")]
    pub redshift_hosts: String,

    /// Port probed on every Postgres host
    #[arg(long, env = "POSTGRES_PORT", default_value = "5432")]
    pub postgres_port: Port,

    /// Port probed on every Redshift host
    #[arg(long, env = "REDSHIFT_PORT", default_value = "5439")]
    pub redshift_port: Port,

    /// Connection timeout in seconds
    #[arg(
        short = 't',
        long,
        env = "SQL_TIMEOUT",
        default_value = "5",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// TLS negotiation mode (disable, allow, prefer, require, verify-ca, verify-full)
    #[arg(long, env = "SQL_SSLMODE", default_value = "prefer", value_name = "MODE")]
    pub sslmode: String,

    /// POST the JSON results to this URL
    #[arg(long, env = "RESULTS_WEBHOOK_URL", hide_env_values = true, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// JSON file overriding the host lists
    #[arg(long, env = "HOSTS_JSON_FILE", value_name = "PATH")]
    pub hosts_file: Option<PathBuf>,

    /// Append the markdown summary to this file instead of printing it
    #[arg(long, env = "GITHUB_STEP_SUMMARY", value_name = "PATH")]
    pub step_summary: Option<PathBuf>,

    /// Directory for the local summary and JSON artifact
    #[arg(short = 'o', long, env = "SQL_OUTPUT_DIR", default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Exit with status 1 when any endpoint is exposed or accepts the fake login
    #[arg(long, env = "SQL_FAIL_ON_EXPOSURE")]
    pub fail_on_exposure: bool,
}

impl ScanCommand {
    /// Build the immutable run configuration.
    pub fn to_config(&self) -> ScanConfig {
        ScanConfig::default()
            .with_ports(self.postgres_port, self.redshift_port)
            .with_timeout(Duration::from_secs(self.timeout))
            .with_ssl_mode(self.sslmode.trim())
            .with_webhook(self.webhook_url.clone())
            .with_hosts_file(self.hosts_file.clone())
            .with_step_summary(self.step_summary.clone())
            .with_output_dir(self.output_dir.clone())
            .with_fail_on_exposure(self.fail_on_exposure)
    }

    /// Execute the scan command and return the results in scan order.
    pub async fn execute(&self, verbose: bool, quiet: bool) -> CliResult<Vec<ProbeResult>> {
        let config = self.to_config();
        let reporter = Reporter::from_config(&config)?;

        let hosts = hosts::resolve(
            &self.postgres_hosts,
            &self.redshift_hosts,
            config.hosts_file.as_ref(),
        );

        if !quiet {
            output::print_scan_header(
                hosts.postgres.len(),
                hosts.redshift.len(),
                &config.ssl_mode,
                config.timeout.as_secs(),
            );
        }

        let targets = hosts.into_targets(config.postgres_port, config.redshift_port);
        let probe = ExposureProbe::from_config(&config);
        let results = probe::run_scan(&probe, &targets, verbose && !quiet).await;

        if results.is_empty() {
            info!("no results found");
        }

        let report = output::render(&results).map_err(ReportError::from)?;
        reporter.publish(&report).await?;

        if !quiet {
            output::print_tally(&results);
            if config.step_summary.is_none() {
                output::print_info(&format!(
                    "Results saved to {}",
                    reporter.results_path().display()
                ));
            }
        }

        Ok(results)
    }

    /// Whether these results should fail the run.
    pub fn should_fail(&self, results: &[ProbeResult]) -> bool {
        self.fail_on_exposure && has_findings(results)
    }
}

/// Exposed endpoints, and endpoints that accepted the fake login.
fn has_findings(results: &[ProbeResult]) -> bool {
    results
        .iter()
        .any(|r| r.exposed || r.status == STATUS_UNEXPECTED_SUCCESS)
}
