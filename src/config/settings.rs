//! Run-wide scan settings.

use crate::types::Port;
use std::path::PathBuf;
use std::time::Duration;

/// Immutable settings for a single scan run.
///
/// Built once at startup and passed by reference to each component.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Port used for every postgres host.
    pub postgres_port: Port,
    /// Port used for every redshift host.
    pub redshift_port: Port,
    /// Upper bound on a single connection attempt.
    pub timeout: Duration,
    /// TLS negotiation mode, handed to the driver as-is.
    pub ssl_mode: String,
    /// Where to POST the result list, if anywhere.
    pub webhook_url: Option<String>,
    /// JSON file overriding the configured host lists.
    pub hosts_file: Option<PathBuf>,
    /// CI step-summary file the markdown summary is appended to.
    pub step_summary: Option<PathBuf>,
    /// Directory for the local artifacts.
    pub output_dir: PathBuf,
    /// Exit non-zero when any endpoint is exposed.
    pub fail_on_exposure: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            postgres_port: Port::POSTGRES,
            redshift_port: Port::REDSHIFT,
            timeout: Duration::from_secs(5),
            ssl_mode: "prefer".to_string(),
            webhook_url: None,
            hosts_file: None,
            step_summary: None,
            output_dir: PathBuf::from("."),
            fail_on_exposure: false,
        }
    }
}

impl ScanConfig {
    /// Set the connection timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the TLS negotiation mode.
    pub fn with_ssl_mode(mut self, mode: impl Into<String>) -> Self {
        self.ssl_mode = mode.into();
        self
    }

    /// Set the per-type ports.
    pub fn with_ports(mut self, postgres: Port, redshift: Port) -> Self {
        self.postgres_port = postgres;
        self.redshift_port = redshift;
        self
    }

    /// Set the webhook URL. Empty strings disable delivery.
    pub fn with_webhook(mut self, url: Option<String>) -> Self {
        self.webhook_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Set the host override file.
    pub fn with_hosts_file(mut self, path: Option<PathBuf>) -> Self {
        self.hosts_file = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Set the CI step-summary sink.
    pub fn with_step_summary(mut self, path: Option<PathBuf>) -> Self {
        self.step_summary = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Set the local artifact directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Exit non-zero when findings are reported.
    pub fn with_fail_on_exposure(mut self, fail: bool) -> Self {
        self.fail_on_exposure = fail;
        self
    }
}
