//! Probe module - attempts bad-credential logins and classifies the outcome.
//!
//! Targets are probed one at a time, in order. Each probe is total: every
//! outcome, including timeouts and driver failures, ends in a [`ProbeResult`].

pub mod classify;
pub mod postgres;
pub mod traits;

use crate::config::ScanConfig;
use crate::types::Target;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

pub use classify::{classify, classify_message, Verdict};
pub use postgres::PgConnector;
pub use traits::{AttemptOutcome, ConnectFailure, ConnectRequest, Connector, ProbeResult};

/// Probes a single endpoint for exposure.
pub struct ExposureProbe<C = PgConnector> {
    connector: C,
    timeout: Duration,
    ssl_mode: String,
}

impl ExposureProbe<PgConnector> {
    /// Create a probe backed by the Postgres wire protocol connector.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(PgConnector::new(), config.timeout, config.ssl_mode.clone())
    }
}

impl<C: Connector> ExposureProbe<C> {
    /// Create a probe with an explicit connector.
    pub fn new(connector: C, timeout: Duration, ssl_mode: impl Into<String>) -> Self {
        Self {
            connector,
            timeout,
            ssl_mode: ssl_mode.into(),
        }
    }

    /// Run one connection attempt against a target.
    ///
    /// The connector enforces the connect timeout itself. A connector that
    /// overruns it by as much again is abandoned; the attempt future is
    /// dropped, which closes any socket it had opened.
    pub async fn attempt(&self, target: &Target) -> AttemptOutcome {
        let request = ConnectRequest::for_target(target, self.ssl_mode.as_str(), self.timeout);
        let bound = self.timeout.saturating_mul(2);

        match timeout(bound, self.connector.connect(&request)).await {
            Ok(Ok(())) => AttemptOutcome::Connected,
            Ok(Err(failure)) => AttemptOutcome::Failed(failure),
            Err(_) => AttemptOutcome::TimedOut,
        }
    }

    /// Probe a target and classify the result.
    pub async fn probe(&self, target: &Target) -> ProbeResult {
        let outcome = self.attempt(target).await;
        debug!(endpoint = %target, outcome = ?outcome, "connection attempt finished");

        let verdict = classify(&outcome);
        match &verdict {
            Verdict::AuthRejected => {
                warn!(endpoint = %target, "endpoint answered authentication: exposed")
            }
            Verdict::UnexpectedSuccess => {
                warn!(endpoint = %target, "login with invalid credentials was accepted")
            }
            _ => debug!(endpoint = %target, verdict = %verdict, "endpoint classified"),
        }

        ProbeResult::from_verdict(target, &verdict)
    }
}

/// Probe every target sequentially, preserving order.
pub async fn run_scan<C: Connector>(
    probe: &ExposureProbe<C>,
    targets: &[Target],
    show_progress: bool,
) -> Vec<ProbeResult> {
    let progress = if show_progress {
        let pb = ProgressBar::new(targets.len() as u64);
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{pos}/{len}] {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(targets.len());
    for target in targets {
        if let Some(ref pb) = progress {
            pb.set_message(format!("Probing {}", target));
        }

        results.push(probe.probe(target).await);

        if let Some(ref pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DbType, Port};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Fails or succeeds with a fixed outcome and records the requests it saw.
    struct ScriptedConnector {
        outcome: Result<(), ConnectFailure>,
        seen: Mutex<Vec<ConnectRequest>>,
    }

    impl ScriptedConnector {
        fn new(outcome: Result<(), ConnectFailure>) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn driver_error(message: &str) -> Self {
            Self::new(Err(ConnectFailure::Driver(message.to_string())))
        }
    }

    #[async_trait]
    impl Connector for ScriptedConnector {
        async fn connect(&self, request: &ConnectRequest) -> Result<(), ConnectFailure> {
            self.seen.lock().unwrap().push(request.clone());
            self.outcome.clone()
        }
    }

    /// Never answers.
    struct StallingConnector;

    #[async_trait]
    impl Connector for StallingConnector {
        async fn connect(&self, _request: &ConnectRequest) -> Result<(), ConnectFailure> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn postgres_target() -> Target {
        Target::new("10.0.0.5", Port::POSTGRES, DbType::Postgres)
    }

    fn probe_with<C: Connector>(connector: C) -> ExposureProbe<C> {
        ExposureProbe::new(connector, Duration::from_secs(5), "prefer")
    }

    #[tokio::test]
    async fn test_auth_failure_is_exposed() {
        let probe = probe_with(ScriptedConnector::driver_error(
            "FATAL: password authentication failed for user \"notarealuser\"",
        ));
        let result = probe.probe(&postgres_target()).await;

        assert!(result.exposed);
        assert_eq!(result.status, "Auth failed (DB EXPOSED)");
        assert_eq!(result.error, "");
        assert_eq!(result.host, "10.0.0.5");
        assert_eq!(result.port, Port::POSTGRES);
        assert_eq!(result.db_type, DbType::Postgres);
    }

    #[tokio::test]
    async fn test_unreachable_is_not_exposed() {
        let probe = probe_with(ScriptedConnector::driver_error(
            "could not connect to server: Connection timed out",
        ));
        let result = probe.probe(&postgres_target()).await;

        assert!(!result.exposed);
        assert_eq!(result.status, "Not exposed (host unreachable)");
        assert_eq!(result.error, "");
    }

    #[tokio::test]
    async fn test_unrecognised_error_is_indeterminate() {
        let probe = probe_with(ScriptedConnector::driver_error("FATAL: relation does not exist"));
        let result = probe.probe(&postgres_target()).await;

        assert!(!result.exposed);
        assert_eq!(result.status, "Other error");
        assert_eq!(result.error, "fatal: relation does not exist");
    }

    #[tokio::test]
    async fn test_accepted_login_is_flagged() {
        let probe = probe_with(ScriptedConnector::new(Ok(())));
        let result = probe.probe(&postgres_target()).await;

        assert!(!result.exposed);
        assert_eq!(result.status, "Unexpectedly connected");
    }

    #[tokio::test]
    async fn test_connector_ignoring_timeout_is_abandoned() {
        let probe = ExposureProbe::new(StallingConnector, Duration::from_millis(20), "prefer");
        let result = probe.probe(&postgres_target()).await;

        assert!(!result.exposed);
        assert_eq!(result.status, "Timeout (Not exposed)");
        assert_eq!(result.error, "");
    }

    #[tokio::test]
    async fn test_silent_server_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let probe = ExposureProbe::new(PgConnector::new(), Duration::from_millis(300), "prefer");
        let target = Target::new("127.0.0.1", Port::new(port).unwrap(), DbType::Postgres);
        let result = probe.probe(&target).await;

        assert!(!result.exposed);
        assert_eq!(result.status, "Not exposed (host unreachable)");
        assert_eq!(result.error, "");
    }

    #[tokio::test]
    async fn test_probe_passes_request_parameters() {
        let probe = ExposureProbe::new(
            ScriptedConnector::driver_error("connection refused"),
            Duration::from_secs(1),
            "require",
        );
        let target = Target::new("cluster.example.com", Port::REDSHIFT, DbType::Redshift);
        probe.probe(&target).await;

        let seen = probe.connector.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].database, "dev");
        assert_eq!(seen[0].ssl_mode, "require");
        assert_eq!(seen[0].connect_timeout, Duration::from_secs(1));
        assert_eq!(seen[0].host, "cluster.example.com");
    }

    #[tokio::test]
    async fn test_run_scan_one_result_per_target_in_order() {
        let probe = probe_with(ScriptedConnector::driver_error("connection refused"));
        let targets = vec![
            Target::new("p1", Port::POSTGRES, DbType::Postgres),
            Target::new("p1", Port::POSTGRES, DbType::Postgres),
            Target::new("r1", Port::REDSHIFT, DbType::Redshift),
        ];

        let results = run_scan(&probe, &targets, false).await;

        assert_eq!(results.len(), targets.len());
        let hosts: Vec<_> = results.iter().map(|r| r.host.as_str()).collect();
        assert_eq!(hosts, vec!["p1", "p1", "r1"]);
        assert_eq!(results[2].db_type, DbType::Redshift);
        assert_eq!(results[2].port, Port::REDSHIFT);
    }

    #[tokio::test]
    async fn test_run_scan_empty() {
        let probe = probe_with(ScriptedConnector::new(Ok(())));
        assert!(run_scan(&probe, &[], false).await.is_empty());
    }

    #[tokio::test]
    async fn test_real_connector_closed_port() {
        let probe = ExposureProbe::new(PgConnector::new(), Duration::from_secs(2), "disable");
        let target = Target::new("127.0.0.1", Port::new(1).unwrap(), DbType::Postgres);
        let result = probe.probe(&target).await;

        // Closed or filtered, depending on the local firewall
        assert!(!result.exposed);
        assert_eq!(result.status, "Not exposed (host unreachable)");
    }
}
