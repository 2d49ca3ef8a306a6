//! Connector trait abstraction and probe result types.
//!
//! The [`Connector`] trait isolates the database driver so the probe logic can
//! be exercised without a network.

use super::classify::Verdict;
use crate::types::{DbType, Port, Target};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User name that cannot belong to a real account.
pub const PROBE_USER: &str = "notarealuser";
/// Password sent alongside [`PROBE_USER`].
pub const PROBE_PASSWORD: &str = "notarealpass";

/// Parameters for one connection attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectRequest {
    pub host: String,
    pub port: Port,
    pub database: &'static str,
    pub user: &'static str,
    pub password: &'static str,
    /// TLS negotiation mode as configured (e.g. `prefer`, `require`).
    pub ssl_mode: String,
    /// How long the driver may spend establishing the session.
    pub connect_timeout: Duration,
}

impl ConnectRequest {
    /// Build the bad-credential request for a target.
    pub fn for_target(
        target: &Target,
        ssl_mode: impl Into<String>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            host: target.host.clone(),
            port: target.port,
            database: target.db_type.default_database(),
            user: PROBE_USER,
            password: PROBE_PASSWORD,
            ssl_mode: ssl_mode.into(),
            connect_timeout,
        }
    }
}

/// Why a connection attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectFailure {
    /// The driver or server reported the failure (auth, I/O, TLS, protocol).
    Driver(String),
    /// Anything else: bad local configuration, driver-internal errors.
    Unexpected(String),
}

/// Outcome of a single connection attempt, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The server accepted the credentials.
    Connected,
    /// The connector overran its connect timeout and the attempt was abandoned.
    TimedOut,
    /// The attempt failed.
    Failed(ConnectFailure),
}

/// Trait for database connectors.
///
/// Implementations must release any connection they open before returning.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Attempt to authenticate. `Ok(())` means the login was accepted.
    async fn connect(&self, request: &ConnectRequest) -> Result<(), ConnectFailure>;
}

/// Result of probing a single target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    #[serde(rename = "type")]
    pub db_type: DbType,
    pub host: String,
    pub port: Port,
    pub exposed: bool,
    pub status: String,
    pub error: String,
}

impl ProbeResult {
    /// Record a verdict for a target.
    pub fn from_verdict(target: &Target, verdict: &Verdict) -> Self {
        Self {
            db_type: target.db_type,
            host: target.host.clone(),
            port: target.port,
            exposed: verdict.is_exposed(),
            status: verdict.status().to_string(),
            error: verdict.error().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_for_redshift_uses_dev() {
        let target = Target::new("cluster.example.com", Port::REDSHIFT, DbType::Redshift);
        let request = ConnectRequest::for_target(&target, "prefer", Duration::from_secs(5));
        assert_eq!(request.database, "dev");
        assert_eq!(request.user, "notarealuser");
        assert_eq!(request.password, "notarealpass");
        assert_eq!(request.port, Port::REDSHIFT);
    }

    #[test]
    fn test_request_for_postgres_uses_postgres() {
        let target = Target::new("10.0.0.5", Port::POSTGRES, DbType::Postgres);
        let request = ConnectRequest::for_target(&target, "require", Duration::from_secs(2));
        assert_eq!(request.database, "postgres");
        assert_eq!(request.ssl_mode, "require");
        assert_eq!(request.connect_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_probe_result_json_field_order() {
        let target = Target::new("10.0.0.5", Port::POSTGRES, DbType::Postgres);
        let result = ProbeResult::from_verdict(&target, &Verdict::AuthRejected);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"type":"postgres","host":"10.0.0.5","port":5432,"exposed":true,"status":"Auth failed (DB EXPOSED)","error":""}"#
        );
    }
}
