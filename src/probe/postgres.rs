//! Postgres wire protocol connector.
//!
//! Redshift speaks the same startup and authentication protocol, so one
//! connector serves both database types.
//!
//! Failures are reported in the wording of the classic client library
//! (`could not connect to server: ...`, `server closed the connection
//! unexpectedly`, `timeout expired`) so the classifier's pattern lists apply
//! unchanged.

use super::traits::{ConnectFailure, ConnectRequest, Connector};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use sqlx::{ConnectOptions, Connection};
use std::io;
use std::str::FromStr;
use tokio::time::timeout;
use tracing::debug;

/// Reported when the server hangs up during the handshake.
pub const SERVER_CLOSED: &str = "server closed the connection unexpectedly";
/// Reported when the connect timeout expires.
pub const TIMEOUT_EXPIRED: &str = "timeout expired";

const CONNECT_PREFIX: &str = "could not connect to server";

/// Connector backed by `sqlx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

impl PgConnector {
    pub fn new() -> Self {
        Self
    }

    fn options(request: &ConnectRequest) -> Result<PgConnectOptions, ConnectFailure> {
        let ssl_mode = PgSslMode::from_str(&request.ssl_mode)
            .map_err(|e| ConnectFailure::Unexpected(e.to_string()))?;

        // Skip the passfile so a local ~/.pgpass can never supply credentials.
        Ok(PgConnectOptions::new_without_pgpass()
            .host(&request.host)
            .port(request.port.as_u16())
            .database(request.database)
            .username(request.user)
            .password(request.password)
            .ssl_mode(ssl_mode)
            .application_name(env!("CARGO_PKG_NAME")))
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self, request: &ConnectRequest) -> Result<(), ConnectFailure> {
        let options = Self::options(request)?;

        match timeout(request.connect_timeout, options.connect()).await {
            Ok(Ok(conn)) => {
                if let Err(e) = conn.close().await {
                    debug!(host = %request.host, error = %e, "error closing connection");
                }
                Ok(())
            }
            Ok(Err(e)) => Err(into_failure(e)),
            Err(_) => Err(ConnectFailure::Driver(TIMEOUT_EXPIRED.to_string())),
        }
    }
}

/// Sort a driver error into server/transport-level failures and the rest.
fn into_failure(error: sqlx::Error) -> ConnectFailure {
    match error {
        sqlx::Error::Io(e) => ConnectFailure::Driver(describe_io(&e)),
        sqlx::Error::Tls(ref source) => match source.downcast_ref::<io::Error>() {
            Some(e) if closed_by_peer(e.kind()) => {
                ConnectFailure::Driver(SERVER_CLOSED.to_string())
            }
            _ => ConnectFailure::Driver(error.to_string()),
        },
        sqlx::Error::Database(_) | sqlx::Error::Protocol(_) => {
            ConnectFailure::Driver(error.to_string())
        }
        other => ConnectFailure::Unexpected(other.to_string()),
    }
}

fn describe_io(error: &io::Error) -> String {
    if closed_by_peer(error.kind()) {
        SERVER_CLOSED.to_string()
    } else {
        format!("{}: {}", CONNECT_PREFIX, error)
    }
}

fn closed_by_peer(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::BrokenPipe
    )
}
