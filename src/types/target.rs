//! Probe target types.

use super::Port;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The database flavour behind an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    Postgres,
    Redshift,
}

impl DbType {
    /// Database named in the startup packet.
    ///
    /// Only authentication matters, so this is just the default database each
    /// flavour ships with.
    pub const fn default_database(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Redshift => "dev",
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgres"),
            Self::Redshift => write!(f, "redshift"),
        }
    }
}

/// One endpoint to probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    /// Hostname or IP address, exactly as configured.
    pub host: String,
    pub port: Port,
    pub db_type: DbType,
}

impl Target {
    /// Create a new target.
    pub fn new(host: impl Into<String>, port: Port, db_type: DbType) -> Self {
        Self {
            host: host.into(),
            port,
            db_type,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.db_type, self.host, self.port)
    }
}
