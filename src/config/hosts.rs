//! Host list resolution.
//!
//! Hosts come from comma-separated strings (environment or flags) and may be
//! replaced per database type by an optional JSON override file:
//!
//! ```json
//! {"postgres_hosts": ["10.0.0.5", "db.example.com"], "redshift_hosts": []}
//! ```

use crate::error::{ConfigError, ConfigResult};
use crate::types::{DbType, Port, Target};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const POSTGRES_KEY: &str = "postgres_hosts";
const REDSHIFT_KEY: &str = "redshift_hosts";

/// Split a comma-separated host list.
///
/// Entries are trimmed and empty entries dropped. Order is kept and duplicates
/// are left in place.
pub fn parse_hosts(hosts: &str) -> Vec<String> {
    hosts
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(String::from)
        .collect()
}

/// Resolved host lists, in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostLists {
    pub postgres: Vec<String>,
    pub redshift: Vec<String>,
}

impl HostLists {
    /// Total number of hosts across both lists.
    pub fn len(&self) -> usize {
        self.postgres.len() + self.redshift.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand into targets: every postgres host first, then every redshift host.
    pub fn into_targets(self, postgres_port: Port, redshift_port: Port) -> Vec<Target> {
        let postgres = self
            .postgres
            .into_iter()
            .map(|host| Target::new(host, postgres_port, DbType::Postgres));
        let redshift = self
            .redshift
            .into_iter()
            .map(|host| Target::new(host, redshift_port, DbType::Redshift));
        postgres.chain(redshift).collect()
    }
}

/// Host overrides read from a JSON file.
///
/// A `None` field means the key was absent or not an array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOverrides {
    pub postgres_hosts: Option<Vec<String>>,
    pub redshift_hosts: Option<Vec<String>>,
}

impl HostOverrides {
    /// Load overrides from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> ConfigResult<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        let object = value
            .as_object()
            .ok_or_else(|| ConfigError::NotAnObject(path.to_path_buf()))?;

        Ok(Self {
            postgres_hosts: string_array(object.get(POSTGRES_KEY), POSTGRES_KEY)?,
            redshift_hosts: string_array(object.get(REDSHIFT_KEY), REDSHIFT_KEY)?,
        })
    }

    /// Apply the overrides on top of comma-separated host strings.
    ///
    /// Override entries are joined and re-split so they pass through the same
    /// trimming as environment values.
    fn apply(&self, postgres: &str, redshift: &str) -> HostLists {
        let postgres = match &self.postgres_hosts {
            Some(hosts) => parse_hosts(&hosts.join(",")),
            None => parse_hosts(postgres),
        };
        let redshift = match &self.redshift_hosts {
            Some(hosts) => parse_hosts(&hosts.join(",")),
            None => parse_hosts(redshift),
        };
        HostLists { postgres, redshift }
    }
}

fn string_array(value: Option<&Value>, key: &str) -> ConfigResult<Option<Vec<String>>> {
    let Some(items) = value.and_then(Value::as_array) else {
        return Ok(None);
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(String::from)
                .ok_or_else(|| ConfigError::InvalidEntry {
                    key: key.to_string(),
                    index,
                })
        })
        .collect::<ConfigResult<Vec<_>>>()
        .map(Some)
}

/// Resolve the hosts to probe.
///
/// A missing override file is ignored silently. An unreadable or malformed one
/// is logged and the comma-separated values are used for both lists.
pub fn resolve(postgres: &str, redshift: &str, hosts_file: Option<&PathBuf>) -> HostLists {
    let Some(path) = hosts_file.filter(|p| !p.as_os_str().is_empty()) else {
        return HostOverrides::default().apply(postgres, redshift);
    };

    if !path.exists() {
        return HostOverrides::default().apply(postgres, redshift);
    }

    match HostOverrides::load(path) {
        Ok(overrides) => {
            info!(path = %path.display(), "loaded hosts from JSON file");
            overrides.apply(postgres, redshift)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "error reading hosts JSON file");
            HostOverrides::default().apply(postgres, redshift)
        }
    }
}
