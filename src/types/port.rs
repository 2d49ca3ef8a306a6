//! Port newtype with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Default Postgres listener port.
    pub const POSTGRES: Port = Port(5432);
    /// Default Redshift listener port.
    pub const REDSHIFT: Port = Port(5439);

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port == 0 {
            None
        } else {
            Some(Self(port))
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let value: u16 = s
            .parse()
            .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
        Self::try_from(value)
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_port_from_str() {
        assert_eq!("5432".parse::<Port>().unwrap(), Port::POSTGRES);
        assert_eq!(" 5439 ".parse::<Port>().unwrap(), Port::REDSHIFT);
        assert_eq!("0".parse::<Port>(), Err(PortError::OutOfRange(0)));
        assert!(matches!(
            "postgres".parse::<Port>(),
            Err(PortError::InvalidFormat(_))
        ));
        assert!("70000".parse::<Port>().is_err());
    }

    #[test]
    fn test_port_serializes_as_number() {
        let json = serde_json::to_string(&Port::POSTGRES).unwrap();
        assert_eq!(json, "5432");
        let parsed: Port = serde_json::from_str("5439").unwrap();
        assert_eq!(parsed, Port::REDSHIFT);
        assert!(serde_json::from_str::<Port>("0").is_err());
    }
}
