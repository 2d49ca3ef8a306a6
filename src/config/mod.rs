//! Configuration for a scan run.
//!
//! Provides the immutable [`ScanConfig`] and host list resolution.

pub mod hosts;
mod settings;

pub use hosts::{parse_hosts, HostLists, HostOverrides};
pub use settings::ScanConfig;
