//! # sqlexpose - Public Exposure Checks for Postgres and Redshift
//!
//! sqlexpose sends each configured host a login attempt with credentials that
//! cannot exist and classifies how the attempt fails. A server that rejects the
//! credentials has shown it answers authentication requests from wherever the
//! probe runs, so it is reported as exposed.
//!
//! ## Features
//!
//! - **Exposure Verdicts**: Exposed, unreachable, timed out, unexpectedly
//!   connected, or indeterminate with the driver message kept for follow-up
//! - **CI Friendly**: Configured from environment variables, writes a GitHub
//!   step summary, optional non-zero exit on findings
//! - **Artifacts**: Markdown summary and a JSON result list
//! - **Webhook Delivery**: Best-effort POST of the results
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use sqlexpose::probe::{ExposureProbe, PgConnector};
//! use sqlexpose::types::{DbType, Port, Target};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let probe = ExposureProbe::new(PgConnector::new(), Duration::from_secs(5), "prefer");
//!     let target = Target::new("10.0.0.5", Port::POSTGRES, DbType::Postgres);
//!
//!     let result = probe.probe(&target).await;
//!     println!("{} is {}", result.host, result.status);
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Run configuration and host list resolution
//! - [`probe`] - Connection attempts and verdict classification
//! - [`output`] - Markdown and JSON rendering
//! - [`report`] - Artifact files, step summary and webhook delivery
//! - [`types`] - Core type definitions
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod probe;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{CliError, ConfigError, ReportError};
pub use probe::{ExposureProbe, ProbeResult, Verdict};
pub use types::{DbType, Port, Target};
