//! Error types for sqlexpose.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe outcomes are never
//! errors: they are classified into verdicts by [`crate::probe::classify`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading host configuration.
///
/// None of these abort a scan; callers log them and fall back.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid JSON in {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("{0} does not contain a JSON object")]
    NotAnObject(PathBuf),

    #[error("entry {index} of '{key}' is not a string")]
    InvalidEntry { key: String, index: usize },
}

/// Errors raised while publishing scan results.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to write {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Top-level error for subcommand handlers.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ReportResult<T> = Result<T, ReportError>;
pub type CliResult<T> = Result<T, CliError>;
