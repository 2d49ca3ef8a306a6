//! Exposure classification.
//!
//! Maps the outcome of a bad-credential connection attempt to a [`Verdict`].
//! The pattern lists below are matched against the driver's lowercased error
//! text; their contents and order decide real-world verdicts.

use super::traits::{AttemptOutcome, ConnectFailure};
use std::fmt;

/// The server got far enough into the handshake to reject the credentials.
pub const AUTH_FAILURE_PATTERNS: &[&str] = &[
    "authentication failed",
    "password authentication failed",
    "no password supplied",
    "scram channel binding check failed",
];

/// The endpoint could not be reached at all.
pub const UNREACHABLE_PATTERNS: &[&str] = &[
    "could not connect to server",
    "connection refused",
    "network is unreachable",
    "timeout expired",
    "timed out",
    "name or service not known",
    "ssl syscall error: eof detected",
    "server closed the connection unexpectedly",
];

pub const STATUS_UNEXPECTED_SUCCESS: &str = "Unexpectedly connected";
pub const STATUS_AUTH_REJECTED: &str = "Auth failed (DB EXPOSED)";
pub const STATUS_UNREACHABLE: &str = "Not exposed (host unreachable)";
pub const STATUS_TIMEOUT: &str = "Timeout (Not exposed)";
pub const STATUS_INDETERMINATE: &str = "Other error";

/// Classification of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The fake credentials were accepted.
    UnexpectedSuccess,
    /// The server rejected the credentials: the endpoint is exposed.
    AuthRejected,
    /// The endpoint was not reachable.
    Unreachable,
    /// The connector overran its own timeout and the attempt was abandoned.
    Timeout,
    /// Nothing recognisable; the message is kept for follow-up.
    Indeterminate(String),
}

impl Verdict {
    /// Whether the endpoint answers authentication requests.
    pub fn is_exposed(&self) -> bool {
        matches!(self, Self::AuthRejected)
    }

    /// Human-readable status label.
    pub fn status(&self) -> &'static str {
        match self {
            Self::UnexpectedSuccess => STATUS_UNEXPECTED_SUCCESS,
            Self::AuthRejected => STATUS_AUTH_REJECTED,
            Self::Unreachable => STATUS_UNREACHABLE,
            Self::Timeout => STATUS_TIMEOUT,
            Self::Indeterminate(_) => STATUS_INDETERMINATE,
        }
    }

    /// Diagnostic text, empty for definitive verdicts.
    pub fn error(&self) -> &str {
        match self {
            Self::Indeterminate(message) => message,
            _ => "",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indeterminate(message) => write!(f, "{}: {}", self.status(), message),
            _ => f.write_str(self.status()),
        }
    }
}

/// Classify the outcome of a connection attempt.
pub fn classify(outcome: &AttemptOutcome) -> Verdict {
    match outcome {
        AttemptOutcome::Connected => Verdict::UnexpectedSuccess,
        AttemptOutcome::TimedOut => Verdict::Timeout,
        AttemptOutcome::Failed(ConnectFailure::Driver(message)) => classify_message(message),
        AttemptOutcome::Failed(ConnectFailure::Unexpected(message)) => {
            Verdict::Indeterminate(message.clone())
        }
    }
}

/// Classify a driver error message.
///
/// Auth-failure patterns are checked before unreachable patterns.
pub fn classify_message(message: &str) -> Verdict {
    let message = message.to_lowercase();

    if AUTH_FAILURE_PATTERNS.iter().any(|p| message.contains(p)) {
        Verdict::AuthRejected
    } else if UNREACHABLE_PATTERNS.iter().any(|p| message.contains(p)) {
        Verdict::Unreachable
    } else {
        Verdict::Indeterminate(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver(message: &str) -> AttemptOutcome {
        AttemptOutcome::Failed(ConnectFailure::Driver(message.to_string()))
    }

    #[test]
    fn test_auth_failure_patterns() {
        for message in [
            "FATAL: password authentication failed for user \"notarealuser\"",
            "error returned from database: password authentication failed for user \"notarealuser\"",
            "FATAL:  Authentication Failed",
            "fe_sendauth: no password supplied",
            "SCRAM channel binding check failed",
        ] {
            assert_eq!(classify(&driver(message)), Verdict::AuthRejected, "{message}");
        }
    }

    #[test]
    fn test_unreachable_patterns() {
        for message in [
            "could not connect to server: Connection timed out",
            "error communicating with database: Connection refused (os error 111)",
            "Network is unreachable (os error 101)",
            "timeout expired",
            "failed to lookup address information: Name or service not known",
            "SSL SYSCALL error: EOF detected",
            "server closed the connection unexpectedly",
        ] {
            assert_eq!(classify(&driver(message)), Verdict::Unreachable, "{message}");
        }
    }

    #[test]
    fn test_auth_wins_over_unreachable() {
        let verdict = classify_message("password authentication failed; connection refused");
        assert_eq!(verdict, Verdict::AuthRejected);
    }

    #[test]
    fn test_unrecognised_message_is_lowercased() {
        let verdict = classify(&driver("FATAL: relation does not exist"));
        assert_eq!(
            verdict,
            Verdict::Indeterminate("fatal: relation does not exist".to_string())
        );
        assert_eq!(verdict.status(), STATUS_INDETERMINATE);
        assert_eq!(verdict.error(), "fatal: relation does not exist");
        assert!(!verdict.is_exposed());
    }

    #[test]
    fn test_unexpected_failure_keeps_message() {
        let outcome =
            AttemptOutcome::Failed(ConnectFailure::Unexpected("Invalid SSL Mode".to_string()));
        assert_eq!(
            classify(&outcome),
            Verdict::Indeterminate("Invalid SSL Mode".to_string())
        );
    }

    #[test]
    fn test_unexpected_success() {
        let verdict = classify(&AttemptOutcome::Connected);
        assert_eq!(verdict, Verdict::UnexpectedSuccess);
        assert_eq!(verdict.status(), "Unexpectedly connected");
        assert!(!verdict.is_exposed());
    }

    #[test]
    fn test_timeout() {
        let verdict = classify(&AttemptOutcome::TimedOut);
        assert_eq!(verdict.status(), "Timeout (Not exposed)");
        assert!(!verdict.is_exposed());
        assert_eq!(verdict.error(), "");
    }

    #[test]
    fn test_only_auth_rejection_is_exposed() {
        assert!(Verdict::AuthRejected.is_exposed());
        assert!(!Verdict::Unreachable.is_exposed());
        assert!(!Verdict::Timeout.is_exposed());
        assert!(!Verdict::UnexpectedSuccess.is_exposed());
        assert!(!Verdict::Indeterminate(String::new()).is_exposed());
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::AuthRejected.to_string(), "Auth failed (DB EXPOSED)");
        assert_eq!(
            Verdict::Indeterminate("boom".to_string()).to_string(),
            "Other error: boom"
        );
    }
}
