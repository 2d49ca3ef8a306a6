//! Logging configuration using tracing.
//!
//! Logs go to stderr so stdout only carries the summary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the default log level from the verbosity flags.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the flags when set.
pub fn init(verbose: bool, quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(verbose)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
