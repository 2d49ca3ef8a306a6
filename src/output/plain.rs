//! Plain text terminal output.
//!
//! Styled status lines for humans. Machine-readable output goes through the
//! markdown and JSON renderers instead.

use crate::probe::ProbeResult;
use console::style;

/// Print a banner before probing begins.
pub fn print_scan_header(postgres: usize, redshift: usize, ssl_mode: &str, timeout_secs: u64) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("sqlexpose").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Targets: {} postgres, {} redshift",
        style("•").dim(),
        style(postgres).white().bold(),
        style(redshift).white().bold()
    );
    println!(
        "{} TLS mode: {}, timeout: {}s",
        style("•").dim(),
        style(ssl_mode).yellow(),
        timeout_secs
    );
    println!();
}

/// Print a one-line tally of the results.
pub fn print_tally(results: &[ProbeResult]) {
    let exposed = results.iter().filter(|r| r.exposed).count();
    if exposed > 0 {
        print_warning(&format!(
            "{} of {} endpoints answered authentication requests",
            exposed,
            results.len()
        ));
    } else {
        print_success(&format!("No exposed endpoints among {} probed", results.len()));
    }
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
