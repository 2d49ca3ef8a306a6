//! Classify subcommand implementation.
//!
//! Handles `sqlexpose classify <MESSAGE>`, which runs a raw driver error
//! message through the verdict patterns without touching the network.

use crate::probe::{classify_message, Verdict};
use clap::Parser;
use console::style;

/// Classify a driver error message.
#[derive(Parser, Debug, Clone)]
pub struct ClassifyCommand {
    /// Error text as reported by the database driver
    #[arg(value_name = "MESSAGE", required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl ClassifyCommand {
    /// Classify the message. Words are joined with single spaces.
    pub fn verdict(&self) -> Verdict {
        classify_message(&self.message.join(" "))
    }

    /// Execute the classify command.
    pub fn execute(&self) {
        let verdict = self.verdict();
        let exposed = if verdict.is_exposed() {
            style("yes").red().bold()
        } else {
            style("no").green()
        };

        println!("{} {}", style("Status:").bold(), verdict.status());
        println!("{} {}", style("Exposed:").bold(), exposed);
        if !verdict.error().is_empty() {
            println!("{} {}", style("Error:").bold(), verdict.error());
        }
    }
}
