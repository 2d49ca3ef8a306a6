//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `sqlexpose scan` - Probe the configured hosts (the default)
//! - `sqlexpose classify <message>` - Classify a driver error message offline
//! - `sqlexpose render <results>` - Rebuild the summary from a JSON artifact

mod classify;
mod render;
mod scan;

pub use classify::ClassifyCommand;
pub use render::RenderCommand;
pub use scan::ScanCommand;

use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// sqlexpose - find Postgres and Redshift endpoints reachable from the internet.
///
/// Each host is sent a login with credentials that cannot exist. A server that
/// rejects them has proven it answers authentication requests, so it is
/// reported as exposed.
#[derive(Parser, Debug)]
#[command(name = "sqlexpose")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Detects publicly reachable Postgres and Redshift endpoints", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Scan options when no subcommand is given; ignored otherwise
    #[command(flatten)]
    pub scan: ScanCommand,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe the configured hosts for exposure
    #[command(alias = "s")]
    Scan(ScanCommand),

    /// Classify a driver error message
    #[command(alias = "c")]
    Classify(ClassifyCommand),

    /// Render the markdown summary from a saved results file
    #[command(alias = "r")]
    Render(RenderCommand),
}

impl Cli {
    /// Dispatch to the selected subcommand.
    pub async fn execute(self) -> CliResult<ExitCode> {
        let scan = match self.command {
            Some(Commands::Classify(cmd)) => {
                cmd.execute();
                return Ok(ExitCode::SUCCESS);
            }
            Some(Commands::Render(cmd)) => {
                cmd.execute(self.quiet)?;
                return Ok(ExitCode::SUCCESS);
            }
            Some(Commands::Scan(cmd)) => cmd,
            None => self.scan,
        };

        let results = scan.execute(self.verbose, self.quiet).await?;
        if scan.should_fail(&results) {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    }
}
