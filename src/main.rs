// sqlexpose - public exposure checks for Postgres and Redshift endpoints

use anyhow::Context;
use clap::Parser;
use sqlexpose::cli::Cli;
use sqlexpose::logging;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    cli.execute().await.context("sqlexpose failed")
}
