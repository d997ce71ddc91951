//! # Teller
//!
//! Command line front end: parses configuration, builds the application graph
//! and runs one command against it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use human_panic::setup_panic;
use tracing::Level;

use teller::application::container::AppGraph;
use teller::interfaces::cli::{commands, Cli};
use teller::utils::init_cli_logger;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_panic!();
    let cli = Cli::parse();
    init_cli_logger(if cli.verbose { Level::DEBUG } else { Level::WARN });

    let graph = AppGraph::build(&cli.app_args).await?;
    if commands::run(&graph, cli.command).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
