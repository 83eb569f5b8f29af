//! Command-line adapter.
//!
//! - [`command`] - clap definitions
//! - [`serve`] - `tokenpulse serve`
//! - [`predict`] - `tokenpulse predict`
//! - [`check`] - `tokenpulse check ...`
//! - [`output`] - Terminal and JSON-line output

pub mod check;
pub mod command;
pub mod output;
pub mod predict;
pub mod serve;

use std::process::ExitCode;

pub use command::{Cli, Commands};

use crate::error::Result;
use command::CheckCommand;

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns configuration, startup and server errors; a failed prediction
/// cycle is reported through the exit code instead.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Serve(args) => serve::execute(&args).await.map(|()| ExitCode::SUCCESS),
        Commands::Predict(args) => predict::execute(&args).await,
        Commands::Check(CheckCommand::Config(args)) => {
            check::config::execute_config(args.config.as_deref()).map(|()| ExitCode::SUCCESS)
        }
    }
}
