//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Token price dashboard backend: inference gateway and prediction cycle
#[derive(Parser, Debug)]
#[command(name = "tokenpulse")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the gateway (inference proxy and static bundle)
    Serve(ServeArgs),

    /// Run one prediction cycle and print the dataset
    Predict(PredictArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `tokenpulse check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration (file, defaults and environment overrides).
    Config(ConfigPathArg),
}

/// Optional configuration file path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file; defaults apply when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for `tokenpulse serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listening port (overrides the file and `PORT`).
    #[arg(long)]
    pub port: Option<u16>,

    /// Log filter directive, e.g. `debug` or `tokenpulse=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub json_logs: bool,
}

/// Arguments for `tokenpulse predict`.
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Token whose forecast is shown in detail; defaults to the first one.
    #[arg(long)]
    pub token: Option<String>,

    /// Print the dataset as JSON.
    #[arg(long)]
    pub json: bool,

    /// Log filter directive.
    #[arg(long)]
    pub log_level: Option<String>,
}
