// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Run mode, listen port and server version are environment-driven
//! (`RUN_MODE`, `PORT`, `DEV_MCP_VERSION`); the command line only controls
//! logging.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `mcpshim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mcpshim",
    version,
    about = "Supervise a dev MCP server: stdio passthrough, or a background child with an HTTP health surface.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MCPSHIM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
