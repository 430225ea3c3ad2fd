// src/errors.rs

//! Crate-wide error types.
//!
//! Most fallible paths propagate `anyhow` with context; configuration
//! resolution has its own structured error so bad settings can be reported
//! before anything is spawned.

use thiserror::Error;

pub use anyhow::{Error, Result};

/// Errors produced while resolving the launch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown RUN_MODE '{0}' (expected \"stdio\" or \"web\")")]
    UnknownRunMode(String),

    #[error("invalid PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}
