// src/config.rs

//! Launch configuration resolved once at startup from environment variables.
//!
//! | Name | Default | Effect |
//! |---|---|---|
//! | `RUN_MODE` | `stdio` | `stdio` passthrough or `web` health surface |
//! | `PORT` | `8080` | HTTP listen port (web mode only) |
//! | `DEV_MCP_VERSION` | `latest` | version tag for the wrapped server |
//!
//! Any other `RUN_MODE` value, or an unparsable `PORT`, is a fatal startup
//! error reported before a subprocess is spawned.

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

pub const ENV_RUN_MODE: &str = "RUN_MODE";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MCP_VERSION: &str = "DEV_MCP_VERSION";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MCP_VERSION: &str = "latest";

/// How the wrapped subprocess's I/O is handled.
///
/// - `Stdio`: the child's standard streams are connected directly to the
///   parent's (the MCP protocol passes straight through).
/// - `Web`: the child runs in the background with its output redirected to
///   the diagnostic stream, and an HTTP health/status listener is exposed
///   for platforms that require a listening port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Stdio,
    Web,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Stdio => "stdio",
            RunMode::Web => "web",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RunMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stdio" => Ok(RunMode::Stdio),
            "web" => Ok(RunMode::Web),
            _ => Err(ConfigError::UnknownRunMode(s.to_string())),
        }
    }
}

/// Immutable launch parameters, resolved once before anything is spawned.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub mode: RunMode,
    pub port: u16,
    pub mcp_version: String,
}

impl LaunchConfig {
    /// Resolve from the process environment.
    ///
    /// Empty variables count as unset, matching the usual container idiom of
    /// clearing a setting by exporting `FOO=`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            env::var(ENV_RUN_MODE).ok().filter(|s| !s.is_empty()),
            env::var(ENV_PORT).ok().filter(|s| !s.is_empty()),
            env::var(ENV_MCP_VERSION).ok().filter(|s| !s.is_empty()),
        )
    }

    /// Pure resolution over raw optional values, with defaults applied.
    ///
    /// Kept separate from [`LaunchConfig::from_env`] so tests never have to
    /// mutate the process environment.
    pub fn resolve(
        mode: Option<String>,
        port: Option<String>,
        mcp_version: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mode = match mode {
            Some(raw) => raw.parse()?,
            None => RunMode::Stdio,
        };

        let port = match port {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value: raw, source })?,
            None => DEFAULT_PORT,
        };

        let mcp_version = mcp_version.unwrap_or_else(|| DEFAULT_MCP_VERSION.to_string());

        Ok(Self {
            mode,
            port,
            mcp_version,
        })
    }
}
