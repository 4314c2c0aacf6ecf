//! Log output configuration.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

/// Format of the log lines written to stderr.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines with ANSI colors.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Logging options.
///
/// The level filter itself comes from `RUST_LOG` (default `info`).
#[derive(Debug, Default, Clone, Serialize, Deserialize, Args)]
pub struct LogConfig {
    /// Log output format.
    #[arg(long, env = "PAGING_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,
}
