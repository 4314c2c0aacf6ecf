//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── postgres: PgConfig      # Connection URL and pool settings
//! ├── paging: PagingConfig    # Per-round-trip deadline
//! ├── log: LogConfig          # Log output format
//! └── command: Command        # bench | seed | drain | page
//! ```
//!
//! Every global option can also be provided through its environment variable.
//!
//! # Example
//!
//! ```bash
//! paging-cli --postgres-url "postgresql://..." bench --case 100:10000 --iterations 5
//!
//! POSTGRES_URL="postgresql://..." paging-cli drain --strategy cursor --page-size 500
//! ```

mod bench;
mod telemetry;

use std::process;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use paging_core::{PagingConfig, Strategy};
use paging_postgres::PgConfig;

pub use self::bench::{BenchCase, BenchConfig, OutputFormat};
pub use self::telemetry::{LogConfig, LogFormat};
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "paging-cli")]
#[command(about = "Offset vs. cursor pagination benchmark over PostgreSQL")]
#[command(version)]
pub struct Cli {
    /// PostgreSQL connection and pool configuration.
    #[clap(flatten)]
    pub postgres: PgConfig,

    /// Engine configuration.
    #[clap(flatten)]
    pub paging: PagingConfig,

    /// Logging configuration.
    #[clap(flatten)]
    pub log: LogConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Harness commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Seeds each case, then times full drains of both engines.
    Bench(BenchConfig),
    /// Resets the table and inserts `total` generated rows.
    Seed(SeedArgs),
    /// Drains the table with one engine and prints a summary.
    Drain(DrainArgs),
    /// Fetches and prints a single page.
    Page(PageArgs),
}

/// Arguments of `seed`.
#[derive(Debug, Clone, Args)]
pub struct SeedArgs {
    /// Number of rows to insert.
    #[arg(long)]
    pub total: i64,
}

/// Arguments of `drain`.
#[derive(Debug, Clone, Args)]
pub struct DrainArgs {
    /// Engine to drain with (offset or cursor).
    #[arg(long)]
    pub strategy: Strategy,

    /// Rows per page.
    #[arg(long)]
    pub page_size: i64,

    /// Summary format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments of `page`.
#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// Engine to query (offset or cursor).
    #[arg(long)]
    pub strategy: Strategy,

    /// Rows per page.
    #[arg(long)]
    pub page_size: i64,

    /// 1-indexed page number, used by the offset engine.
    #[arg(long, default_value_t = 1)]
    pub number: i64,

    /// Continuation token, used by the cursor engine; empty starts at the beginning.
    #[arg(long, default_value = "")]
    pub cursor: String,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded first so clap's `env` fallbacks can see it.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.postgres
            .validate()
            .context("invalid postgres configuration")?;

        self.paging
            .validate()
            .map_err(|e| anyhow!(e))
            .context("invalid paging configuration")?;

        if let Command::Bench(bench) = &self.command {
            bench.validate().context("invalid bench configuration")?;
        }

        Ok(())
    }

    /// Logs configuration without sensitive information.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            postgres_url = %self.postgres.masked_url(),
            pool_size = self.postgres.pool_size,
            checkout_timeout_secs = self.postgres.checkout_timeout_secs,
            recycle_timeout_secs = ?self.postgres.recycle_timeout_secs,
            statement_timeout_secs = ?self.paging.statement_timeout_secs,
            "Database configuration"
        );
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
