#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod report;
mod shutdown;
mod telemetry;

use std::process;

use anyhow::Context;
use paging_core::CancellationToken;
use paging_postgres::{PgClient, PgClientMigrationExt};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "paging_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "paging_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "paging_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "paging_cli::command";
pub const TRACING_TARGET_BENCH: &str = "paging_cli::bench";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.log.log_format)?;
    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting paging benchmark"
    );

    cli.log();
    cli.validate()?;

    let client = connect(&cli).await?;

    let cancel = CancellationToken::new();
    let watcher = shutdown::spawn_signal_watcher(cancel.clone());

    let result = command::run(&cli.command, &client, cli.paging, &cancel).await;

    cancel.cancel();
    if let Err(error) = watcher.await {
        tracing::warn!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "signal watcher failed"
        );
    }

    client.close();
    result
}

/// Connects to the database and brings the schema up to date.
async fn connect(cli: &Cli) -> anyhow::Result<PgClient> {
    let client = PgClient::new_with_test(cli.postgres.clone())
        .await
        .context("failed to connect to postgres")?;

    let migrations = client
        .run_pending_migrations()
        .await
        .context("failed to run migrations")?;

    tracing::info!(
        target: TRACING_TARGET_STARTUP,
        applied = migrations.processed_versions.len(),
        duration = ?migrations.duration,
        "database ready"
    );

    client
        .verify_schema_integrity()
        .await
        .context("schema verification failed")?;

    Ok(client)
}
