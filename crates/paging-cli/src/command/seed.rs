//! `seed`: resets the table and fills it with generated rows.

use std::time::Instant;

use anyhow::Context;
use paging_core::CancellationToken;
use paging_postgres::prelude::*;

use crate::TRACING_TARGET_COMMAND;
use crate::config::SeedArgs;

pub(super) async fn run(
    client: &PgClient,
    args: &SeedArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let inserted = reseed(client, args.total, cancel).await?;
    println!("{inserted}");
    Ok(())
}

/// Deletes every row, restarts the identifier sequence and inserts `total` rows.
///
/// Returns the number of rows inserted.
pub(super) async fn reseed(
    client: &PgClient,
    total: i64,
    cancel: &CancellationToken,
) -> anyhow::Result<usize> {
    let started = Instant::now();

    let inserted = cancel
        .run_until_cancelled(async {
            client.delete_all_users().await?;
            client.create_random_users(total).await
        })
        .await
        .context("seeding cancelled")?
        .with_context(|| format!("failed to seed {total} rows"))?;

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        rows = inserted,
        elapsed = ?started.elapsed(),
        "Table seeded"
    );

    Ok(inserted)
}
