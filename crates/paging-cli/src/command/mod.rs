//! Harness commands.

mod bench;
mod drain;
mod page;
mod seed;

use paging_core::{CancellationToken, PagingConfig};
use paging_postgres::PgClient;

use crate::config::Command;

/// Runs `command` against `client` until it completes or `cancel` fires.
pub async fn run(
    command: &Command,
    client: &PgClient,
    paging: PagingConfig,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    match command {
        Command::Bench(config) => bench::run(client, paging, config, cancel).await,
        Command::Seed(args) => seed::run(client, args, cancel).await,
        Command::Drain(args) => drain::run(client, paging, args, cancel).await,
        Command::Page(args) => page::run(client, paging, args, cancel).await,
    }
}
