//! `drain`: walks the whole table with one engine.

use std::time::Instant;

use paging_core::{
    CancellationToken, CursorPaging, DrainPages, OffsetPaging, PagingConfig, Strategy,
};
use paging_postgres::prelude::*;

use crate::config::DrainArgs;
use crate::report::DrainReport;

pub(super) async fn run(
    client: &PgClient,
    paging: PagingConfig,
    args: &DrainArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let started = Instant::now();

    let users = match args.strategy {
        Strategy::Offset => {
            let engine = OffsetPaging::with_config(client.clone(), paging);
            drain(&engine, args.page_size, cancel).await?
        }
        Strategy::Cursor => {
            let engine = CursorPaging::with_config(client.clone(), paging);
            drain(&engine, args.page_size, cancel).await?
        }
    };

    let report = DrainReport {
        strategy: args.strategy,
        page_size: args.page_size,
        rows: users.len(),
        first_id: users.first().map(|user| user.id),
        last_id: users.last().map(|user| user.id),
        elapsed: started.elapsed(),
    };

    println!("{}", report.render(args.format)?);
    Ok(())
}

async fn drain<D>(
    engine: &D,
    page_size: i64,
    cancel: &CancellationToken,
) -> anyhow::Result<Vec<User>>
where
    D: DrainPages<Row = User>,
{
    Ok(engine.select_all(page_size, cancel).await?)
}
