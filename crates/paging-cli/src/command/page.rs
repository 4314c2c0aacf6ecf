//! `page`: fetches a single page and prints it as JSON.

use paging_core::{
    CancellationToken, CursorPageRequest, CursorPaging, OffsetPageRequest, OffsetPaging,
    PagingConfig, Strategy,
};
use paging_postgres::PgClient;

use crate::config::PageArgs;

pub(super) async fn run(
    client: &PgClient,
    paging: PagingConfig,
    args: &PageArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let json = match args.strategy {
        Strategy::Offset => {
            let request = OffsetPageRequest::new(args.number, args.page_size);
            let page = OffsetPaging::with_config(client.clone(), paging)
                .select(request, cancel)
                .await?;
            serde_json::to_string_pretty(&page)?
        }
        Strategy::Cursor => {
            let request = CursorPageRequest::after(args.page_size, args.cursor.as_str());
            let page = CursorPaging::with_config(client.clone(), paging)
                .select(&request, cancel)
                .await?;
            serde_json::to_string_pretty(&page)?
        }
    };

    println!("{json}");
    Ok(())
}
