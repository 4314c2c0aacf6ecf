//! Cursor pagination engine.

use tokio_util::sync::CancellationToken;

use super::{CursorPage, CursorPageRequest};
use crate::drain::{Drain, DrainPages, Strategy};
use crate::store::round_trip;
use crate::{PagingConfig, PagingResult, RowStore, TRACING_TARGET_CURSOR};

/// Serves pages with a keyed range scan over a [`RowStore`].
///
/// Each page fetches one lookahead row beyond the requested size to learn
/// whether another page exists without a second data round trip.
#[derive(Debug, Clone)]
pub struct CursorPaging<S> {
    store: S,
    config: PagingConfig,
}

impl<S: RowStore> CursorPaging<S> {
    /// Creates a new engine over the given store.
    pub fn new(store: S) -> Self {
        Self::with_config(store, PagingConfig::default())
    }

    /// Creates a new engine with explicit settings.
    pub fn with_config(store: S, config: PagingConfig) -> Self {
        Self { store, config }
    }

    /// Returns the underlying store.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches a single page.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - The page size is not positive
    /// - The cursor is not empty and not a decimal identifier; the store is
    ///   not queried in that case
    /// - The store fails, the round trip times out, or `cancel` fires
    #[tracing::instrument(
        skip(self, request, cancel),
        target = TRACING_TARGET_CURSOR,
        fields(size = request.size, cursor = %request.cursor)
    )]
    pub async fn select(
        &self,
        request: &CursorPageRequest,
        cancel: &CancellationToken,
    ) -> PagingResult<CursorPage<S::Row>> {
        let fetch_limit = request.fetch_limit()?;
        let after = request.parse_cursor()?;

        let total_elements =
            round_trip::<S, _, _>(&self.config, cancel, self.store.count()).await?;
        let rows = round_trip::<S, _, _>(
            &self.config,
            cancel,
            self.store.select_range(after.map(|c| c.id()), fetch_limit),
        )
        .await?;

        let fetched = rows.len();
        let page = CursorPage::from_lookahead(rows, request.size, total_elements);

        tracing::trace!(
            target: TRACING_TARGET_CURSOR,
            fetched,
            rows = page.size,
            next = %page.cursor_next_page,
            total_elements = page.total_elements,
            "Page served"
        );

        Ok(page)
    }

    /// Follows continuation tokens from the start until one comes back empty
    /// and concatenates every page.
    #[tracing::instrument(skip(self, cancel), target = TRACING_TARGET_CURSOR)]
    pub async fn select_all(
        &self,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> PagingResult<Vec<S::Row>> {
        let mut drain = Drain::start(Strategy::Cursor, page_size);
        let mut request = CursorPageRequest::new(page_size);

        loop {
            let page = match self.select(&request, cancel).await {
                Ok(page) => page,
                Err(error) => return Err(drain.abort(error)),
            };

            let CursorPage {
                content,
                cursor_next_page,
                total_elements,
                ..
            } = page;
            drain.push(total_elements, content);

            if cursor_next_page.is_empty() {
                break;
            }

            request.cursor = cursor_next_page;
        }

        Ok(drain.finish())
    }
}

impl<S: RowStore> DrainPages for CursorPaging<S> {
    type Row = S::Row;

    fn strategy(&self) -> Strategy {
        Strategy::Cursor
    }

    async fn select_all(
        &self,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> PagingResult<Vec<Self::Row>> {
        CursorPaging::select_all(self, page_size, cancel).await
    }
}
