//! Offset pagination engine.

use tokio_util::sync::CancellationToken;

use super::{OffsetPage, OffsetPageRequest};
use crate::drain::{Drain, DrainPages, Strategy};
use crate::store::round_trip;
use crate::{PagingConfig, PagingResult, RowStore, TRACING_TARGET_OFFSET};

/// Serves pages with `LIMIT`/`OFFSET` over a [`RowStore`].
///
/// Every page costs two round trips: the row count, then the page itself.
/// The engine keeps no position state; drains carry theirs in locals.
#[derive(Debug, Clone)]
pub struct OffsetPaging<S> {
    store: S,
    config: PagingConfig,
}

impl<S: RowStore> OffsetPaging<S> {
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
    /// A page number past the end yields an empty page, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    ///
    /// - The page size or the page number is not positive
    /// - The store fails, the round trip times out, or `cancel` fires
    #[tracing::instrument(
        skip(self, cancel),
        target = TRACING_TARGET_OFFSET,
        fields(number = request.number, size = request.size)
    )]
    pub async fn select(
        &self,
        request: OffsetPageRequest,
        cancel: &CancellationToken,
    ) -> PagingResult<OffsetPage<S::Row>> {
        let offset = request.offset()?;

        let total_elements =
            round_trip::<S, _, _>(&self.config, cancel, self.store.count()).await?;
        let content = round_trip::<S, _, _>(
            &self.config,
            cancel,
            self.store.select_page(request.size, offset),
        )
        .await?;

        let page = OffsetPage::new(content, request, total_elements);

        tracing::trace!(
            target: TRACING_TARGET_OFFSET,
            offset,
            rows = page.size,
            total_elements = page.total_elements,
            total_pages = page.total_pages,
            "Page served"
        );

        Ok(page)
    }

    /// Fetches pages `1, 2, 3, ...` until the last one and concatenates them.
    ///
    /// Stops when the current page reports an empty store or its own number
    /// reaches its own page count, so every page is fetched exactly once.
    #[tracing::instrument(skip(self, cancel), target = TRACING_TARGET_OFFSET)]
    pub async fn select_all(
        &self,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> PagingResult<Vec<S::Row>> {
        let mut drain = Drain::start(Strategy::Offset, page_size);
        let mut request = OffsetPageRequest::first(page_size);

        loop {
            let page = match self.select(request, cancel).await {
                Ok(page) => page,
                Err(error) => return Err(drain.abort(error)),
            };

            let is_last = page.is_last();
            drain.push(page.total_elements, page.content);

            if is_last {
                break;
            }

            request = request.next();
        }

        Ok(drain.finish())
    }
}

impl<S: RowStore> DrainPages for OffsetPaging<S> {
    type Row = S::Row;

    fn strategy(&self) -> Strategy {
        Strategy::Offset
    }

    async fn select_all(
        &self,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> PagingResult<Vec<Self::Row>> {
        OffsetPaging::select_all(self, page_size, cancel).await
    }
}
