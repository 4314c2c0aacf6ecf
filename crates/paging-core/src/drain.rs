//! Drain orchestration shared by both engines.
//!
//! A drain walks every page in order on a single logical caller, one page at
//! a time, and concatenates the content. The first error aborts the drain and
//! nothing collected so far is returned.

use std::future::Future;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use tokio_util::sync::CancellationToken;

use crate::page::capacity_hint;
use crate::{PagingError, PagingResult, TRACING_TARGET_DRAIN};

/// Pagination strategy of an engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Page number and size, `LIMIT`/`OFFSET` on the store.
    Offset,
    /// Continuation token, keyed range scan on the store.
    Cursor,
}

/// Engines that can fetch every page of the result set in one call.
pub trait DrainPages {
    /// Row type produced by the drain.
    type Row;

    /// Returns the strategy used by this engine.
    fn strategy(&self) -> Strategy;

    /// Fetches every page of `page_size` rows and concatenates them in order.
    fn select_all(
        &self,
        page_size: i64,
        cancel: &CancellationToken,
    ) -> impl Future<Output = PagingResult<Vec<Self::Row>>> + Send;
}

/// Accumulator for the rows of a single drain.
///
/// Sized from the first page's `total_elements`.
pub(crate) struct Drain<T> {
    strategy: Strategy,
    page_size: i64,
    content: Option<Vec<T>>,
    pages: usize,
    started: Instant,
}

impl<T> Drain<T> {
    /// Starts a new drain.
    pub fn start(strategy: Strategy, page_size: i64) -> Self {
        tracing::debug!(
            target: TRACING_TARGET_DRAIN,
            strategy = %strategy,
            page_size,
            "Starting drain"
        );

        Self {
            strategy,
            page_size,
            content: None,
            pages: 0,
            started: Instant::now(),
        }
    }

    /// Appends the content of the next page.
    pub fn push(&mut self, total_elements: i64, rows: Vec<T>) {
        let content = self
            .content
            .get_or_insert_with(|| Vec::with_capacity(capacity_hint(total_elements)));
        content.extend(rows);
        self.pages += 1;
    }

    /// Aborts the drain, discarding everything collected so far.
    pub fn abort(self, error: PagingError) -> PagingError {
        tracing::warn!(
            target: TRACING_TARGET_DRAIN,
            strategy = %self.strategy,
            page_size = self.page_size,
            pages = self.pages,
            elapsed = ?self.started.elapsed(),
            error = %error,
            "Drain aborted"
        );

        error
    }

    /// Completes the drain and returns the accumulated rows.
    pub fn finish(self) -> Vec<T> {
        let content = self.content.unwrap_or_default();

        tracing::debug!(
            target: TRACING_TARGET_DRAIN,
            strategy = %self.strategy,
            page_size = self.page_size,
            pages = self.pages,
            rows = content.len(),
            elapsed = ?self.started.elapsed(),
            "Drain completed"
        );

        content
    }
}
