//! Row store contract consumed by the pagination engines.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::{PagingConfig, PagingError, PagingResult};

/// Trait for rows that carry a monotonically assigned integer identifier.
///
/// Both engines order by this identifier and the cursor engine encodes it
/// into continuation tokens.
pub trait HasId {
    /// Returns the row identifier.
    fn id(&self) -> i64;
}

impl<T: HasId + ?Sized> HasId for &T {
    fn id(&self) -> i64 {
        (**self).id()
    }
}

/// Backing table of a paginated result set.
///
/// Implementations execute one statement per call and own no pagination
/// logic. Rows are always returned in ascending identifier order.
pub trait RowStore: Send + Sync {
    /// Row type produced by the store.
    type Row: HasId + Send;

    /// Error type reported by the store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns the total number of rows.
    fn count(&self) -> impl Future<Output = Result<i64, Self::Error>> + Send;

    /// Returns at most `limit` rows with an identifier greater than `after_id`.
    ///
    /// `None` starts from the smallest identifier.
    fn select_range(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<Self::Row>, Self::Error>> + Send;

    /// Returns at most `limit` rows after skipping the first `offset` rows.
    fn select_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<Vec<Self::Row>, Self::Error>> + Send;

    /// Returns whether a store error is worth retrying.
    fn is_transient(_error: &Self::Error) -> bool {
        false
    }
}

/// Runs one row store call, honoring the cancellation token and the
/// per-round-trip deadline.
///
/// A token that is already cancelled fails without polling the call. When the
/// token fires mid-flight the call future is dropped, which aborts the
/// statement on the client side.
pub(crate) async fn round_trip<S, T, F>(
    config: &PagingConfig,
    cancel: &CancellationToken,
    call: F,
) -> PagingResult<T>
where
    S: RowStore,
    F: Future<Output = Result<T, S::Error>>,
{
    if cancel.is_cancelled() {
        return Err(PagingError::Cancelled);
    }

    let deadline = config.statement_timeout();
    let guarded = async {
        let outcome = match deadline {
            Some(deadline) => tokio::time::timeout(deadline, call)
                .await
                .map_err(|_| PagingError::Timeout(deadline)),
            None => Ok(call.await),
        };

        outcome.and_then(|result| {
            result.map_err(|error| {
                let transient = S::is_transient(&error);
                PagingError::store(error, transient)
            })
        })
    };

    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(PagingError::Cancelled),
        result = guarded => result,
    }
}
