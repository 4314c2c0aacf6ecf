//! Row store adapter consumed by the paging engines.

use paging_core::RowStore;

use super::UserRepository;
use crate::model::User;
use crate::{PgClient, PgError, PgResult};

/// Serves the `users` table to [`OffsetPaging`] and [`CursorPaging`].
///
/// Every call checks out its own pooled connection and runs one statement.
///
/// [`OffsetPaging`]: paging_core::OffsetPaging
/// [`CursorPaging`]: paging_core::CursorPaging
impl RowStore for PgClient {
    type Error = PgError;
    type Row = User;

    async fn count(&self) -> PgResult<i64> {
        self.count_users().await
    }

    async fn select_range(&self, after_id: Option<i64>, limit: i64) -> PgResult<Vec<User>> {
        self.find_users_after(after_id, limit).await
    }

    async fn select_page(&self, limit: i64, offset: i64) -> PgResult<Vec<User>> {
        self.find_users_page(limit, offset).await
    }

    fn is_transient(error: &PgError) -> bool {
        error.is_transient()
    }
}
