//! User repository for the paged table.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;

use crate::model::{NewUser, User};
use crate::{PgClient, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Number of rows inserted per statement by [`UserRepository::create_random_users`].
///
/// Keeps a single `INSERT` below PostgreSQL's limit of 65535 bind parameters.
pub const BULK_INSERT_CHUNK_SIZE: usize = 10_000;

/// Repository for `users` table operations.
///
/// Reads back rows in ascending identifier order. Writes are used to seed and
/// reset the table between benchmark cases and tests.
pub trait UserRepository {
    /// Inserts a single user and returns it with its assigned identifier.
    fn create_user(&self, new_user: NewUser) -> impl Future<Output = PgResult<User>> + Send;

    /// Inserts `count` users named `User #1` to `User #count`.
    ///
    /// Rows are inserted in chunks of [`BULK_INSERT_CHUNK_SIZE`] within one
    /// transaction, so either all of them land or none do. A non-positive
    /// `count` inserts nothing. Returns the number of inserted rows.
    fn create_random_users(&self, count: i64) -> impl Future<Output = PgResult<usize>> + Send;

    /// Deletes every user and restarts the identifier sequence at 1.
    ///
    /// Both statements run in one transaction: if the sequence cannot be
    /// restarted, the rows are not deleted either.
    ///
    /// Returns the number of deleted rows.
    fn delete_all_users(&self) -> impl Future<Output = PgResult<usize>> + Send;

    /// Counts all users.
    fn count_users(&self) -> impl Future<Output = PgResult<i64>> + Send;

    /// Lists at most `limit` users with an identifier greater than `after_id`.
    fn find_users_after(
        &self,
        after_id: Option<i64>,
        limit: i64,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;

    /// Lists at most `limit` users after skipping the first `offset`.
    fn find_users_page(
        &self,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = PgResult<Vec<User>>> + Send;
}

impl UserRepository for PgClient {
    async fn create_user(&self, new_user: NewUser) -> PgResult<User> {
        let mut conn = self.get_connection().await?;

        use schema::users;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)
    }

    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY)]
    async fn create_random_users(&self, count: i64) -> PgResult<usize> {
        if count <= 0 {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;

        use schema::users;

        let new_users: Vec<NewUser> = (1..=count).map(NewUser::numbered).collect();

        let inserted = conn
            .transaction::<_, PgError, _>(|conn| {
                async move {
                    let mut inserted = 0;

                    for chunk in new_users.chunks(BULK_INSERT_CHUNK_SIZE) {
                        inserted += diesel::insert_into(users::table)
                            .values(chunk)
                            .execute(conn)
                            .await?;

                        tracing::trace!(
                            target: TRACING_TARGET_QUERY,
                            inserted,
                            total = count,
                            "Inserted chunk of users"
                        );
                    }

                    Ok(inserted)
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(target: TRACING_TARGET_QUERY, inserted, "Users created");
        Ok(inserted)
    }

    #[tracing::instrument(skip(self), target = TRACING_TARGET_QUERY)]
    async fn delete_all_users(&self) -> PgResult<usize> {
        let mut conn = self.get_connection().await?;

        use schema::users;

        let deleted = conn
            .transaction::<_, PgError, _>(|conn| {
                async move {
                    let deleted = diesel::delete(users::table).execute(conn).await?;

                    diesel::sql_query("ALTER SEQUENCE users_id_seq RESTART WITH 1")
                        .execute(conn)
                        .await?;

                    Ok(deleted)
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(target: TRACING_TARGET_QUERY, deleted, "Users deleted, sequence reset");
        Ok(deleted)
    }

    async fn count_users(&self) -> PgResult<i64> {
        let mut conn = self.get_connection().await?;

        use schema::users;

        users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(PgError::from)
    }

    async fn find_users_after(&self, after_id: Option<i64>, limit: i64) -> PgResult<Vec<User>> {
        let mut conn = self.get_connection().await?;

        use schema::users::{self, dsl};

        let mut query = users::table
            .select(User::as_select())
            .order(dsl::id.asc())
            .limit(limit)
            .into_boxed();

        if let Some(after_id) = after_id {
            query = query.filter(dsl::id.gt(after_id));
        }

        query.load(&mut conn).await.map_err(PgError::from)
    }

    async fn find_users_page(&self, limit: i64, offset: i64) -> PgResult<Vec<User>> {
        let mut conn = self.get_connection().await?;

        use schema::users::{self, dsl};

        users::table
            .select(User::as_select())
            .order(dsl::id.asc())
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(PgError::from)
    }
}
