//! Database query repositories.
//!
//! [`UserRepository`] holds the statements against the `users` table, and
//! [`PgClient`] also implements [`paging_core::RowStore`] on top of it so both
//! paging engines can run directly over the pool.
//!
//! [`PgClient`]: crate::PgClient

mod row_store;
mod user;

pub use user::{BULK_INSERT_CHUNK_SIZE, UserRepository};
