//! Prelude module for paging-postgres.
//!
//! Re-exports the client, the repository trait and the models, so a single
//! `use` is enough to seed the table and page through it.
//!
//! # Example
//!
//! ```rust,no_run
//! use paging_postgres::prelude::*;
//!
//! # async fn example() -> PgResult<()> {
//! let client = PgConfig::new("postgresql://localhost/paging").build()?;
//! client.run_pending_migrations().await?;
//! client.create_random_users(1_000).await?;
//! # Ok(())
//! # }
//! ```

pub use crate::model::{NewUser, User};
pub use crate::query::UserRepository;
pub use crate::{PgClient, PgClientMigrationExt, PgConfig, PgError, PgResult};
