//! Embedded schema migrations.

mod migrate_result;
mod run_migration;

use std::future::Future;

pub use migrate_result::{MigrationResult, MigrationStatus};
pub use run_migration::{
    get_applied_migrations, get_migration_status, run_pending_migrations, verify_schema_integrity,
};

use crate::{PgClient, PgResult};

/// Migration helpers available directly on [`PgClient`].
pub trait PgClientMigrationExt {
    /// Applies all pending migrations; safe to call on every start-up.
    fn run_pending_migrations(&self) -> impl Future<Output = PgResult<MigrationResult>> + Send;

    /// Returns the applied and pending migrations.
    fn get_migration_status(&self) -> impl Future<Output = PgResult<MigrationStatus>> + Send;

    /// Checks that the schema the row store relies on is in place.
    fn verify_schema_integrity(&self) -> impl Future<Output = PgResult<()>> + Send;
}

impl PgClientMigrationExt for PgClient {
    async fn run_pending_migrations(&self) -> PgResult<MigrationResult> {
        run_pending_migrations(self).await
    }

    async fn get_migration_status(&self) -> PgResult<MigrationStatus> {
        let mut conn = self.get_connection().await?;
        get_migration_status(&mut conn).await
    }

    async fn verify_schema_integrity(&self) -> PgResult<()> {
        let mut conn = self.get_connection().await?;
        verify_schema_integrity(&mut conn).await
    }
}
