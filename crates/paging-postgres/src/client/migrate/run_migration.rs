use std::time::Instant;

use diesel::migration::MigrationSource;
use diesel::pg::Pg;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::pooled_connection::PoolableConnection;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use super::{MigrationResult, MigrationStatus};
use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Applies every embedded migration that the database has not seen yet.
///
/// Diesel's migration harness is synchronous, so it runs on the blocking pool
/// over an [`AsyncConnectionWrapper`].
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<MigrationResult> {
    let start_time = Instant::now();
    let mut conn = pg.get_connection().await?;
    let initial_status = get_migration_status(&mut conn).await?;

    if initial_status.is_up_to_date() {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            applied = initial_status.applied_migrations(),
            "Database schema is up to date"
        );
        return Ok(MigrationResult::new(start_time.elapsed(), vec![]));
    }

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        pending = initial_status.pending_migrations(),
        "Applying pending migrations"
    );

    if conn.is_broken() {
        tracing::warn!(target: TRACING_TARGET_MIGRATION, "Connection is broken before migrations");
    }

    let mut conn: AsyncConnectionWrapper<_> = conn.into_inner().into();
    let outcome = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect::<Vec<_>>())
    })
    .await;

    let duration = start_time.elapsed();
    let versions = outcome
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Migration task panicked"
            );
            PgError::Migration(err.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Database migration failed"
            );
            PgError::Migration(err)
        })?;

    tracing::info!(
        target: TRACING_TARGET_MIGRATION,
        duration = ?duration,
        applied = versions.len(),
        "Database migrations applied"
    );

    Ok(MigrationResult::new(duration, versions))
}

/// Compares the embedded migrations with the ones recorded in the database.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn get_migration_status(conn: &mut AsyncPgConnection) -> PgResult<MigrationStatus> {
    let applied_versions = if migration_table_exists(conn).await? {
        get_applied_migrations(conn).await?
    } else {
        Vec::new()
    };

    let pending_versions: Vec<String> = embedded_versions()?
        .into_iter()
        .filter(|version| !applied_versions.contains(version))
        .collect();

    let status = MigrationStatus::new(applied_versions, pending_versions);

    tracing::debug!(
        target: TRACING_TARGET_MIGRATION,
        applied = status.applied_migrations(),
        pending = status.pending_migrations(),
        "Migration status retrieved"
    );

    Ok(status)
}

/// Checks that migrations have run and the `users` table exists.
#[tracing::instrument(skip(conn), target = TRACING_TARGET_MIGRATION)]
pub async fn verify_schema_integrity(conn: &mut AsyncPgConnection) -> PgResult<()> {
    if !migration_table_exists(conn).await? {
        tracing::warn!(target: TRACING_TARGET_MIGRATION, "Migration table does not exist");
        return Err(PgError::Migration(
            "Migration table __diesel_schema_migrations does not exist".into(),
        ));
    }

    if !table_exists(conn, "users").await? {
        return Err(PgError::Migration("Table users does not exist".into()));
    }

    tracing::debug!(target: TRACING_TARGET_MIGRATION, "Database schema integrity verified");
    Ok(())
}

/// Lists applied migration versions, oldest first.
pub async fn get_applied_migrations(conn: &mut AsyncPgConnection) -> PgResult<Vec<String>> {
    #[derive(diesel::QueryableByName)]
    struct MigrationVersion {
        #[diesel(sql_type = diesel::sql_types::Text)]
        version: String,
    }

    let versions =
        diesel::sql_query("SELECT version FROM __diesel_schema_migrations ORDER BY version")
            .get_results::<MigrationVersion>(conn)
            .await
            .map_err(|e| {
                PgError::Migration(format!("Failed to get applied migrations: {e}").into())
            })?
            .into_iter()
            .map(|row| row.version)
            .collect();

    Ok(versions)
}

/// Versions of the migrations embedded in this crate, oldest first.
fn embedded_versions() -> PgResult<Vec<String>> {
    let mut versions: Vec<String> = MigrationSource::<Pg>::migrations(&MIGRATIONS)
        .map_err(PgError::Migration)?
        .iter()
        .map(|migration| migration.name().version().to_string())
        .collect();

    versions.sort();
    Ok(versions)
}

async fn migration_table_exists(conn: &mut AsyncPgConnection) -> PgResult<bool> {
    table_exists(conn, "__diesel_schema_migrations").await
}

async fn table_exists(conn: &mut AsyncPgConnection, table: &str) -> PgResult<bool> {
    #[derive(diesel::QueryableByName)]
    struct ExistsResult {
        #[diesel(sql_type = diesel::sql_types::Bool)]
        exists: bool,
    }

    let result = diesel::sql_query(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema() AND table_name = $1
         ) AS exists",
    )
    .bind::<diesel::sql_types::Text, _>(table)
    .get_result::<ExistsResult>(conn)
    .await
    .map_err(|e| PgError::Migration(format!("Failed to check table {table}: {e}").into()))?;

    Ok(result.exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_users_migration() -> PgResult<()> {
        let versions = embedded_versions()?;
        assert_eq!(versions, vec!["20240601000000".to_string()]);
        Ok(())
    }
}
