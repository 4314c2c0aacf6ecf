//! Pool hooks for the connections the row store checks out.
//!
//! A page statement whose future is dropped mid-flight, by cancellation or by
//! the round-trip deadline, leaves its connection in an unknown protocol
//! state. Such connections are discarded here instead of serving the next
//! page.

use std::time::Instant;

use deadpool::managed::{HookError, HookResult, Metrics};
use diesel::ConnectionResult;
use diesel_async::pooled_connection::{PoolError, PoolableConnection};
use diesel_async::{AsyncConnection, AsyncPgConnection};
use futures::FutureExt;
use futures::future::BoxFuture;

use super::pg_config::mask_url;
use crate::TRACING_TARGET_CONNECTION;

/// Opens a pool connection, logging the masked address and the time taken.
pub fn establish<C>(addr: &str) -> BoxFuture<'_, ConnectionResult<C>>
where
    C: AsyncConnection + 'static,
{
    let started = Instant::now();

    async move {
        let result = C::establish(addr).await;
        let elapsed = started.elapsed();

        if let Err(err) = &result {
            tracing::error!(
                target: TRACING_TARGET_CONNECTION,
                addr = %mask_url(addr),
                ?elapsed,
                error = %err,
                "Failed to open database connection"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET_CONNECTION,
                ?elapsed,
                "Database connection opened"
            );
        }

        result
    }
    .boxed()
}

/// Drops a returned connection before reuse when an abandoned statement broke it.
pub fn discard_broken(conn: &mut AsyncPgConnection, metrics: &Metrics) -> HookResult<PoolError> {
    check_reusable(conn.is_broken(), metrics.recycle_count)
}

fn check_reusable(is_broken: bool, recycle_count: usize) -> HookResult<PoolError> {
    if !is_broken {
        return Ok(());
    }

    tracing::warn!(
        target: TRACING_TARGET_CONNECTION,
        recycle_count,
        "Discarding connection broken by an abandoned statement"
    );

    Err(HookError::Message(
        "connection broken by an abandoned statement".into(),
    ))
}
