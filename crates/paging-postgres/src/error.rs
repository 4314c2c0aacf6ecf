//! Error types for database operations.

use std::borrow::Cow;

use deadpool::managed::TimeoutType;
use diesel::result::{ConnectionError, Error};
use diesel_async::pooled_connection::PoolError as DieselPoolError;
use diesel_async::pooled_connection::deadpool::PoolError as DeadpoolError;
use paging_core::PagingError;

/// Type-erased error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for all PostgreSQL row store operations.
///
/// Covers pool checkout, connection, statement and migration failures.
#[derive(Debug, thiserror::Error)]
#[must_use = "database errors should be handled appropriately"]
pub enum PgError {
    /// Invalid configuration parameter.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pool checkout timed out.
    ///
    /// This can occur during connection creation, waiting for available connections,
    /// or connection recycling operations.
    #[error("Database operation timed out ({0:?})")]
    Timeout(TimeoutType),

    /// Failed to establish or maintain a database connection.
    #[error("Database connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// Applying or inspecting embedded migrations failed.
    #[error("Database migration error: {0}")]
    Migration(BoxError),

    /// Statement execution failed.
    #[error("Database query error: {0}")]
    Query(#[from] Error),

    /// Unexpected error occurred.
    #[error("Unexpected error: {0}")]
    Unexpected(Cow<'static, str>),
}

impl PgError {
    /// Returns whether this error indicates a transient failure that might succeed on retry.
    ///
    /// Pool timeouts, broken connections and serialization failures qualify.
    pub fn is_transient(&self) -> bool {
        use diesel::result::DatabaseErrorKind;

        matches!(
            self,
            PgError::Timeout(_)
                | PgError::Connection(ConnectionError::BadConnection(_))
                | PgError::Query(Error::DatabaseError(
                    DatabaseErrorKind::SerializationFailure
                        | DatabaseErrorKind::ClosedConnection,
                    _
                ))
        )
    }
}

impl From<DeadpoolError> for PgError {
    fn from(value: DeadpoolError) -> Self {
        match value {
            DeadpoolError::Timeout(timeout) => Self::Timeout(timeout),
            DeadpoolError::Backend(DieselPoolError::QueryError(error)) => Self::Query(error),
            DeadpoolError::Backend(DieselPoolError::ConnectionError(error)) => {
                Self::Connection(error)
            }
            DeadpoolError::PostCreateHook(err) => {
                tracing::warn!("Unexpected post-create hook error: {}", err);
                Self::Unexpected(err.to_string().into())
            }
            DeadpoolError::NoRuntimeSpecified => {
                tracing::error!("No tokio runtime specified for connection pool");
                Self::Unexpected("No runtime specified".into())
            }
            DeadpoolError::Closed => Self::Connection(ConnectionError::InvalidConnectionUrl(
                "Connection pool is closed".into(),
            )),
        }
    }
}

impl From<PgError> for PagingError {
    fn from(error: PgError) -> Self {
        let transient = error.is_transient();
        PagingError::store(error, transient)
    }
}

/// Specialized [`Result`] type for database operations.
pub type PgResult<T, E = PgError> = Result<T, E>;

#[cfg(test)]
mod tests {
    use paging_core::ErrorKind;

    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(PgError::Timeout(TimeoutType::Wait).is_transient());
        assert!(
            PgError::Connection(ConnectionError::BadConnection("reset".into())).is_transient()
        );
        assert!(!PgError::Query(Error::NotFound).is_transient());
        assert!(!PgError::Config("bad".into()).is_transient());
    }

    #[test]
    fn test_converts_into_store_error() {
        let error: PagingError = PgError::Timeout(TimeoutType::Create).into();
        assert_eq!(error.kind(), ErrorKind::Io);
        assert!(error.is_transient());

        let error: PagingError = PgError::Query(Error::NotFound).into();
        assert!(matches!(error, PagingError::Store { transient: false, .. }));
    }
}
