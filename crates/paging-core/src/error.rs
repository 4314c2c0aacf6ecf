//! Error types shared by both pagination engines.

use std::num::ParseIntError;
use std::time::Duration;

use strum::{AsRefStr, IntoStaticStr};

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Row store adapters report their own error types; the engines keep them
/// as the source of a [`PagingError::Store`].
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Specialized [`Result`] type for paging operations.
pub type PagingResult<T, E = PagingError> = Result<T, E>;

/// Categories of errors that can occur while paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The row store failed, timed out or the operation was cancelled.
    Io,
    /// A continuation token could not be parsed as an identifier.
    MalformedCursor,
    /// The request carried an out-of-range page size or page number.
    InvalidArgument,
}

/// Comprehensive error type for all paging operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "paging errors should be handled appropriately"]
pub enum PagingError {
    /// The row store rejected or failed to execute a statement.
    #[error("Row store error: {source}")]
    Store {
        /// Error reported by the row store adapter.
        #[source]
        source: BoxedError,
        /// Whether the adapter considers the failure retryable.
        transient: bool,
    },

    /// The caller cancelled the operation while a round trip was pending.
    #[error("Paging operation cancelled")]
    Cancelled,

    /// A single round trip to the row store exceeded the configured deadline.
    #[error("Row store round trip exceeded {0:?}")]
    Timeout(Duration),

    /// The continuation token is not the decimal form of an identifier.
    #[error("Malformed cursor {cursor:?}: {source}")]
    MalformedCursor {
        /// The token as received.
        cursor: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// The page size is not a positive integer.
    #[error("Invalid page size {0}: must be at least 1")]
    InvalidPageSize(i64),

    /// The page number is not a positive integer.
    #[error("Invalid page number {0}: must be at least 1")]
    InvalidPageNumber(i64),
}

impl PagingError {
    /// Wraps a row store error.
    pub fn store(source: impl std::error::Error + Send + Sync + 'static, transient: bool) -> Self {
        Self::Store {
            source: Box::new(source),
            transient,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Store { .. } | Self::Cancelled | Self::Timeout(_) => ErrorKind::Io,
            Self::MalformedCursor { .. } => ErrorKind::MalformedCursor,
            Self::InvalidPageSize(_) | Self::InvalidPageNumber(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns whether this error indicates a failure that might succeed on retry.
    ///
    /// Nothing in this crate retries; the flag is for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Store { transient, .. } => *transient,
            Self::Cancelled | Self::Timeout(_) => true,
            Self::MalformedCursor { .. } | Self::InvalidPageSize(_) | Self::InvalidPageNumber(_) => {
                false
            }
        }
    }
}
