#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for offset pagination operations.
///
/// Use this target for logging page requests served with `LIMIT`/`OFFSET`.
pub const TRACING_TARGET_OFFSET: &str = "paging_core::offset";

/// Tracing target for cursor pagination operations.
///
/// Use this target for logging page requests served with a keyed range scan.
pub const TRACING_TARGET_CURSOR: &str = "paging_core::cursor";

/// Tracing target for drain operations.
///
/// Use this target for logging full traversals of every page of a result set.
pub const TRACING_TARGET_DRAIN: &str = "paging_core::drain";

mod config;
pub mod cursor;
mod drain;
mod error;
pub mod offset;
mod page;
mod store;

pub use crate::config::PagingConfig;
pub use crate::cursor::{Cursor, CursorPage, CursorPageRequest, CursorPaging};
pub use crate::drain::{DrainPages, Strategy};
pub use crate::error::{BoxedError, ErrorKind, PagingError, PagingResult};
pub use crate::offset::{OffsetPage, OffsetPageRequest, OffsetPaging};
pub use crate::page::total_pages;
pub use crate::store::{HasId, RowStore};

/// Cooperative cancellation handle accepted by every paging operation.
pub use tokio_util::sync::CancellationToken;
