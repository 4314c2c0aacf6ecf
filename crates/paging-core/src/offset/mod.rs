//! Offset-based pagination.
//!
//! Offset pagination addresses a page by number and size and lets the store
//! skip `(number - 1) * size` rows. Skipped rows are still scanned, so the
//! cost of a page grows with its depth.

mod engine;
mod pagination;

pub use engine::OffsetPaging;
pub use pagination::{OffsetPage, OffsetPageRequest};
