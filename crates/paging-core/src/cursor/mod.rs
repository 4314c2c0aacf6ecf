//! Cursor-based pagination.
//!
//! Cursor pagination resumes a keyed range scan after the identifier of the
//! last delivered row. The cost of a page is independent of how many pages
//! precede it.

mod engine;
mod pagination;
mod token;

pub use engine::CursorPaging;
pub use pagination::{CursorPage, CursorPageRequest};
pub use token::Cursor;
