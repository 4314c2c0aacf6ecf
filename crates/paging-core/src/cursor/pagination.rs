//! Cursor page request and result types.

use serde::{Deserialize, Serialize};

use super::Cursor;
use crate::page::total_pages;
use crate::{HasId, PagingError, PagingResult};

/// Cursor-based page request.
///
/// An empty cursor starts from the smallest identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPageRequest {
    /// Requested number of rows per page.
    pub size: i64,
    /// Continuation token returned by the previous page.
    #[serde(default)]
    pub cursor: String,
}

impl CursorPageRequest {
    /// Creates a request for the first page.
    pub fn new(size: i64) -> Self {
        Self {
            size,
            cursor: String::new(),
        }
    }

    /// Creates a request resuming after the given continuation token.
    pub fn after(size: i64, cursor: impl Into<String>) -> Self {
        Self {
            size,
            cursor: cursor.into(),
        }
    }

    /// Checks that the size is positive.
    pub fn validate(&self) -> PagingResult<()> {
        if self.size <= 0 {
            return Err(PagingError::InvalidPageSize(self.size));
        }

        Ok(())
    }

    /// Returns the number of rows to fetch: the page size plus one lookahead
    /// row used to detect whether more pages exist.
    ///
    /// Saturates at `i64::MAX`; no store holds that many rows, so the
    /// lookahead check on the returned rows stays exact.
    pub fn fetch_limit(&self) -> PagingResult<i64> {
        self.validate()?;
        Ok(self.size.saturating_add(1))
    }

    /// Parses the continuation token.
    pub fn parse_cursor(&self) -> PagingResult<Option<Cursor>> {
        Cursor::decode(&self.cursor)
    }

    /// Returns true if this request starts from the beginning.
    pub fn is_first(&self) -> bool {
        self.cursor.is_empty()
    }
}

/// Result of a cursor-paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPage<T> {
    /// Rows of this page in ascending identifier order.
    pub content: Vec<T>,
    /// Token to fetch the next page; empty when the result set is exhausted.
    pub cursor_next_page: String,
    /// Number of rows actually returned.
    pub size: i64,
    /// Number of rows in the store when the page was served.
    pub total_elements: i64,
    /// `ceil(total_elements / requested size)`, informational only.
    pub total_pages: i64,
}

impl<T: HasId> CursorPage<T> {
    /// Creates a page from rows fetched with a lookahead row.
    ///
    /// `rows` should hold up to `size + 1` items. When more than `size` came
    /// back the surplus is dropped and the next cursor is taken from the last
    /// row that is kept, never from the dropped one.
    pub fn from_lookahead(mut rows: Vec<T>, size: i64, total_elements: i64) -> Self {
        let limit = usize::try_from(size).unwrap_or(0);
        let has_more = rows.len() > limit;

        // Remove the extra row used to detect more pages
        if has_more {
            rows.truncate(limit);
        }

        let cursor_next_page = if has_more {
            rows.last().map(|row| Cursor::after(row).encode())
        } else {
            None
        };

        Self {
            size: rows.len() as i64,
            content: rows,
            cursor_next_page: cursor_next_page.unwrap_or_default(),
            total_elements,
            total_pages: total_pages(total_elements, size),
        }
    }
}

impl<T> CursorPage<T> {
    /// Creates an empty, exhausted page.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            cursor_next_page: String::new(),
            size: 0,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Returns true if there are more rows to fetch.
    pub fn has_more(&self) -> bool {
        !self.cursor_next_page.is_empty()
    }

    /// Returns the request for the next page, if any.
    pub fn next_request(&self, size: i64) -> Option<CursorPageRequest> {
        self.has_more()
            .then(|| CursorPageRequest::after(size, self.cursor_next_page.clone()))
    }

    /// Maps the rows to a different type.
    pub fn map<U, F>(self, f: F) -> CursorPage<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPage {
            content: self.content.into_iter().map(f).collect(),
            cursor_next_page: self.cursor_next_page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

impl<T> Default for CursorPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}
