//! Offset page request and result types.

use serde::{Deserialize, Serialize};

use crate::page::total_pages;
use crate::{PagingError, PagingResult};

/// Offset-based page request.
///
/// `number` is 1-indexed: the first page is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPageRequest {
    /// 1-indexed page number.
    pub number: i64,
    /// Requested number of rows per page.
    pub size: i64,
}

impl OffsetPageRequest {
    /// Creates a request for page `number` of `size` rows.
    pub fn new(number: i64, size: i64) -> Self {
        Self { number, size }
    }

    /// Creates a request for the first page.
    pub fn first(size: i64) -> Self {
        Self::new(1, size)
    }

    /// Returns the request for the page following this one.
    pub fn next(&self) -> Self {
        Self::new(self.number.saturating_add(1), self.size)
    }

    /// Checks that both the number and the size are positive.
    pub fn validate(&self) -> PagingResult<()> {
        if self.size <= 0 {
            return Err(PagingError::InvalidPageSize(self.size));
        }

        if self.number <= 0 {
            return Err(PagingError::InvalidPageNumber(self.number));
        }

        Ok(())
    }

    /// Returns the number of rows to skip, `(number - 1) * size`.
    ///
    /// Saturates at `i64::MAX`, which no store can exceed, so a huge page
    /// number is served as an empty page past the end.
    pub fn offset(&self) -> PagingResult<i64> {
        self.validate()?;
        Ok((self.number - 1).saturating_mul(self.size))
    }
}

/// Result of an offset-paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPage<T> {
    /// Rows of this page in ascending identifier order.
    pub content: Vec<T>,
    /// Echoed page number.
    pub number: i64,
    /// Number of rows actually returned.
    pub size: i64,
    /// Number of rows in the store when the page was served.
    pub total_elements: i64,
    /// `ceil(total_elements / requested size)`.
    pub total_pages: i64,
}

impl<T> OffsetPage<T> {
    /// Creates a page from the rows served for `request`.
    pub fn new(content: Vec<T>, request: OffsetPageRequest, total_elements: i64) -> Self {
        Self {
            size: content.len() as i64,
            content,
            number: request.number,
            total_elements,
            total_pages: total_pages(total_elements, request.size),
        }
    }

    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            number: 0,
            size: 0,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Returns whether this is the last page a drain needs to fetch.
    ///
    /// Compares this page's own number against its own page count, so a store
    /// that shrinks past the current page still terminates a drain.
    pub fn is_last(&self) -> bool {
        self.total_elements == 0 || self.number >= self.total_pages
    }

    /// Returns true if there are more pages after this one.
    pub fn has_more(&self) -> bool {
        !self.is_last()
    }

    /// Maps the rows to a different type.
    pub fn map<U, F>(self, f: F) -> OffsetPage<U>
    where
        F: FnMut(T) -> U,
    {
        OffsetPage {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }
}

impl<T> Default for OffsetPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}
