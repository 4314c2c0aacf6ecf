//! Mock implementation of the row store for testing.
//!
//! This module provides an in-memory [`RowStore`] that behaves like the users
//! table: ascending identifiers, a resettable sequence, and deterministic
//! failure injection for unit and integration testing.
//!
//! [`RowStore`]: paging_core::RowStore

mod row;
mod store;

pub use row::MockRow;
pub use store::{MockCall, MockMutation, MockRowStore, MockStoreError};
