//! Mock row.

use paging_core::HasId;
use serde::{Deserialize, Serialize};

/// Row held by the mock store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MockRow {
    /// Sequence-assigned identifier.
    pub id: i64,
    /// Opaque name.
    pub name: String,
}

impl MockRow {
    /// Creates a new row.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl HasId for MockRow {
    fn id(&self) -> i64 {
        self.id
    }
}
