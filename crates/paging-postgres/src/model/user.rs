//! User model for PostgreSQL database operations.

use diesel::prelude::*;
use paging_core::HasId;
use serde::{Deserialize, Serialize};

use crate::schema::users;

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Sequence-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl HasId for User {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Data for creating a new user.
#[derive(Debug, Default, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Display name.
    pub name: String,
}

impl NewUser {
    /// Creates a new user with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Creates the `n`-th generated user, named `User #n`.
    pub fn numbered(n: i64) -> Self {
        Self::new(format!("User #{n}"))
    }
}
