//! Database models for the paged table.

mod user;

pub use user::{NewUser, User};
