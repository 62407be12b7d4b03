//! SQLite persistence for the stockroom service.
//!
//! This crate owns the `items` table: schema migrations ([`schema`]) and the
//! parameterized queries behind every operation ([`ItemStore`]). All SQL is
//! bound-parameter only; the search filter composes its WHERE clause
//! dynamically from the optional criteria.

pub mod error;
pub mod item_store;
pub mod schema;

pub use error::{StoreError, StoreResult};
pub use item_store::{ItemFilter, ItemStore};
