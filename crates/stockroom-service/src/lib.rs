//! Business rules for the stockroom service.
//!
//! [`ItemService`] sits between the HTTP layer and the store. It owns the
//! rules the storage schema alone cannot express: validation of drafts,
//! existence checks that turn missing rows into `NOT_FOUND`, the uniqueness
//! pre-check on create, and timestamp management.

pub mod item_service;

pub use item_service::ItemService;
