//! Core types for the stockroom service.
//!
//! This crate defines the domain model ([`Item`], [`ItemDraft`]), request
//! validation ([`FieldErrors`]), the standard error type ([`StockroomError`]),
//! the API response envelope ([`ApiResponse`]), and pagination types
//! ([`PageRequest`], [`PageResponse`]). It carries no I/O: persistence lives
//! in `stockroom-store` and the HTTP surface in `stockroom-server`.

pub mod envelope;
pub mod error;
pub mod item;
pub mod page;

pub use envelope::{ApiResponse, ApiResult, ErrorDetail, FieldErrorEntry};
pub use error::{ErrorCategory, FieldErrors, StockroomError, StockroomResult};
pub use item::{Item, ItemDraft};
pub use page::{PageRequest, PageResponse};
