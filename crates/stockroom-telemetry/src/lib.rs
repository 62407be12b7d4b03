//! Observability for the stockroom service.
//!
//! Two subsystems, both initialized once at startup:
//!
//! - [`logging`] — structured log output via `tracing-subscriber` (JSON in
//!   production, pretty in development)
//! - [`metrics`] — a Prometheus recorder plus helpers for the standard
//!   request metrics

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;

/// Result type alias using [`TelemetryError`].
pub type TelemetryResult<T> = Result<T, TelemetryError>;
