//! Telemetry error types.

use thiserror::Error;

/// Errors produced while initializing telemetry subsystems.
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Logging initialization failed.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metrics initialization failed.
    #[error("failed to initialize metrics: {0}")]
    MetricsInit(String),
}
