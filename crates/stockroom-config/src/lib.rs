//! Typed configuration for the stockroom service.
//!
//! Configuration is layered: built-in defaults, then an optional TOML or
//! JSON file, then `STOCKROOM__SECTION__KEY` environment variables. See
//! [`ConfigLoader`] for the loading pipeline and [`StockroomConfig`] for the
//! schema.

pub mod config;
pub mod error;
pub mod loader;
pub mod schema;

pub use config::StockroomConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{DatabaseConfig, LogFormat, LoggingConfig, MetricsConfig, ServerConfig, TelemetryConfig};
