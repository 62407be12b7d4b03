//! Main configuration types.
//!
//! This module provides the top-level [`StockroomConfig`] struct.

use serde::{Deserialize, Serialize};

use crate::schema::{DatabaseConfig, LogFormat, ServerConfig, TelemetryConfig};
use crate::ConfigError;

/// Complete stockroom service configuration.
///
/// This is the root configuration type containing all sections. Use
/// [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use stockroom_config::StockroomConfig;
///
/// let config = StockroomConfig::default();
/// assert_eq!(config.server.http_addr, "0.0.0.0:8080");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct StockroomConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Telemetry configuration (logging, metrics).
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl StockroomConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - the server address is not a valid socket address
    /// - the database path is empty
    /// - the log level is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        if self.database.path.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "database.path",
                "must not be empty",
            ));
        }

        if self.telemetry.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.logging.level",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty logs at debug level, in-memory database.
    ///
    /// # Example
    ///
    /// ```
    /// use stockroom_config::StockroomConfig;
    ///
    /// let config = StockroomConfig::development();
    /// assert_eq!(config.telemetry.logging.level, "debug");
    /// ```
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.database.path = ":memory:".to_string();
        config
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level.
    ///
    /// # Example
    ///
    /// ```
    /// use stockroom_config::{LogFormat, StockroomConfig};
    ///
    /// let config = StockroomConfig::production();
    /// assert_eq!(config.telemetry.logging.format, LogFormat::Json);
    /// ```
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "info".to_string();
        config.telemetry.logging.format = LogFormat::Json;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockroomConfig::default();
        assert_eq!(config.server.http_addr, "0.0.0.0:8080");
        assert_eq!(config.database.path, "stockroom.db");
        assert_eq!(config.telemetry.service_name, "stockroom");
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(StockroomConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_server_addr() {
        let mut config = StockroomConfig::default();
        config.server.http_addr = "not-an-address".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http_addr"));
    }

    #[test]
    fn test_validate_empty_database_path() {
        let mut config = StockroomConfig::default();
        config.database.path = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_development_preset() {
        let config = StockroomConfig::development();
        assert_eq!(config.telemetry.logging.level, "debug");
        assert_eq!(config.telemetry.logging.format, LogFormat::Pretty);
        assert_eq!(config.database.path, ":memory:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_preset() {
        let config = StockroomConfig::production();
        assert_eq!(config.telemetry.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StockroomConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[telemetry]"));

        let back: StockroomConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml_str = r#"
            [server]
            http_addr = "127.0.0.1:8000"
            unknown_field = "value"
        "#;

        let result: Result<StockroomConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }
}
