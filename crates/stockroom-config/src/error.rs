//! Configuration error types.

use std::path::Path;
use thiserror::Error;

/// Errors produced while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    ReadError {
        /// Path that was read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing failed.
    #[error("invalid TOML configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing failed.
    #[error("invalid JSON configuration: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An environment variable override could not be applied.
    #[error("invalid environment variable {key}: {reason}")]
    EnvParse {
        /// The offending variable name.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The final configuration failed validation.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// What failed.
        message: String,
    },
}

impl ConfigError {
    /// Creates a file-not-found error.
    #[must_use]
    pub fn file_not_found(path: &Path) -> Self {
        Self::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Creates a read error.
    #[must_use]
    pub fn read_error(path: &Path, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.display().to_string(),
            source,
        }
    }

    /// Creates an environment parse error.
    #[must_use]
    pub fn env_parse_error(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParse {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            message: format!("{field}: {}", reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_names_the_field() {
        let err = ConfigError::invalid_value("server.http_addr", "bad address");
        assert!(err.to_string().contains("server.http_addr"));
        assert!(err.to_string().contains("bad address"));
    }

    #[test]
    fn test_env_parse_error_message() {
        let err = ConfigError::env_parse_error("STOCKROOM__SERVER__HTTP_ADDR", "expected address");
        assert!(err.to_string().contains("STOCKROOM__SERVER__HTTP_ADDR"));
    }
}
