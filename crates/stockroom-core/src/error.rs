//! Error types for the stockroom service.
//!
//! This module provides [`StockroomError`], the standard error type used
//! across the service and HTTP layers. Each error carries a category that
//! maps to an HTTP status code and a machine-readable code that appears in
//! the response envelope.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::envelope::{ErrorDetail, FieldErrorEntry};

/// Result type alias using [`StockroomError`].
pub type StockroomResult<T> = Result<T, StockroomError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Request validation errors (invalid input, malformed fields).
    Validation,
    /// Resource not found.
    NotFound,
    /// Conflict (e.g. duplicate name).
    Conflict,
    /// Internal server errors.
    Internal,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Standard error type for the stockroom service.
///
/// `StockroomError` provides structured errors with:
/// - Error categorization and HTTP status mapping
/// - A serializable detail block for the response envelope
/// - Error chaining for internal failures
///
/// # Example
///
/// ```
/// use stockroom_core::StockroomError;
///
/// fn require_name(name: &str) -> Result<(), StockroomError> {
///     if name.trim().is_empty() {
///         return Err(StockroomError::validation("name must not be blank"));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum StockroomError {
    /// Request validation failed.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message.
        message: String,
        /// Field-specific validation errors.
        #[source]
        field_errors: Option<FieldErrors>,
    },

    /// Resource not found.
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
        /// The type of resource that was not found.
        resource_type: Option<String>,
        /// The identifier of the resource.
        resource_id: Option<String>,
    },

    /// Conflict error (e.g. duplicate name on create).
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message.
        message: String,
    },

    /// Internal server error.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying error (not exposed to clients).
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl StockroomError {
    /// Creates a validation error with a message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: None,
        }
    }

    /// Creates a validation error with field-specific errors.
    #[must_use]
    pub fn validation_with_fields(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: Some(field_errors),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
            resource_id: None,
        }
    }

    /// Creates a not found error with resource context.
    #[must_use]
    pub fn not_found_resource(
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();
        Self::NotFound {
            message: format!("{resource_type} with ID '{resource_id}' not found"),
            resource_type: Some(resource_type),
            resource_id: Some(resource_id),
        }
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error with a source error.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns a machine-readable error code for the envelope.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Converts this error to a serializable detail block.
    ///
    /// `instance` is the request path the error occurred on.
    #[must_use]
    pub fn to_detail(&self, instance: impl Into<String>) -> ErrorDetail {
        let field_errors = match self {
            Self::Validation {
                field_errors: Some(errors),
                ..
            } => Some(errors.to_entries()),
            _ => None,
        };

        ErrorDetail {
            kind: self.error_code().to_string(),
            detail: self.to_string(),
            instance: instance.into(),
            field_errors,
        }
    }
}

/// Field-specific validation errors.
///
/// Collects one or more reasons per field path. Empty means no errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Error)]
#[error("field validation errors")]
pub struct FieldErrors {
    /// Map of field name to list of error messages.
    pub fields: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    /// Creates a new empty `FieldErrors`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if there are no field errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Flattens the map into `{field, reason}` entries, sorted by field name
    /// for stable output.
    #[must_use]
    pub fn to_entries(&self) -> Vec<FieldErrorEntry> {
        let mut names: Vec<&String> = self.fields.keys().collect();
        names.sort();

        let mut entries = Vec::new();
        for name in names {
            for reason in &self.fields[name] {
                entries.push(FieldErrorEntry {
                    field: name.clone(),
                    reason: reason.clone(),
                });
            }
        }
        entries
    }
}
