//! API response envelope.
//!
//! Every `/api` response is wrapped in [`ApiResponse`]: a `result` marker
//! (`SUCCESS`/`FAIL`), a machine-readable `code`, a `message`, the payload in
//! `data`, and a structured `error` block on failure. Clients branch on
//! `result` rather than on HTTP status alone.

use serde::{Deserialize, Serialize};

/// Envelope outcome marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ApiResult {
    /// The operation succeeded; `data` holds the payload.
    Success,
    /// The operation failed; `error` holds the detail.
    Fail,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorEntry {
    /// The offending field name.
    pub field: String,
    /// Why the field was rejected.
    pub reason: String,
}

/// Structured error block inside a failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error type (mirrors the envelope `code`).
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description of the failure.
    pub detail: String,
    /// The request path the error occurred on.
    pub instance: String,
    /// Field-level validation failures, if any.
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldErrorEntry>>,
}

/// Standard response envelope for all API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Outcome marker.
    pub result: ApiResult,
    /// Machine-readable code ("OK" on success, error code on failure).
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Payload on success, `null` otherwise (and for `delete`).
    pub data: Option<T>,
    /// Error detail on failure, `null` on success.
    pub error: Option<ErrorDetail>,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in a success envelope.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            result: ApiResult::Success,
            code: "OK".to_string(),
            message: "OK".to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Builds a success envelope with no payload (e.g. for `delete`).
    #[must_use]
    pub fn success_empty() -> Self {
        Self {
            result: ApiResult::Success,
            code: "OK".to_string(),
            message: "OK".to_string(),
            data: None,
            error: None,
        }
    }

    /// Builds a failure envelope.
    #[must_use]
    pub fn failure(code: impl Into<String>, message: impl Into<String>, error: ErrorDetail) -> Self {
        Self {
            result: ApiResult::Fail,
            code: code.into(),
            message: message.into(),
            data: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_serialization() {
        let envelope = ApiResponse::success(42);
        let json = serde_json::to_value(&envelope).expect("serializes");

        assert_eq!(json["result"], "SUCCESS");
        assert_eq!(json["code"], "OK");
        assert_eq!(json["data"], 42);
        assert_eq!(json["error"], serde_json::Value::Null);
    }

    #[test]
    fn test_failure_envelope_serialization() {
        let detail = ErrorDetail {
            kind: "NOT_FOUND".to_string(),
            detail: "Item with ID '7' not found".to_string(),
            instance: "/api/items/7".to_string(),
            field_errors: None,
        };
        let envelope: ApiResponse<()> =
            ApiResponse::failure("NOT_FOUND", "Item with ID '7' not found", detail);
        let json = serde_json::to_value(&envelope).expect("serializes");

        assert_eq!(json["result"], "FAIL");
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["data"], serde_json::Value::Null);
        assert_eq!(json["error"]["type"], "NOT_FOUND");
        assert_eq!(json["error"]["instance"], "/api/items/7");
        // fieldErrors is omitted entirely when absent.
        assert!(json["error"].get("fieldErrors").is_none());
    }

    #[test]
    fn test_field_errors_serialize_camel_case() {
        let detail = ErrorDetail {
            kind: "VALIDATION_ERROR".to_string(),
            detail: "validation failed".to_string(),
            instance: "/api/items".to_string(),
            field_errors: Some(vec![FieldErrorEntry {
                field: "name".to_string(),
                reason: "must not be blank".to_string(),
            }]),
        };
        let json = serde_json::to_value(&detail).expect("serializes");
        assert_eq!(json["fieldErrors"][0]["field"], "name");
        assert_eq!(json["fieldErrors"][0]["reason"], "must not be blank");
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = ApiResponse::success("payload".to_string());
        let json = serde_json::to_string(&envelope).expect("serializes");
        let back: ApiResponse<String> = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(back.result, ApiResult::Success);
        assert_eq!(back.data.as_deref(), Some("payload"));
    }
}
