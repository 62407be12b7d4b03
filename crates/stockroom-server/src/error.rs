//! Error-to-response mapping for the HTTP layer.

use axum::response::{IntoResponse, Response};
use axum::Json;

use stockroom_core::{ApiResponse, StockroomError};

/// A failed request, carrying everything needed to build the failure
/// envelope: the error, the request path, and the request id.
#[derive(Debug)]
pub struct ApiFailure {
    error: StockroomError,
    instance: String,
    request_id: String,
}

impl ApiFailure {
    /// Wraps a service error for the request at `instance`.
    #[must_use]
    pub fn new(
        error: StockroomError,
        instance: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            error,
            instance: instance.into(),
            request_id: request_id.into(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        if status.is_server_error() {
            tracing::error!(
                request_id = %self.request_id,
                instance = %self.instance,
                error = %self.error,
                "request failed"
            );
        } else {
            tracing::info!(
                request_id = %self.request_id,
                instance = %self.instance,
                error = %self.error,
                "request rejected"
            );
        }

        let envelope: ApiResponse<()> = ApiResponse::failure(
            self.error.error_code(),
            self.error.to_string(),
            self.error.to_detail(self.instance),
        );

        (status, Json(envelope)).into_response()
    }
}
