//! Health, readiness, and metrics endpoints.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::health::{HealthStatus, ReadinessStatus};
use crate::state::AppState;

/// `GET /health` — liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.health.status())
}

/// `GET /ready` — readiness probe.
///
/// Returns 503 with the per-check breakdown when any probe fails.
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessStatus>) {
    let status = state.readiness.status();
    let code = if status.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

/// `GET /metrics` — Prometheus text exposition.
///
/// Empty body when the metrics recorder was not installed.
pub async fn metrics() -> impl IntoResponse {
    let body = stockroom_telemetry::metrics::render_metrics().unwrap_or_default();
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
