//! Route table and request tracking.

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{items, system};
use crate::state::AppState;

/// Builds the application router.
///
/// `/api` routes carry the response envelope; `/health`, `/ready`, and
/// `/metrics` are operational endpoints outside it.
#[must_use]
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/items", post(items::create_item))
        .route("/api/items/search", get(items::search_items))
        .route("/api/items/list", get(items::list_items))
        .route(
            "/api/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/health", get(system::health))
        .route("/ready", get(system::ready))
        .route("/metrics", get(system::metrics))
        .layer(middleware::from_fn(track_requests))
        .with_state(state)
}

/// Records the standard request metrics and the completion log line.
///
/// The operation label is the route template (e.g. `/api/items/:id`), not
/// the concrete path, to keep metric cardinality bounded.
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let operation = request.extensions().get::<MatchedPath>().map_or_else(
        || request.uri().path().to_string(),
        |path| path.as_str().to_string(),
    );
    let method = request.method().clone();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed = start.elapsed();
    stockroom_telemetry::metrics::record_request(&operation, status, elapsed);
    tracing::debug!(
        http.method = %method,
        http.path = %operation,
        http.status_code = status,
        duration_ms = elapsed.as_millis() as u64,
        "request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use http::{Request as HttpRequest, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use stockroom_service::ItemService;
    use stockroom_store::ItemStore;

    fn test_app() -> Router {
        let store = ItemStore::open_in_memory().expect("in-memory store");
        let state = AppState::new(ItemService::new(store), "stockroom-test");
        app(state)
    }

    async fn response_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("readable body");
        serde_json::from_slice(&bytes).expect("JSON body")
    }

    fn get(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn with_json(method: &str, uri: &str, body: &Value) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    fn delete(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    fn draft(name: &str) -> Value {
        json!({
            "name": name,
            "description": "test item",
            "category": "fasteners",
            "status": "in_stock",
            "priority": 1,
            "quantity": 10,
            "price": "9.95",
            "rate": 1.5,
            "active": true,
            "dueDate": null,
            "memo": null
        })
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let response = test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "stockroom-test");
    }

    #[tokio::test]
    async fn ready_includes_database_check() {
        let response = test_app().oneshot(get("/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["ready"], true);
        assert_eq!(body["checks"]["database"], true);
    }

    #[tokio::test]
    async fn metrics_endpoint_responds() {
        let response = test_app().oneshot(get("/metrics")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_get_round_trip() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(with_json("POST", "/api/items", &draft("M6 bolt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["result"], "SUCCESS");
        assert_eq!(body["code"], "OK");
        let id = body["data"]["id"].as_i64().expect("assigned id");
        assert!(id >= 1);
        assert_eq!(body["data"]["name"], "M6 bolt");
        assert_eq!(body["data"]["price"], "9.95");
        assert!(body["data"]["createdAt"].is_string());
        assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);

        let response = app
            .oneshot(get(&format!("/api/items/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["data"]["id"], id);
    }

    #[tokio::test]
    async fn get_missing_item_is_not_found_envelope() {
        let response = test_app().oneshot(get("/api/items/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = response_json(response).await;
        assert_eq!(body["result"], "FAIL");
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["type"], "NOT_FOUND");
        assert_eq!(body["error"]["instance"], "/api/items/999");
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let app = test_app();
        app.clone()
            .oneshot(with_json("POST", "/api/items", &draft("bolt")))
            .await
            .unwrap();

        let response = app
            .oneshot(with_json("POST", "/api/items", &draft("bolt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = response_json(response).await;
        assert_eq!(body["result"], "FAIL");
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn invalid_draft_reports_field_errors() {
        let mut invalid = draft("  ");
        invalid["quantity"] = json!(-5);

        let response = test_app()
            .oneshot(with_json("POST", "/api/items", &invalid))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["error"]["fieldErrors"]
            .as_array()
            .expect("field errors")
            .iter()
            .map(|entry| entry["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"quantity"));
    }

    #[tokio::test]
    async fn malformed_body_is_validation_error() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/items")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = test_app();
        let created = response_json(
            app.clone()
                .oneshot(with_json("POST", "/api/items", &draft("bolt")))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_i64().unwrap();

        let mut changes = draft("hex bolt");
        changes["status"] = json!("backordered");
        changes["quantity"] = json!(42);

        let response = app
            .clone()
            .oneshot(with_json("PUT", &format!("/api/items/{id}"), &changes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["data"]["name"], "hex bolt");
        assert_eq!(body["data"]["status"], "backordered");
        assert_eq!(body["data"]["quantity"], 42);
        assert_eq!(body["data"]["createdAt"], created["data"]["createdAt"]);

        let reread = response_json(app.oneshot(get(&format!("/api/items/{id}"))).await.unwrap()).await;
        assert_eq!(reread["data"]["name"], "hex bolt");
    }

    #[tokio::test]
    async fn update_missing_item_is_not_found() {
        let response = test_app()
            .oneshot(with_json("PUT", "/api/items/999", &draft("bolt")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let app = test_app();
        let created = response_json(
            app.clone()
                .oneshot(with_json("POST", "/api/items", &draft("bolt")))
                .await
                .unwrap(),
        )
        .await;
        let id = created["data"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(delete(&format!("/api/items/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body["result"], "SUCCESS");
        assert_eq!(body["data"], Value::Null);

        let response = app
            .oneshot(get(&format!("/api/items/{id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_positive_id_is_validation_error() {
        let response = test_app().oneshot(get("/api/items/0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn search_composes_filters() {
        let app = test_app();
        for (name, category, active) in [
            ("bolt", "fasteners", true),
            ("bolt cutter", "tools", true),
            ("bolt anchor", "fasteners", false),
        ] {
            let mut d = draft(name);
            d["category"] = json!(category);
            d["active"] = json!(active);
            app.clone()
                .oneshot(with_json("POST", "/api/items", &d))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(get("/api/items/search?name=bolt&category=fasteners&active=true"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        let found = body["data"].as_array().unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], "bolt");

        // No filters: everything comes back.
        let body = response_json(app.oneshot(get("/api/items/search")).await.unwrap()).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_pages_with_counts() {
        let app = test_app();
        for i in 0..5 {
            app.clone()
                .oneshot(with_json("POST", "/api/items", &draft(&format!("item-{i}"))))
                .await
                .unwrap();
        }

        let response = app
            .clone()
            .oneshot(get("/api/items/list?page=2&size=2"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        let data = &body["data"];
        assert_eq!(data["content"].as_array().unwrap().len(), 2);
        assert_eq!(data["totalElements"], 5);
        assert_eq!(data["totalPages"], 3);
        assert_eq!(data["page"], 2);
        assert_eq!(data["size"], 2);

        // Defaults apply when parameters are omitted.
        let body = response_json(app.oneshot(get("/api/items/list")).await.unwrap()).await;
        assert_eq!(body["data"]["page"], 1);
        assert_eq!(body["data"]["size"], 10);
    }

    #[tokio::test]
    async fn list_rejects_page_zero() {
        let response = test_app()
            .oneshot(get("/api/items/list?page=0&size=10"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn request_id_header_is_respected() {
        // The handler logs the caller-provided id; the visible contract is
        // simply that the request still succeeds with the header set.
        let request = HttpRequest::builder()
            .method("GET")
            .uri("/health")
            .header("x-request-id", "req-fixed")
            .body(Body::empty())
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
