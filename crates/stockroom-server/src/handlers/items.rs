//! Item CRUD handlers.
//!
//! Every handler validates its inputs, delegates to [`ItemService`], and
//! wraps the outcome in the standard envelope. Errors become [`ApiFailure`]
//! responses with the matching HTTP status.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use stockroom_core::{ApiResponse, Item, ItemDraft, PageRequest, PageResponse, StockroomError};

use crate::error::ApiFailure;
use crate::handlers::request_id;
use crate::state::AppState;

/// Optional search criteria, all composable with AND semantics.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Substring match on name.
    pub name: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact status.
    pub status: Option<String>,
    /// Exact active flag.
    pub active: Option<bool>,
}

/// `GET /api/items/{id}`
pub async fn get_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Item>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = format!("/api/items/{id}");
    info!(request_id = %request_id, item_id = id, "get item");

    validate_id(id).map_err(|e| ApiFailure::new(e, &instance, &request_id))?;

    let item = state
        .service
        .get(id)
        .map_err(|e| ApiFailure::new(e, &instance, &request_id))?;
    Ok(Json(ApiResponse::success(item)))
}

/// `POST /api/items`
pub async fn create_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<Item>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = "/api/items";
    info!(request_id = %request_id, "create item");

    let Json(draft) = payload.map_err(|rejection| {
        ApiFailure::new(
            StockroomError::validation(format!("invalid request body: {rejection}")),
            instance,
            &request_id,
        )
    })?;

    let item = state
        .service
        .create(draft)
        .map_err(|e| ApiFailure::new(e, instance, &request_id))?;
    Ok(Json(ApiResponse::success(item)))
}

/// `PUT /api/items/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    payload: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<Json<ApiResponse<Item>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = format!("/api/items/{id}");
    info!(request_id = %request_id, item_id = id, "update item");

    validate_id(id).map_err(|e| ApiFailure::new(e, &instance, &request_id))?;

    let Json(draft) = payload.map_err(|rejection| {
        ApiFailure::new(
            StockroomError::validation(format!("invalid request body: {rejection}")),
            &instance,
            &request_id,
        )
    })?;

    let item = state
        .service
        .update(id, draft)
        .map_err(|e| ApiFailure::new(e, &instance, &request_id))?;
    Ok(Json(ApiResponse::success(item)))
}

/// `DELETE /api/items/{id}`
pub async fn delete_item(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = format!("/api/items/{id}");
    info!(request_id = %request_id, item_id = id, "delete item");

    validate_id(id).map_err(|e| ApiFailure::new(e, &instance, &request_id))?;

    state
        .service
        .delete(id)
        .map_err(|e| ApiFailure::new(e, &instance, &request_id))?;
    Ok(Json(ApiResponse::success_empty()))
}

/// `GET /api/items/search`
pub async fn search_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Item>>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = "/api/items/search";
    info!(request_id = %request_id, "search items");

    let Query(params) = params.map_err(|rejection| {
        ApiFailure::new(
            StockroomError::validation(format!("invalid query parameters: {rejection}")),
            instance,
            &request_id,
        )
    })?;

    let items = state
        .service
        .search(params.name, params.category, params.status, params.active)
        .map_err(|e| ApiFailure::new(e, instance, &request_id))?;
    Ok(Json(ApiResponse::success(items)))
}

/// `GET /api/items/list`
pub async fn list_items(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<ApiResponse<PageResponse<Item>>>, ApiFailure> {
    let request_id = request_id(&headers);
    let instance = "/api/items/list";
    info!(request_id = %request_id, "list items");

    let Query(request) = params.map_err(|rejection| {
        ApiFailure::new(
            StockroomError::validation(format!("invalid query parameters: {rejection}")),
            instance,
            &request_id,
        )
    })?;

    let page = state
        .service
        .list(request)
        .map_err(|e| ApiFailure::new(e, instance, &request_id))?;
    Ok(Json(ApiResponse::success(page)))
}

/// Rejects non-positive ids before they reach the service.
fn validate_id(id: i64) -> Result<(), StockroomError> {
    if id < 1 {
        return Err(StockroomError::validation("id must be >= 1"));
    }
    Ok(())
}
