//! Status and error endpoints

use axum::Json;
use serde_json::{json, Value};

use crate::response::ApiError;

/// GET /api/v1/status
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /api/v1/unauthorized
pub async fn unauthorized() -> ApiError {
    ApiError::Unauthorized("Unauthorized".to_string())
}

/// GET /api/v1/forbidden
pub async fn forbidden() -> ApiError {
    ApiError::Forbidden("Forbidden".to_string())
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
