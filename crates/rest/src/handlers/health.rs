//! Health check endpoint handler.

use axum::{Json, response::IntoResponse};
use serde_json::json;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - `{"status": "UP"}`
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "UP" }))
}
