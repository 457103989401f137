//! Liveness endpoint.

use axum::Json;
use serde_json::json;

/// GET /health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
