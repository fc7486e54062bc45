use axum::{http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

/// GET /api/health — answers without touching storage.
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Meal Planner API is running",
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        })),
    )
}

/// Fallback for every unmatched path or method.
pub async fn route_not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Route not found" })),
    )
}
