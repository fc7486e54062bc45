pub mod health;
pub mod meal_plans;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::AppState;

/// Build the full HTTP surface around the given state.
pub fn router(state: AppState) -> Router {
    let development = state.config.is_development();

    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/meal-plans",
            get(meal_plans::list_meal_plans).post(meal_plans::create_meal_plan),
        )
        .route(
            "/api/meal-plans/{id}",
            get(meal_plans::get_meal_plan)
                .put(meal_plans::update_meal_plan)
                .delete(meal_plans::delete_meal_plan),
        )
        .fallback(health::route_not_found)
        .method_not_allowed_fallback(health::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send + 'static>| {
                    panic_response(panic, development)
                })),
        )
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send + 'static>, development: bool) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Unhandled error: {}", detail);

    let error = if development { detail } else { "Something went wrong".to_string() };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "message": "Internal server error",
            "error": error,
        })),
    )
        .into_response()
}
