use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{error::StoreError, models::meal_plan::MealPlanPayload, AppState};

type Failure = (StatusCode, Json<Value>);

fn not_found() -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": "Meal plan not found" })),
    )
}

/// Map a store error onto the response envelope. `context` is the message
/// shown for internal failures.
fn store_failure(state: &AppState, context: &str, err: StoreError) -> Failure {
    match err {
        StoreError::NotFound => not_found(),
        StoreError::DuplicateKey { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Meal plan for this date already exists" })),
        ),
        StoreError::Validation(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Invalid meal plan", "error": msg })),
        ),
        StoreError::Unavailable(e) => {
            tracing::error!("{}: {}", context, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": context,
                    "error": state.error_detail(&e),
                })),
            )
        }
    }
}

fn bad_body(rejection: JsonRejection) -> Failure {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "message": "Invalid meal plan",
            "error": rejection.body_text(),
        })),
    )
}

/// A path segment that is not a UUID cannot name a stored record.
fn parse_id(raw: &str) -> Result<Uuid, Failure> {
    Uuid::parse_str(raw).map_err(|_| not_found())
}

/// GET /api/meal-plans
pub async fn list_meal_plans(State(state): State<AppState>) -> Result<Json<Value>, Failure> {
    state
        .store
        .list()
        .await
        .map(|plans| Json(json!({ "success": true, "data": plans })))
        .map_err(|e| store_failure(&state, "Error fetching meal plans", e))
}

/// POST /api/meal-plans
pub async fn create_meal_plan(
    State(state): State<AppState>,
    body: Result<Json<MealPlanPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    let Json(payload) = body.map_err(bad_body)?;
    let input = payload
        .validate()
        .map_err(|e| store_failure(&state, "Error creating meal plan", e))?;

    match state.store.create(input).await {
        Ok(plan) => {
            tracing::info!(id = %plan.id, date = %plan.date, "meal plan created");
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Meal plan created successfully",
                    "data": plan,
                })),
            ))
        }
        Err(StoreError::DuplicateKey { .. }) => Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "message": "Meal plan for this date already exists. Use PUT to update.",
            })),
        )),
        Err(e) => Err(store_failure(&state, "Error creating meal plan", e)),
    }
}

/// GET /api/meal-plans/:id
pub async fn get_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let id = parse_id(&id)?;
    state
        .store
        .get_by_id(id)
        .await
        .map(|plan| Json(json!({ "success": true, "data": plan })))
        .map_err(|e| store_failure(&state, "Error fetching meal plan", e))
}

/// PUT /api/meal-plans/:id — full replace; omitted fields fall back to defaults.
pub async fn update_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MealPlanPayload>, JsonRejection>,
) -> Result<Json<Value>, Failure> {
    let id = parse_id(&id)?;
    let Json(payload) = body.map_err(bad_body)?;
    let input = payload
        .validate()
        .map_err(|e| store_failure(&state, "Error updating meal plan", e))?;

    state
        .store
        .update(id, input)
        .await
        .map(|plan| {
            Json(json!({
                "success": true,
                "message": "Meal plan updated successfully",
                "data": plan,
            }))
        })
        .map_err(|e| store_failure(&state, "Error updating meal plan", e))
}

/// DELETE /api/meal-plans/:id
pub async fn delete_meal_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    let id = parse_id(&id)?;
    state
        .store
        .delete_by_id(id)
        .await
        .map(|plan| {
            Json(json!({
                "success": true,
                "message": "Meal plan deleted successfully",
                "data": plan,
            }))
        })
        .map_err(|e| store_failure(&state, "Error deleting meal plan", e))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::test_utils::{memory_app, send};

    fn day(date: &str) -> serde_json::Value {
        json!({ "date": date, "weight": "80.5" })
    }

    #[tokio::test]
    async fn test_create_then_get_applies_defaults() {
        let app = memory_app(false);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/meal-plans",
            Some(json!({ "date": "2024-01-01", "weight": "80.5", "workout": true, "lunch": "rice" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Meal plan created successfully");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, &format!("/api/meal-plans/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["date"], "2024-01-01");
        assert_eq!(data["weight"], "80.5");
        assert_eq!(data["workout"], true);
        assert_eq!(data["creatine"], false);
        assert_eq!(data["whey"], false);
        assert_eq!(data["meals"]["lunch"], "rice");
        assert_eq!(data["meals"]["breakfast"], "");
        assert_eq!(data["nutrition"]["protein"], "");
        assert_eq!(data["notes"], "");
    }

    #[tokio::test]
    async fn test_duplicate_date_is_bad_request() {
        let app = memory_app(false);
        let (status, _) = send(&app, Method::POST, "/api/meal-plans", Some(day("2024-01-01"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::POST, "/api/meal-plans", Some(day("2024-01-01"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().contains("already exists"));
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let app = memory_app(false);
        let uri = format!("/api/meal-plans/{}", uuid::Uuid::new_v4());

        for (method, payload) in [
            (Method::GET, None),
            (Method::PUT, Some(day("2024-01-01"))),
            (Method::DELETE, None),
        ] {
            let (status, body) = send(&app, method, &uri, payload).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Meal plan not found");
        }
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let app = memory_app(false);
        let (status, body) = send(&app, Method::GET, "/api/meal-plans/not-an-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = memory_app(false);
        for date in ["2024-01-01", "2024-01-03", "2024-01-02"] {
            send(&app, Method::POST, "/api/meal-plans", Some(day(date))).await;
        }

        let (status, body) = send(&app, Method::GET, "/api/meal-plans", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let dates: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, ["2024-01-03", "2024-01-02", "2024-01-01"]);
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let app = memory_app(false);
        let (_, body) = send(
            &app,
            Method::POST,
            "/api/meal-plans",
            Some(json!({
                "date": "2024-01-01",
                "weight": "80",
                "creatine": true,
                "dinner": "salmon",
                "calories": "2400",
                "notes": "felt good"
            })),
        )
        .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/meal-plans/{id}");

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({ "date": "2024-01-01", "weight": "79.8", "whey": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Meal plan updated successfully");

        let data = &body["data"];
        assert_eq!(data["id"], id.as_str());
        assert_eq!(data["weight"], "79.8");
        assert_eq!(data["whey"], true);
        assert_eq!(data["creatine"], false);
        assert_eq!(data["meals"]["dinner"], "");
        assert_eq!(data["nutrition"]["calories"], "");
        assert_eq!(data["notes"], "");
    }

    #[tokio::test]
    async fn test_update_onto_existing_date_is_rejected() {
        let app = memory_app(false);
        send(&app, Method::POST, "/api/meal-plans", Some(day("2024-01-01"))).await;
        let (_, body) = send(&app, Method::POST, "/api/meal-plans", Some(day("2024-01-02"))).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, Method::PUT, &format!("/api/meal-plans/{id}"), Some(day("2024-01-01"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let app = memory_app(false);
        let (_, body) = send(&app, Method::POST, "/api/meal-plans", Some(day("2024-01-01"))).await;
        let uri = format!("/api/meal-plans/{}", body["data"]["id"].as_str().unwrap());

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Meal plan deleted successfully");
        assert_eq!(body["data"]["date"], "2024-01-01");

        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_bodies_are_bad_requests() {
        let app = memory_app(false);

        let (status, body) =
            send(&app, Method::POST, "/api/meal-plans", Some(json!({ "weight": "80" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/meal-plans",
            Some(json!({ "date": "2024-01-01", "weight": "80", "workout": "yes" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (_, body) = send(&app, Method::GET, "/api/meal-plans", None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
    }
}
