//! Test helpers: routers wired to throwaway stores and a request shortcut.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use crate::{
    config::{Config, StorageBackend},
    error::StoreError,
    models::meal_plan::{MealPlan, MealPlanInput},
    routes,
    services::{meal_plans::MealPlanStore, memory::MemoryMealPlanStore},
    AppState,
};

pub fn test_config(development: bool) -> Config {
    Config {
        storage: StorageBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        app_env: if development { "development" } else { "production" }.into(),
    }
}

pub fn app_with(store: Arc<dyn MealPlanStore>, development: bool) -> Router {
    routes::router(AppState {
        store,
        config: Arc::new(test_config(development)),
    })
}

pub fn memory_app(development: bool) -> Router {
    app_with(Arc::new(MemoryMealPlanStore::new()), development)
}

/// Send one request through the router and decode the JSON reply.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// A store whose connection is gone: reads fail, lookups panic.
pub struct BrokenStore;

#[async_trait]
impl MealPlanStore for BrokenStore {
    async fn list(&self) -> Result<Vec<MealPlan>, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _input: MealPlanInput) -> Result<MealPlan, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn get_by_id(&self, _id: Uuid) -> Result<MealPlan, StoreError> {
        panic!("storage driver exploded")
    }

    async fn update(&self, _id: Uuid, _input: MealPlanInput) -> Result<MealPlan, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn delete_by_id(&self, _id: Uuid) -> Result<MealPlan, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn close(&self) {}
}
