pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

use std::{fmt::Display, sync::Arc};

use config::Config;
use services::meal_plans::MealPlanStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MealPlanStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// What a client is told about an internal failure.
    pub fn error_detail(&self, detail: impl Display) -> String {
        if self.config.is_development() {
            detail.to_string()
        } else {
            "Something went wrong".to_string()
        }
    }
}
