use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::StoreError,
    models::meal_plan::{MealPlan, MealPlanInput},
    services::meal_plans::MealPlanStore,
};

/// Process-local store. Records live only as long as the process.
#[derive(Default)]
pub struct MemoryMealPlanStore {
    plans: RwLock<HashMap<Uuid, MealPlan>>,
}

impl MemoryMealPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn date_taken(plans: &HashMap<Uuid, MealPlan>, date: &str, except: Option<Uuid>) -> bool {
    plans
        .values()
        .any(|p| p.date == date && Some(p.id) != except)
}

#[async_trait]
impl MealPlanStore for MemoryMealPlanStore {
    async fn list(&self) -> Result<Vec<MealPlan>, StoreError> {
        let mut plans: Vec<MealPlan> = self.plans.read().await.values().cloned().collect();
        plans.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(plans)
    }

    async fn create(&self, input: MealPlanInput) -> Result<MealPlan, StoreError> {
        let mut plans = self.plans.write().await;
        if date_taken(&plans, &input.date, None) {
            return Err(StoreError::DuplicateKey { date: input.date });
        }
        let plan = MealPlan::new(input, Utc::now());
        plans.insert(plan.id, plan.clone());
        Ok(plan)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError> {
        self.plans
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, input: MealPlanInput) -> Result<MealPlan, StoreError> {
        let mut plans = self.plans.write().await;
        if !plans.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        if date_taken(&plans, &input.date, Some(id)) {
            return Err(StoreError::DuplicateKey { date: input.date });
        }
        let plan = plans.get_mut(&id).ok_or(StoreError::NotFound)?;
        plan.replace(input, Utc::now());
        Ok(plan.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError> {
        self.plans
            .write()
            .await
            .remove(&id)
            .ok_or(StoreError::NotFound)
    }

    async fn close(&self) {
        self.plans.write().await.clear();
    }
}
