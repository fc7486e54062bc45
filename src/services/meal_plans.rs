use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::StoreError,
    models::meal_plan::{MealPlan, MealPlanInput},
};

/// Persistent home of meal-plan records. At most one record exists per `date`.
#[async_trait]
pub trait MealPlanStore: Send + Sync {
    /// All records, newest date first.
    async fn list(&self) -> Result<Vec<MealPlan>, StoreError>;

    async fn create(&self, input: MealPlanInput) -> Result<MealPlan, StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError>;

    /// Replace every mutable field of the record identified by `id`.
    async fn update(&self, id: Uuid, input: MealPlanInput) -> Result<MealPlan, StoreError>;

    /// Remove the record and hand back what was stored.
    async fn delete_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError>;

    /// Release the underlying resources. Called once at shutdown.
    async fn close(&self);
}

const COLUMNS: &str = "id, date, weight, workout, creatine, whey,
    breakfast, morning_snack, lunch, pre_workout, post_workout, dinner, bedtime_snack,
    calories, protein, notes, created_at, updated_at";

pub struct PgMealPlanStore {
    pool: PgPool,
}

impl PgMealPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealPlanStore for PgMealPlanStore {
    async fn list(&self) -> Result<Vec<MealPlan>, StoreError> {
        // "C" collation keeps the ordering byte-wise, independent of the server locale.
        let plans = sqlx::query_as::<_, MealPlan>(&format!(
            r#"SELECT {COLUMNS} FROM meal_plans ORDER BY date COLLATE "C" DESC"#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(plans)
    }

    async fn create(&self, input: MealPlanInput) -> Result<MealPlan, StoreError> {
        let plan = MealPlan::new(input, Utc::now());
        let saved = sqlx::query_as::<_, MealPlan>(&format!(
            "INSERT INTO meal_plans ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
             RETURNING {COLUMNS}"
        ))
        .bind(plan.id)
        .bind(&plan.date)
        .bind(&plan.weight)
        .bind(plan.workout)
        .bind(plan.creatine)
        .bind(plan.whey)
        .bind(&plan.meals.breakfast)
        .bind(&plan.meals.morning_snack)
        .bind(&plan.meals.lunch)
        .bind(&plan.meals.pre_workout)
        .bind(&plan.meals.post_workout)
        .bind(&plan.meals.dinner)
        .bind(&plan.meals.bedtime_snack)
        .bind(&plan.nutrition.calories)
        .bind(&plan.nutrition.protein)
        .bind(&plan.notes)
        .bind(plan.created_at)
        .bind(plan.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(e, &plan.date))?;
        Ok(saved)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError> {
        sqlx::query_as::<_, MealPlan>(&format!("SELECT {COLUMNS} FROM meal_plans WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, input: MealPlanInput) -> Result<MealPlan, StoreError> {
        sqlx::query_as::<_, MealPlan>(&format!(
            "UPDATE meal_plans
             SET date          = $1,
                 weight        = $2,
                 workout       = $3,
                 creatine      = $4,
                 whey          = $5,
                 breakfast     = $6,
                 morning_snack = $7,
                 lunch         = $8,
                 pre_workout   = $9,
                 post_workout  = $10,
                 dinner        = $11,
                 bedtime_snack = $12,
                 calories      = $13,
                 protein       = $14,
                 notes         = $15,
                 updated_at    = $16
             WHERE id = $17
             RETURNING {COLUMNS}"
        ))
        .bind(&input.date)
        .bind(&input.weight)
        .bind(input.workout)
        .bind(input.creatine)
        .bind(input.whey)
        .bind(&input.meals.breakfast)
        .bind(&input.meals.morning_snack)
        .bind(&input.meals.lunch)
        .bind(&input.meals.pre_workout)
        .bind(&input.meals.post_workout)
        .bind(&input.meals.dinner)
        .bind(&input.meals.bedtime_snack)
        .bind(&input.nutrition.calories)
        .bind(&input.nutrition.protein)
        .bind(&input.notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_write(e, &input.date))?
        .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<MealPlan, StoreError> {
        sqlx::query_as::<_, MealPlan>(&format!(
            "DELETE FROM meal_plans WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
