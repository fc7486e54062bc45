use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::StoreError;

/// One day's meal-tracking record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: Uuid,
    pub date: String,
    pub weight: String,
    pub workout: bool,
    pub creatine: bool,
    pub whey: bool,
    #[sqlx(flatten)]
    pub meals: Meals,
    #[sqlx(flatten)]
    pub nutrition: Nutrition,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    pub breakfast: String,
    pub morning_snack: String,
    pub lunch: String,
    pub pre_workout: String,
    pub post_workout: String,
    pub dinner: String,
    pub bedtime_snack: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Nutrition {
    pub calories: String,
    pub protein: String,
}

/// Body for POST /api/meal-plans and PUT /api/meal-plans/:id.
///
/// The wire format is flat; meal and nutrition fields are grouped only once
/// the payload has been validated into a [`MealPlanInput`]. An omitted or
/// `null` field falls back to its default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanPayload {
    pub date: Option<String>,
    pub weight: Option<String>,
    pub workout: Option<bool>,
    pub creatine: Option<bool>,
    pub whey: Option<bool>,
    pub breakfast: Option<String>,
    pub morning_snack: Option<String>,
    pub lunch: Option<String>,
    pub pre_workout: Option<String>,
    pub post_workout: Option<String>,
    pub dinner: Option<String>,
    pub bedtime_snack: Option<String>,
    pub calories: Option<String>,
    pub protein: Option<String>,
    pub notes: Option<String>,
}

/// The mutable fields of a [`MealPlan`], with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MealPlanInput {
    pub date: String,
    pub weight: String,
    pub workout: bool,
    pub creatine: bool,
    pub whey: bool,
    pub meals: Meals,
    pub nutrition: Nutrition,
    pub notes: String,
}

impl MealPlanPayload {
    /// Check required fields and apply the default table to the rest.
    pub fn validate(self) -> Result<MealPlanInput, StoreError> {
        let date = required("date", self.date)?;
        let weight = required("weight", self.weight)?;

        Ok(MealPlanInput {
            date,
            weight,
            workout: self.workout.unwrap_or(false),
            creatine: self.creatine.unwrap_or(false),
            whey: self.whey.unwrap_or(false),
            meals: Meals {
                breakfast: self.breakfast.unwrap_or_default(),
                morning_snack: self.morning_snack.unwrap_or_default(),
                lunch: self.lunch.unwrap_or_default(),
                pre_workout: self.pre_workout.unwrap_or_default(),
                post_workout: self.post_workout.unwrap_or_default(),
                dinner: self.dinner.unwrap_or_default(),
                bedtime_snack: self.bedtime_snack.unwrap_or_default(),
            },
            nutrition: Nutrition {
                calories: self.calories.unwrap_or_default(),
                protein: self.protein.unwrap_or_default(),
            },
            notes: self.notes.unwrap_or_default(),
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, StoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(StoreError::Validation(format!("`{field}` is required"))),
    }
}

impl MealPlan {
    /// Build a brand-new record from validated input.
    pub fn new(input: MealPlanInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: input.date,
            weight: input.weight,
            workout: input.workout,
            creatine: input.creatine,
            whey: input.whey,
            meals: input.meals,
            nutrition: input.nutrition,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field; `id` and `created_at` are kept.
    pub fn replace(&mut self, input: MealPlanInput, now: DateTime<Utc>) {
        self.date = input.date;
        self.weight = input.weight;
        self.workout = input.workout;
        self.creatine = input.creatine;
        self.whey = input.whey;
        self.meals = input.meals;
        self.nutrition = input.nutrition;
        self.notes = input.notes;
        self.updated_at = now;
    }
}
