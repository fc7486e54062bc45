pub mod meal_plans;
pub mod memory;
