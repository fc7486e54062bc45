//! Demo data seed script
//!
//! Fills the configured store with a run of consecutive days so the API has
//! something to show. Days that already have a record are left untouched.
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo --days 14 --end 2024-03-31

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use clap::Parser;

use meal_planner_api::{
    config::Config, db, error::StoreError, models::meal_plan::MealPlanPayload,
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo meal plans")]
struct Args {
    /// Number of consecutive days to seed
    #[arg(long, default_value_t = 7)]
    days: u32,

    /// Last day to seed (YYYY-MM-DD); defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,
}

const BREAKFASTS: &[&str] = &["Oats with berries", "Eggs and toast", "Greek yogurt with granola"];
const LUNCHES: &[&str] = &["Chicken rice bowl", "Tuna salad", "Beef burrito"];
const DINNERS: &[&str] = &["Salmon and potatoes", "Turkey pasta", "Tofu stir fry"];

fn demo_day(date: NaiveDate, index: usize) -> MealPlanPayload {
    let workout = index % 2 == 0;
    MealPlanPayload {
        date: Some(date.format("%Y-%m-%d").to_string()),
        weight: Some(format!("{:.1}", 82.0 - index as f64 * 0.1)),
        workout: Some(workout),
        creatine: Some(true),
        whey: Some(workout),
        breakfast: Some(BREAKFASTS[index % BREAKFASTS.len()].to_string()),
        morning_snack: Some("Apple".to_string()),
        lunch: Some(LUNCHES[index % LUNCHES.len()].to_string()),
        pre_workout: workout.then(|| "Banana".to_string()),
        post_workout: workout.then(|| "Protein shake".to_string()),
        dinner: Some(DINNERS[index % DINNERS.len()].to_string()),
        bedtime_snack: Some("Cottage cheese".to_string()),
        calories: Some(if workout { "2800" } else { "2400" }.to_string()),
        protein: Some("180".to_string()),
        notes: None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let store = db::open_store(&config).await?;

    let end = args.end.unwrap_or_else(|| Utc::now().date_naive());
    let mut created = 0;
    let mut skipped = 0;

    for index in 0..args.days as usize {
        let date = end - Duration::days(index as i64);
        match store.create(demo_day(date, index).validate()?).await {
            Ok(plan) => {
                created += 1;
                tracing::info!("Seeded {}", plan.date);
            }
            Err(StoreError::DuplicateKey { date }) => {
                skipped += 1;
                tracing::info!("Skipping {}: already recorded", date);
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seed complete: {} created, {} skipped", created, skipped);
    store.close().await;
    Ok(())
}
