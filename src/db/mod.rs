use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::{
    config::{Config, StorageBackend},
    services::{
        meal_plans::{MealPlanStore, PgMealPlanStore},
        memory::MemoryMealPlanStore,
    },
};

pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run the migrations embedded from ./migrations/
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Open the configured store. For PostgreSQL this connects and applies migrations.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn MealPlanStore>> {
    match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; records are lost on shutdown");
            Ok(Arc::new(MemoryMealPlanStore::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("Missing required env var: DATABASE_URL"))?;
            let pool = match create_pool(url, config.db_max_connections).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("Failed to connect to PostgreSQL: {}", e);
                    return Err(e);
                }
            };
            run_migrations(&pool).await?;
            tracing::info!("PostgreSQL connected and migrations applied");
            Ok(Arc::new(PgMealPlanStore::new(pool)))
        }
    }
}
