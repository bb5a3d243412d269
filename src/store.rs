//! PostgreSQL connection pool. Tables are expected to exist (see `db/schema.sql`).

use crate::config::AppConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the pool and verify one connection. Callers treat failure as fatal.
pub async fn connect(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(max_connections = config.max_connections, "connecting to PostgreSQL");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(&config.database_url)
        .await?;
    tracing::info!("PostgreSQL pool established");
    Ok(pool)
}
