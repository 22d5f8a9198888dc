//! Database connection pool setup

use mediamount_core::MountResult;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Connect to the database holding the owning records
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    timeout_seconds: u64,
) -> MountResult<PgPool> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(timeout_seconds))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Database connected successfully");

    Ok(pool)
}
