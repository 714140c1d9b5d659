use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use shared_config::AppConfig;

use crate::error::StoreError;

/// Opens the connection pool and brings the schema up to date.
pub async fn connect(config: &AppConfig) -> Result<PgPool, StoreError> {
    debug!(
        "Connecting to Postgres with up to {} connections",
        config.database_max_connections
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections.max(1))
        .connect(&config.database_url)
        .await?;

    run_migrations(&pool).await?;
    info!("Database ready");

    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
