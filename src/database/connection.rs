//! PostgreSQL pool lifecycle
//!
//! Pool sizing and timeouts come straight from [`DatabaseConfig`].

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::utils::errors::Result;

pub type DatabasePool = PgPool;

/// Pool options for `config`, before any connection is attempted
fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(config.idle_timeout_secs.map(Duration::from_secs))
        .max_lifetime(config.max_lifetime_secs.map(Duration::from_secs))
}

/// Connect to PostgreSQL and make sure the server answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool> {
    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        acquire_timeout_secs = config.acquire_timeout_secs,
        "Opening PostgreSQL pool"
    );

    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!(max_connections = config.max_connections, "PostgreSQL pool ready");
    Ok(pool)
}

/// Open a pool and apply pending migrations when `run_migrations` is set
pub async fn connect(config: &DatabaseConfig) -> Result<DatabasePool> {
    let pool = create_pool(config).await?;
    if config.run_migrations {
        run_migrations(&pool).await?;
    }
    Ok(pool)
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Schema migrations applied");
    Ok(())
}

pub async fn health_check(pool: &DatabasePool) -> Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
