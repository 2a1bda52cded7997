use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get the shared connection pool, creating it on first use.
/// Connections are established lazily so the server can start (and report a
/// degraded health status) while the database is unreachable.
pub async fn db_pool() -> Result<PgPool, DatabaseError> {
    let pool = POOL.get_or_try_init(build_pool).await?;
    Ok(pool.clone())
}

async fn build_pool() -> Result<PgPool, DatabaseError> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;

    let db_config = &config::config().database;
    let pool = PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_secs(db_config.connection_timeout))
        .connect_lazy(&url)?;

    info!("Created database pool");
    Ok(pool)
}

/// Apply pending migrations from the `migrations/` directory
pub async fn run_migrations() -> Result<(), DatabaseError> {
    let pool = db_pool().await?;
    sqlx::migrate!().run(&pool).await?;
    info!("Database migrations are up to date");
    Ok(())
}

/// Pings the pool to ensure connectivity
pub async fn health_check() -> Result<(), DatabaseError> {
    let pool = db_pool().await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(())
}

/// Map unique-key and exclusion-constraint violations to `Conflict` so the
/// API layer can surface them; everything else passes through as `Sqlx`.
pub(crate) fn map_constraint_error(err: sqlx::Error, message: &str) -> DatabaseError {
    if let sqlx::Error::Database(ref db_err) = err {
        // 23505 unique_violation, 23P01 exclusion_violation
        if matches!(db_err.code().as_deref(), Some("23505") | Some("23P01")) {
            return DatabaseError::Conflict(message.to_string());
        }
    }
    DatabaseError::Sqlx(err)
}
