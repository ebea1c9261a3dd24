use std::collections::HashSet;
use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use cardsync_core::AppConfig;

use crate::DbError;

// Relative to this crate's manifest: <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Pool sizing taken from the `CARDSYNC_DB_*` settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl From<&AppConfig> for PoolConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout: Duration::from_secs(config.db_acquire_timeout_secs),
        }
    }
}

/// Open a pool against `database_url`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] when no connection can be made within the
/// acquire timeout.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(database_url)
        .await
}

/// Open a pool with the URL and sizing from `config`.
///
/// # Errors
///
/// Returns [`DbError::MissingDatabaseUrl`] when `DATABASE_URL` is unset, or
/// [`DbError::Sqlx`] when the database is unreachable.
pub async fn connect_pool_from_config(config: &AppConfig) -> Result<PgPool, DbError> {
    let Some(database_url) = config.database_url.as_deref() else {
        return Err(DbError::MissingDatabaseUrl);
    };
    Ok(connect_pool(database_url, PoolConfig::from(config)).await?)
}

/// Apply the embedded migrations and report how many were pending.
///
/// # Errors
///
/// Returns [`DbError::Migration`] if a migration fails to apply.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    let applied = applied_versions(pool).await;
    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration() && !applied.contains(&m.version))
        .count();

    MIGRATOR.run(pool).await?;
    Ok(pending)
}

// Empty on a fresh database where the bookkeeping table is not there yet.
async fn applied_versions(pool: &PgPool) -> HashSet<i64> {
    sqlx::query_scalar::<_, i64>("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await
        .map(|versions| versions.into_iter().collect())
        .unwrap_or_default()
}

/// Round-trip a trivial query to prove the pool can reach the database.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
