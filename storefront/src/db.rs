// storefront/src/db.rs

//! Process-wide database handle.

use once_cell::sync::OnceCell;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

static POOL: OnceCell<PgPool> = OnceCell::new();

/// Returns the shared pool, building it on the first call.
///
/// The pool connects lazily, so construction only fails on bad configuration;
/// connection errors show up on the first query that needs one. A failed
/// construction is not cached and the next call tries again.
///
/// Must be called from within a tokio runtime.
pub fn get_client(config: &AppConfig) -> Result<PgPool> {
  POOL
    .get_or_try_init(|| {
      let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::Config("Missing environment variable 'DATABASE_URL'".to_string()))?;

      let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect_lazy(url)
        .map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e)))?;

      info!(max_connections = config.database_max_connections, "Database pool created.");
      Ok(pool)
    })
    .cloned()
}
