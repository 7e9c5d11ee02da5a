// storefront/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Which `CartStore` adapter the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  Memory,
}

impl StoreBackend {
  pub fn as_str(&self) -> &'static str {
    match self {
      StoreBackend::Postgres => "postgres",
      StoreBackend::Memory => "memory",
    }
  }
}

impl FromStr for StoreBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
      "memory" => Ok(StoreBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid CART_STORE '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,

  // Only read when the postgres backend is selected; checked by `db::get_client`.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub run_migrations: bool,

  /// Interval for the in-process stale-cart sweep. `None` leaves it to an external scheduler.
  pub cleanup_interval: Option<Duration>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      store_backend: StoreBackend::Postgres,
      database_url: None,
      database_max_connections: 5,
      run_migrations: false,
      cleanup_interval: None,
    }
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from an arbitrary variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let defaults = Self::default();

    let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port);
    let store_backend = parse_var(&lookup, "CART_STORE")?.unwrap_or(defaults.store_backend);
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let database_max_connections =
      parse_var(&lookup, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.database_max_connections);
    let run_migrations = parse_var(&lookup, "RUN_MIGRATIONS")?.unwrap_or(defaults.run_migrations);

    let cleanup_interval = match parse_var::<u64, _>(&lookup, "CLEANUP_INTERVAL_SECS")? {
      Some(0) | None => None,
      Some(secs) => Some(Duration::from_secs(secs)),
    };

    tracing::info!(
      backend = ?store_backend,
      host = %server_host,
      port = server_port,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      database_max_connections,
      run_migrations,
      cleanup_interval,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

fn parse_var<T, F>(lookup: &F, var_name: &str) -> Result<Option<T>>
where
  T: FromStr,
  T::Err: std::fmt::Display,
  F: Fn(&str) -> Option<String>,
{
  match lookup(var_name) {
    None => Ok(None),
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map(Some)
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", var_name, raw, e))),
  }
}
