// storefront/src/main.rs

use actix_web::rt::time::interval;
use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use storefront::config::{AppConfig, StoreBackend};
use storefront::services::cart_service;
use storefront::state::AppState;
use storefront::store::{CartStore, MemoryCartStore, PgCartStore};
use storefront::{db, telemetry, web};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(telemetry::env_filter("info")) // RUST_LOG overrides the info default
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  let store = build_store(&app_config).await?;

  if let Some(period) = app_config.cleanup_interval {
    spawn_cleanup_task(store.clone(), period);
  }

  let app_state = AppState::new(store, app_config.clone());

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await?;

  Ok(())
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CartStore>> {
  match config.store_backend {
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory cart store; carts are lost on restart.");
      Ok(Arc::new(MemoryCartStore::new()))
    }
    StoreBackend::Postgres => {
      let pool = db::get_client(config).context("Failed to create database pool")?;
      let store = PgCartStore::new(pool);
      if config.run_migrations {
        store.migrate().await.context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied.");
      }
      Ok(Arc::new(store))
    }
  }
}

/// Runs the stale-cart sweep on a fixed period. Failures are logged and the next tick tries again.
fn spawn_cleanup_task(store: Arc<dyn CartStore>, period: Duration) {
  tracing::info!(period_secs = period.as_secs(), "Scheduling stale cart cleanup.");
  actix_web::rt::spawn(async move {
    let mut ticker = interval(period);
    loop {
      ticker.tick().await;
      if let Err(e) = cart_service::expire_stale(store.as_ref(), Utc::now()).await {
        tracing::error!(error = %e, "Scheduled cart cleanup failed.");
      }
    }
  });
}
