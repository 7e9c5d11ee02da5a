// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use actix_web::dev::ServiceResponse;
use actix_web::{test, web, App};
use std::sync::{Arc, Once};
use storefront::config::{AppConfig, StoreBackend};
use storefront::state::AppState;
use storefront::store::{CartStore, MemoryCartStore};
use storefront::web::configure_app_routes;

static TRACING: Once = Once::new();

pub fn setup_tracing() {
  TRACING.call_once(|| {
    tracing_subscriber::fmt()
      .with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
      )
      .with_test_writer()
      .init();
  });
}

pub fn memory_state() -> (AppState, Arc<MemoryCartStore>) {
  let store = Arc::new(MemoryCartStore::new());
  let config = AppConfig {
    store_backend: StoreBackend::Memory,
    ..AppConfig::default()
  };
  let dyn_store: Arc<dyn CartStore> = store.clone();
  (AppState::new(dyn_store, Arc::new(config)), store)
}

pub fn add_body(session_id: &str, product_id: &str, name: &str, price: f64) -> serde_json::Value {
  serde_json::json!({
    "session_id": session_id,
    "product_id": product_id,
    "product_name": name,
    "product_price": price,
  })
}

pub async fn json_body(resp: ServiceResponse) -> serde_json::Value {
  test::read_body_json(resp).await
}

/// The full app, with the same routes the server mounts, over the given state.
pub fn app_with(state: AppState) -> App<
  impl actix_web::dev::ServiceFactory<
    actix_web::dev::ServiceRequest,
    Config = (),
    Response = ServiceResponse,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  App::new().app_data(web::Data::new(state)).configure(configure_app_routes)
}
