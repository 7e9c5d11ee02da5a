// storefront/src/state.rs
use crate::config::AppConfig;
use crate::store::CartStore;
use std::sync::Arc;

/// Shared, read-only request context. Built once at startup and cloned into each worker.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn CartStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(store: Arc<dyn CartStore>, config: Arc<AppConfig>) -> Self {
    Self { store, config }
  }
}
