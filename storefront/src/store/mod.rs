// storefront/src/store/mod.rs

//! Persistence for cart rows.
//!
//! `CartStore` is the only seam between the HTTP layer and the data store. The
//! server picks an adapter at startup and shares it through `AppState`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{CartItem, NewCartItem};

pub use memory::MemoryCartStore;
pub use postgres::PgCartStore;

#[async_trait]
pub trait CartStore: Send + Sync {
  /// All rows for `session_id`, oldest `created_at` first.
  async fn list(&self, session_id: &str) -> Result<Vec<CartItem>>;

  /// Inserts the row with quantity 1, or bumps the existing (session, product)
  /// row by one. Either way `updated_at` becomes `now`. Must be atomic.
  async fn add_or_increment(&self, item: NewCartItem, now: DateTime<Utc>) -> Result<CartItem>;

  /// Deletes a single row. Returns the number of rows removed (0 or 1).
  async fn remove(&self, id: Uuid) -> Result<u64>;

  /// Deletes every row belonging to `session_id`.
  async fn clear_session(&self, session_id: &str) -> Result<u64>;

  /// Deletes rows whose `updated_at` is strictly before `cutoff`, across all sessions.
  async fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<u64>;
}
