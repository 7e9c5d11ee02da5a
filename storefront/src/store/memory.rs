// storefront/src/store/memory.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::CartStore;
use crate::errors::Result;
use crate::models::{CartItem, NewCartItem};

/// In-process `CartStore`. Rows live for the lifetime of the process.
///
/// Every operation holds the lock for its whole read-modify-write, which gives
/// the same one-row-per-(session, product) guarantee the postgres unique
/// constraint does.
#[derive(Default)]
pub struct MemoryCartStore {
  rows: Mutex<Vec<CartItem>>,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a row as-is, timestamps included.
  pub fn insert_row(&self, row: CartItem) {
    self.rows.lock().push(row);
  }

  pub fn len(&self) -> usize {
    self.rows.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.lock().is_empty()
  }
}

fn retain_counting<F>(rows: &mut Vec<CartItem>, mut keep: F) -> u64
where
  F: FnMut(&CartItem) -> bool,
{
  let before = rows.len();
  rows.retain(|row| keep(row));
  (before - rows.len()) as u64
}

#[async_trait]
impl CartStore for MemoryCartStore {
  async fn list(&self, session_id: &str) -> Result<Vec<CartItem>> {
    let mut items: Vec<CartItem> = self
      .rows
      .lock()
      .iter()
      .filter(|row| row.session_id == session_id)
      .cloned()
      .collect();
    // Stable sort: rows sharing a created_at keep insertion order.
    items.sort_by_key(|row| row.created_at);
    Ok(items)
  }

  async fn add_or_increment(&self, item: NewCartItem, now: DateTime<Utc>) -> Result<CartItem> {
    let mut rows = self.rows.lock();

    if let Some(existing) = rows
      .iter_mut()
      .find(|row| row.session_id == item.session_id && row.product_id == item.product_id)
    {
      existing.quantity += 1;
      existing.updated_at = now;
      return Ok(existing.clone());
    }

    let row = CartItem {
      id: Uuid::new_v4(),
      session_id: item.session_id,
      product_id: item.product_id,
      product_name: item.product_name,
      product_price: item.product_price,
      quantity: 1,
      image_url: item.image_url,
      created_at: now,
      updated_at: now,
    };
    rows.push(row.clone());
    Ok(row)
  }

  async fn remove(&self, id: Uuid) -> Result<u64> {
    Ok(retain_counting(&mut self.rows.lock(), |row| row.id != id))
  }

  async fn clear_session(&self, session_id: &str) -> Result<u64> {
    Ok(retain_counting(&mut self.rows.lock(), |row| row.session_id != session_id))
  }

  async fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
    Ok(retain_counting(&mut self.rows.lock(), |row| row.updated_at >= cutoff))
  }
}
