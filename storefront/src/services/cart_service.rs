// storefront/src/services/cart_service.rs

//! Cart operations scoped by session id: validation and retention rules live
//! here, persistence is delegated to a `CartStore`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{CartItem, NewCartItem};
use crate::store::CartStore;

/// Rows untouched for longer than this are removed by `expire_stale`.
pub const RETENTION_DAYS: i64 = 7;

/// Raw add request as it arrives from a client; every field may be absent.
#[derive(Debug, Clone, Default)]
pub struct AddToCart {
  pub session_id: Option<String>,
  pub product_id: Option<String>,
  pub product_name: Option<String>,
  pub product_price: Option<Decimal>,
  pub image_url: Option<String>,
}

/// The instant before which a row counts as stale.
pub fn retention_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
  now - Duration::days(RETENTION_DAYS)
}

// Empty strings count as missing, the same as absent fields.
fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}

#[instrument(name = "cart_service::list", skip(store))]
pub async fn list(store: &dyn CartStore, session_id: Option<String>) -> Result<Vec<CartItem>> {
  let session_id = present(session_id).ok_or_else(|| {
    warn!("List cart rejected: no session_id.");
    AppError::Validation("session_id required".to_string())
  })?;

  store.list(&session_id).await
}

#[instrument(
  name = "cart_service::add",
  skip(store, request),
  fields(session_id = ?request.session_id, product_id = ?request.product_id)
)]
pub async fn add(store: &dyn CartStore, request: AddToCart, now: DateTime<Utc>) -> Result<CartItem> {
  let (Some(session_id), Some(product_id)) = (present(request.session_id), present(request.product_id)) else {
    warn!("Add to cart rejected: session_id or product_id missing.");
    return Err(AppError::Validation("missing fields".to_string()));
  };

  // The name and price snapshot are NOT NULL in the table; refuse up front
  // rather than let the insert fail.
  let product_name = present(request.product_name)
    .ok_or_else(|| AppError::Validation("product_name required".to_string()))?;
  let product_price = request
    .product_price
    .ok_or_else(|| AppError::Validation("product_price required".to_string()))?;
  if product_price.is_sign_negative() {
    return Err(AppError::Validation("product_price must not be negative".to_string()));
  }

  let item = NewCartItem {
    session_id,
    product_id,
    product_name,
    product_price,
    image_url: present(request.image_url),
  };

  let row = store.add_or_increment(item, now).await?;
  info!(row_id = %row.id, quantity = row.quantity, "Cart row added or incremented.");
  Ok(row)
}

#[instrument(name = "cart_service::remove", skip(store))]
pub async fn remove(store: &dyn CartStore, id: Option<String>) -> Result<()> {
  let raw_id = present(id).ok_or_else(|| AppError::Validation("id required".to_string()))?;
  let id = Uuid::parse_str(raw_id.trim()).map_err(|_| {
    warn!(%raw_id, "Remove rejected: id is not a UUID.");
    AppError::Validation("id must be a UUID".to_string())
  })?;
  let removed = store.remove(id).await?;
  info!(removed, "Cart row removal processed.");
  Ok(())
}

#[instrument(name = "cart_service::clear", skip(store))]
pub async fn clear(store: &dyn CartStore, session_id: Option<String>) -> Result<()> {
  let session_id = present(session_id).ok_or_else(|| AppError::Validation("session_id required".to_string()))?;
  let removed = store.clear_session(&session_id).await?;
  info!(removed, "Cart cleared.");
  Ok(())
}

/// Deletes every row, in any session, last updated before the retention window.
#[instrument(name = "cart_service::expire_stale", skip(store))]
pub async fn expire_stale(store: &dyn CartStore, now: DateTime<Utc>) -> Result<u64> {
  let cutoff = retention_cutoff(now);
  let deleted = store.delete_updated_before(cutoff).await?;
  info!(deleted, %cutoff, "Stale cart rows expired.");
  Ok(deleted)
}
