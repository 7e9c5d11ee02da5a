// storefront/src/models/cart_item.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `carts` table: a (session, product) pairing with a quantity.
///
/// `product_name`, `product_price` and `image_url` are snapshots taken when the
/// product was first added; later adds of the same product only bump `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CartItem {
  pub id: Uuid,
  pub session_id: String,
  pub product_id: String,
  pub product_name: String,
  #[serde(with = "rust_decimal::serde::float")]
  pub product_price: Decimal,
  pub quantity: i32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl CartItem {
  pub fn line_total(&self) -> Decimal {
    self.product_price * Decimal::from(self.quantity)
  }
}

/// Validated input for an add-or-increment.
#[derive(Debug, Clone)]
pub struct NewCartItem {
  pub session_id: String,
  pub product_id: String,
  pub product_name: String,
  pub product_price: Decimal,
  pub image_url: Option<String>,
}

/// Cart totals, always derived from the rows and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSummary {
  pub total_items: i64,
  #[serde(with = "rust_decimal::serde::float")]
  pub total_price: Decimal,
}

impl CartSummary {
  pub fn from_items(items: &[CartItem]) -> Self {
    items.iter().fold(Self::default(), |acc, item| Self {
      total_items: acc.total_items + i64::from(item.quantity),
      total_price: acc.total_price + item.line_total(),
    })
  }
}
