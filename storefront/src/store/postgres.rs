// storefront/src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::CartStore;
use crate::errors::{AppError, Result};
use crate::models::{CartItem, NewCartItem};

const CART_COLUMNS: &str =
  "id, session_id, product_id, product_name, product_price, quantity, image_url, created_at, updated_at";

/// `CartStore` over the `carts` table in PostgreSQL.
#[derive(Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Applies the bundled migrations (creates `carts` and its indexes).
  pub async fn migrate(&self) -> Result<()> {
    sqlx::migrate!("./migrations").run(&self.pool).await?;
    Ok(())
  }
}

fn log_store_error(op: &'static str) -> impl Fn(sqlx::Error) -> AppError {
  move |e| {
    error!(operation = op, error = %e, "Cart store operation failed.");
    AppError::from(e)
  }
}

#[async_trait]
impl CartStore for PgCartStore {
  #[instrument(name = "pg_cart_store::list", skip(self))]
  async fn list(&self, session_id: &str) -> Result<Vec<CartItem>> {
    let items: Vec<CartItem> = sqlx::query_as(&format!(
      "SELECT {} FROM carts WHERE session_id = $1 ORDER BY created_at ASC, id ASC",
      CART_COLUMNS
    ))
    .bind(session_id)
    .fetch_all(&self.pool)
    .await
    .map_err(log_store_error("list"))?;

    debug!(count = items.len(), "Fetched cart rows.");
    Ok(items)
  }

  #[instrument(
    name = "pg_cart_store::add_or_increment",
    skip(self, item),
    fields(session_id = %item.session_id, product_id = %item.product_id)
  )]
  async fn add_or_increment(&self, item: NewCartItem, now: DateTime<Utc>) -> Result<CartItem> {
    // One statement, guarded by UNIQUE (session_id, product_id): concurrent adds
    // of the same product collapse onto a single row instead of racing.
    let row: CartItem = sqlx::query_as(&format!(
      r#"
      INSERT INTO carts (id, session_id, product_id, product_name, product_price, image_url, quantity, created_at, updated_at)
      VALUES ($1, $2, $3, $4, $5, $6, 1, $7, $7)
      ON CONFLICT (session_id, product_id) DO UPDATE
      SET quantity = carts.quantity + 1, updated_at = EXCLUDED.updated_at
      RETURNING {}
      "#,
      CART_COLUMNS
    ))
    .bind(Uuid::new_v4())
    .bind(&item.session_id)
    .bind(&item.product_id)
    .bind(&item.product_name)
    .bind(item.product_price)
    .bind(&item.image_url)
    .bind(now)
    .fetch_one(&self.pool)
    .await
    .map_err(log_store_error("add_or_increment"))?;

    debug!(row_id = %row.id, quantity = row.quantity, "Cart row upserted.");
    Ok(row)
  }

  #[instrument(name = "pg_cart_store::remove", skip(self))]
  async fn remove(&self, id: Uuid) -> Result<u64> {
    let result = sqlx::query("DELETE FROM carts WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await
      .map_err(log_store_error("remove"))?;
    Ok(result.rows_affected())
  }

  #[instrument(name = "pg_cart_store::clear_session", skip(self))]
  async fn clear_session(&self, session_id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM carts WHERE session_id = $1")
      .bind(session_id)
      .execute(&self.pool)
      .await
      .map_err(log_store_error("clear_session"))?;
    Ok(result.rows_affected())
  }

  #[instrument(name = "pg_cart_store::delete_updated_before", skip(self))]
  async fn delete_updated_before(&self, cutoff: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM carts WHERE updated_at < $1")
      .bind(cutoff)
      .execute(&self.pool)
      .await
      .map_err(log_store_error("delete_updated_before"))?;
    Ok(result.rows_affected())
  }
}
