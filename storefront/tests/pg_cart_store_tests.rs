// tests/pg_cart_store_tests.rs
//! `PgCartStore` against a live PostgreSQL.
//!
//! Each test migrates a throwaway schema and drops it afterwards. Set
//! `DATABASE_URL` to run them; without it every test prints a skip marker and
//! returns.
mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use futures_util::future::join_all;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use storefront::models::NewCartItem;
use storefront::services::cart_service::{self, retention_cutoff};
use storefront::store::{CartStore, PgCartStore};
use uuid::Uuid;

struct TestDb {
  admin: PgPool,
  schema: String,
  store: PgCartStore,
}

impl TestDb {
  async fn connect() -> Option<Self> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
      eprintln!("SKIP-PG: DATABASE_URL is not set");
      return None;
    };
    common::setup_tracing();

    let admin = PgPoolOptions::new()
      .max_connections(1)
      .connect(&url)
      .await
      .expect("connect to DATABASE_URL");
    let schema = format!("cart_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
      .execute(&admin)
      .await
      .expect("create test schema");

    let search_path = format!("SET search_path TO {}", schema);
    let pool = PgPoolOptions::new()
      .max_connections(8)
      .after_connect(move |conn, _meta| {
        let search_path = search_path.clone();
        Box::pin(async move {
          sqlx::query(&search_path).execute(&mut *conn).await?;
          Ok(())
        })
      })
      .connect(&url)
      .await
      .expect("connect test pool");

    let store = PgCartStore::new(pool);
    store.migrate().await.expect("apply migrations");
    Some(Self { admin, schema, store })
  }

  async fn drop_schema(self) {
    sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
      .execute(&self.admin)
      .await
      .expect("drop test schema");
  }
}

// Whole seconds, so values survive the round trip through TIMESTAMPTZ unchanged.
fn noon() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
}

fn product(session_id: &str, product_id: &str) -> NewCartItem {
  NewCartItem {
    session_id: session_id.to_string(),
    product_id: product_id.to_string(),
    product_name: format!("Product {}", product_id),
    product_price: Decimal::new(5999, 2),
    image_url: None,
  }
}

#[tokio::test]
async fn adding_twice_increments_one_row() {
  let Some(db) = TestDb::connect().await else { return };
  let store = &db.store;

  let first = store.add_or_increment(product("s", "1"), noon()).await.unwrap();
  let later = noon() + Duration::minutes(5);
  let second = store.add_or_increment(product("s", "1"), later).await.unwrap();

  assert_eq!(first.id, second.id);
  assert_eq!(second.quantity, 2);
  assert_eq!(second.created_at, noon());
  assert_eq!(second.updated_at, later);
  assert_eq!(second.product_price, Decimal::new(5999, 2));

  let items = store.list("s").await.unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].quantity, 2);

  db.drop_schema().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_collapse_to_one_row() {
  let Some(db) = TestDb::connect().await else { return };

  let tasks = (0..16).map(|_| {
    let store = db.store.clone();
    tokio::spawn(async move { store.add_or_increment(product("racy", "1"), noon()).await })
  });
  for result in join_all(tasks).await {
    result.unwrap().unwrap();
  }

  let items = db.store.list("racy").await.unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].quantity, 16);

  db.drop_schema().await;
}

#[tokio::test]
async fn list_keeps_creation_order_after_an_update() {
  let Some(db) = TestDb::connect().await else { return };
  let store = &db.store;

  store.add_or_increment(product("s", "a"), noon()).await.unwrap();
  store.add_or_increment(product("s", "b"), noon() + Duration::seconds(1)).await.unwrap();
  store.add_or_increment(product("s", "a"), noon() + Duration::seconds(2)).await.unwrap();
  store.add_or_increment(product("other", "c"), noon()).await.unwrap();

  let items = store.list("s").await.unwrap();
  let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
  assert_eq!(ids, ["a", "b"]);
  assert_eq!(items[0].quantity, 2);
  assert_eq!(items[0].updated_at, noon() + Duration::seconds(2));

  db.drop_schema().await;
}

#[tokio::test]
async fn remove_and_clear_report_rows_deleted() {
  let Some(db) = TestDb::connect().await else { return };
  let store = &db.store;

  let row = store.add_or_increment(product("s", "1"), noon()).await.unwrap();
  store.add_or_increment(product("s", "2"), noon()).await.unwrap();
  store.add_or_increment(product("s", "3"), noon()).await.unwrap();
  store.add_or_increment(product("keep", "1"), noon()).await.unwrap();

  assert_eq!(store.remove(row.id).await.unwrap(), 1);
  assert_eq!(store.remove(row.id).await.unwrap(), 0);
  assert_eq!(store.clear_session("s").await.unwrap(), 2);
  assert_eq!(store.clear_session("s").await.unwrap(), 0);

  assert!(store.list("s").await.unwrap().is_empty());
  assert_eq!(store.list("keep").await.unwrap().len(), 1);

  db.drop_schema().await;
}

#[tokio::test]
async fn expire_deletes_only_rows_older_than_the_cutoff() {
  let Some(db) = TestDb::connect().await else { return };
  let store = &db.store;
  let cutoff = retention_cutoff(noon());

  store.add_or_increment(product("a", "old"), cutoff - Duration::seconds(1)).await.unwrap();
  store.add_or_increment(product("b", "old"), cutoff - Duration::days(3)).await.unwrap();
  store.add_or_increment(product("a", "edge"), cutoff).await.unwrap();
  store.add_or_increment(product("a", "fresh"), cutoff + Duration::seconds(1)).await.unwrap();
  // Created long ago but touched recently.
  store.add_or_increment(product("b", "touched"), cutoff - Duration::days(1)).await.unwrap();
  store.add_or_increment(product("b", "touched"), noon()).await.unwrap();

  assert_eq!(cart_service::expire_stale(store, noon()).await.unwrap(), 2);

  let a: Vec<String> = store.list("a").await.unwrap().into_iter().map(|i| i.product_id).collect();
  assert_eq!(a, ["edge", "fresh"]);
  let b = store.list("b").await.unwrap();
  assert_eq!(b.len(), 1);
  assert_eq!(b[0].product_id, "touched");

  assert_eq!(cart_service::expire_stale(store, noon()).await.unwrap(), 0);

  db.drop_schema().await;
}
