// tests/store_concurrency_tests.rs
mod common;

use chrono::Utc;
use futures_util::future::join_all;
use rust_decimal::Decimal;
use std::sync::Arc;
use storefront::models::NewCartItem;
use storefront::store::{CartStore, MemoryCartStore};

fn headphones(session_id: &str) -> NewCartItem {
  NewCartItem {
    session_id: session_id.to_string(),
    product_id: "1".to_string(),
    product_name: "Wireless Headphones".to_string(),
    product_price: Decimal::new(5999, 2),
    image_url: None,
  }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_of_one_product_collapse_to_one_row() {
  common::setup_tracing();
  let store = Arc::new(MemoryCartStore::new());

  let tasks = (0..32).map(|_| {
    let store = store.clone();
    tokio::spawn(async move { store.add_or_increment(headphones("racy"), Utc::now()).await })
  });
  for result in join_all(tasks).await {
    result.unwrap().unwrap();
  }

  let items = store.list("racy").await.unwrap();
  assert_eq!(items.len(), 1);
  assert_eq!(items[0].quantity, 32);
}
