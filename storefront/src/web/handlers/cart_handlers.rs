// storefront/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::cart_service::{self, AddToCart};
use crate::state::AppState;

// --- Request DTOs ---
// Fields are optional so that a missing value reaches validation and comes
// back as a 400 naming the field, instead of a generic extractor error.

#[derive(Deserialize, Debug)]
pub struct CartQuery {
  pub session_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AddToCartPayload {
  pub session_id: Option<String>,
  pub product_id: Option<String>,
  pub product_name: Option<String>,
  #[serde(default, with = "rust_decimal::serde::float_option")]
  pub product_price: Option<Decimal>,
  pub image_url: Option<String>,
}

// `id` stays a string so a malformed id cannot reject a body that also asks to clear.
#[derive(Deserialize, Debug)]
pub struct DeleteCartPayload {
  pub id: Option<String>,
  pub session_id: Option<String>,
  #[serde(default)]
  pub clear: bool,
}

// --- Handler Implementations ---

#[instrument(name = "handler::list_cart", skip(app_state, query), fields(session_id = ?query.session_id))]
pub async fn list_cart_handler(
  app_state: web::Data<AppState>,
  query: web::Query<CartQuery>,
) -> Result<HttpResponse, AppError> {
  let items = cart_service::list(app_state.store.as_ref(), query.into_inner().session_id).await?;
  info!(count = items.len(), "Cart fetched.");
  Ok(HttpResponse::Ok().json(items))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload),
  fields(session_id = ?req_payload.session_id, product_id = ?req_payload.product_id)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let request = AddToCart {
    session_id: payload.session_id,
    product_id: payload.product_id,
    product_name: payload.product_name,
    product_price: payload.product_price,
    image_url: payload.image_url,
  };

  let item = cart_service::add(app_state.store.as_ref(), request, Utc::now()).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::delete_from_cart", skip(app_state, req_payload))]
pub async fn delete_from_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<DeleteCartPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let store = app_state.store.as_ref();

  // A clear request takes precedence over a single-row delete.
  match payload {
    DeleteCartPayload {
      clear: true,
      session_id: Some(session_id),
      ..
    } if !session_id.trim().is_empty() => cart_service::clear(store, Some(session_id)).await?,
    DeleteCartPayload { id, .. } => cart_service::remove(store, id).await?,
  }

  Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

#[instrument(name = "handler::cleanup_carts", skip(app_state))]
pub async fn cleanup_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let deleted = cart_service::expire_stale(app_state.store.as_ref(), Utc::now()).await?;
  Ok(HttpResponse::Ok().json(json!({ "success": true, "deleted": deleted })))
}
