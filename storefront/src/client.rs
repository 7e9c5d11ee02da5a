// storefront/src/client.rs

//! HTTP client for the cart API, used by `storefront-cli`.

use reqwest::{Method, RequestBuilder, StatusCode};
use rust_decimal::prelude::ToPrimitive;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::catalog::Product;
use crate::models::CartItem;

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Server responded {status}: {message}")]
  Api { status: StatusCode, message: String },

  #[error("No cart session available")]
  NoSession,
}

#[derive(Deserialize)]
struct CleanupResponse {
  deleted: u64,
}

pub struct CartClient {
  http: reqwest::Client,
  base_url: String,
  session_id: String,
}

impl CartClient {
  /// `session_id` may be empty, in which case read calls return an empty
  /// cart and mutating calls fail with `NoSession` without touching the network.
  pub fn new(base_url: impl Into<String>, session_id: impl Into<String>) -> Self {
    Self {
      http: reqwest::Client::new(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
      session_id: session_id.into(),
    }
  }

  pub fn session_id(&self) -> &str {
    &self.session_id
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  fn require_session(&self) -> Result<&str, ClientError> {
    if self.session_id.is_empty() {
      Err(ClientError::NoSession)
    } else {
      Ok(&self.session_id)
    }
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    self.http.request(method, self.url(path))
  }

  fn list_request(&self) -> RequestBuilder {
    self
      .request(Method::GET, "/api/cart")
      .query(&[("session_id", self.session_id.as_str())])
  }

  async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response.json().await?);
    }

    let message = match response.json::<Value>().await {
      Ok(body) => body
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string()),
      Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
    };
    Err(ClientError::Api { status, message })
  }

  #[instrument(name = "cart_client::list", skip(self))]
  pub async fn list(&self) -> Result<Vec<CartItem>, ClientError> {
    if self.session_id.is_empty() {
      debug!("No session; skipping cart fetch.");
      return Ok(Vec::new());
    }
    self.send(self.list_request()).await
  }

  #[instrument(name = "cart_client::add", skip(self, product), fields(product_id = product.id))]
  pub async fn add(&self, product: &Product) -> Result<CartItem, ClientError> {
    let session_id = self.require_session()?;
    let body = json!({
      "session_id": session_id,
      "product_id": product.id,
      "product_name": product.name,
      // The API takes the price as a JSON number.
      "product_price": product.price().to_f64(),
    });
    self.send(self.request(Method::POST, "/api/cart").json(&body)).await
  }

  #[instrument(name = "cart_client::remove", skip(self))]
  pub async fn remove(&self, id: Uuid) -> Result<(), ClientError> {
    let body = json!({ "id": id });
    let _: Value = self.send(self.request(Method::DELETE, "/api/cart").json(&body)).await?;
    Ok(())
  }

  #[instrument(name = "cart_client::clear", skip(self))]
  pub async fn clear(&self) -> Result<(), ClientError> {
    let session_id = self.require_session()?;
    let body = json!({ "session_id": session_id, "clear": true });
    let _: Value = self.send(self.request(Method::DELETE, "/api/cart").json(&body)).await?;
    Ok(())
  }

  #[instrument(name = "cart_client::cleanup", skip(self))]
  pub async fn cleanup(&self) -> Result<u64, ClientError> {
    let response: CleanupResponse = self.send(self.request(Method::DELETE, "/api/cart/cleanup")).await?;
    Ok(response.deleted)
  }
}
