// storefront/src/web/handlers/storefront_handlers.rs

use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::state::AppState;

// The page is compiled into the binary so the server has no runtime asset path.
const INDEX_HTML: &str = include_str!("../../../static/index.html");

pub async fn index_handler() -> HttpResponse {
  HttpResponse::Ok().content_type(ContentType::html()).body(INDEX_HTML)
}

pub async fn health_check_handler(app_state: web::Data<AppState>) -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({
    "status": "ok",
    "store": app_state.config.store_backend.as_str(),
  }))
}
