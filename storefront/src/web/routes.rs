// storefront/src/web/routes.rs

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, storefront_handlers};

// Body and query parse failures answer with the same `{"error": ...}` shape as validation errors.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("invalid JSON body: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("invalid query string: {}", err)).into()
}

// Called from `main.rs` and the integration tests to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler))
    .route("/", web::get().to(storefront_handlers::index_handler))
    .service(
      web::scope("/api")
        .route("/health", web::get().to(storefront_handlers::health_check_handler))
        // Registered before `/cart` so the literal segment is matched first.
        .route("/cart/cleanup", web::delete().to(cart_handlers::cleanup_handler))
        .service(
          web::resource("/cart")
            .route(web::get().to(cart_handlers::list_cart_handler))
            .route(web::post().to(cart_handlers::add_to_cart_handler))
            .route(web::delete().to(cart_handlers::delete_from_cart_handler)),
        ),
    );
}
