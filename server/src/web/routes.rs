// server/src/web/routes.rs

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, category_handlers, product_handlers};

// Extractor failures go through AppError so every error body has the same shape.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(path = %req.path(), error = %err, "Rejected request body.");
  AppError::Validation("Invalid request body.".to_string()).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
  tracing::warn!(path = %req.path(), error = %err, "Unparseable path parameter.");
  AppError::NotFound("Not found.".to_string()).into()
}

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler));

  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      .route("/health", web::get().to(health_check_handler))
      // Catalog browsing is public
      .service(
        web::scope("/categories")
          .route("", web::get().to(category_handlers::list_categories_handler))
          .route("/{category_id}", web::get().to(category_handlers::get_category_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler)),
      )
      // Cart routes require an `AuthenticatedUser`
      .service(
        web::scope("/cart")
          .route("/add-item", web::post().to(cart_handlers::add_item_handler))
          .route(
            "/update-item/{product_id}",
            web::patch().to(cart_handlers::update_item_handler),
          )
          .route(
            "/remove-item/{product_id}",
            web::delete().to(cart_handlers::remove_item_handler),
          )
          .route("/summary", web::get().to(cart_handlers::summary_handler))
          .route("/clear", web::delete().to(cart_handlers::clear_handler)),
      ),
  );
}
