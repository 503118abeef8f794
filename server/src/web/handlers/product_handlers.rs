// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use storefront::ProductId;
use tracing::{info, instrument, warn};

use super::PageQuery;
use crate::errors::AppError;
use crate::state::AppState;
use crate::web::serializers::{PageView, ProductView};

#[instrument(name = "handler::list_products", skip(app_state, req, query_params), fields(page = ?query_params.page))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query_params: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
  let page_number = query_params.page_number()?;
  let page = app_state.catalog.product_page(&app_state.paginator, page_number).await?;

  info!(
    "Fetched page {} of {} ({} products total).",
    page.page, page.num_pages, page.count
  );

  let config = &app_state.config;
  let view = PageView::new(page.map(|p| ProductView::new(p, config)), req.path());
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId(path.into_inner());

  match app_state.catalog.get_product(product_id).await? {
    Some(product) => {
      info!("Product {} fetched successfully.", product_id);
      Ok(HttpResponse::Ok().json(ProductView::new(product, &app_state.config)))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(AppError::NotFound("Not found.".to_string()))
    }
  }
}
