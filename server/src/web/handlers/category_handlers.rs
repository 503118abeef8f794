// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use storefront::CategoryId;
use tracing::{info, instrument, warn};

use super::PageQuery;
use crate::errors::AppError;
use crate::state::AppState;
use crate::web::serializers::{CategoryView, PageView};

#[instrument(name = "handler::list_categories", skip(app_state, req, query_params), fields(page = ?query_params.page))]
pub async fn list_categories_handler(
  app_state: web::Data<AppState>,
  req: HttpRequest,
  query_params: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
  let page_number = query_params.page_number()?;
  let page = app_state.catalog.category_page(&app_state.paginator, page_number).await?;
  info!("Fetched {} of {} categories.", page.results.len(), page.count);

  let config = &app_state.config;
  let view = PageView::new(page.map(|c| CategoryView::new(c, config)), req.path());
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let category_id = CategoryId(path.into_inner());

  let Some(category) = app_state.catalog.get_category(category_id).await? else {
    warn!("Category with ID {} not found.", category_id);
    return Err(AppError::NotFound("Not found.".to_string()));
  };
  Ok(HttpResponse::Ok().json(CategoryView::new(category, &app_state.config)))
}
