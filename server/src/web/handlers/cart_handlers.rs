// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use serde::Deserialize;
use storefront::{ProductId, UserId};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::serializers::{CartItemView, CartView};

pub const USER_ID_HEADER: &str = "X-User-ID";

// --- Authenticated User Extractor ---
// Token issuance lives in the gateway in front of this service; it forwards the
// caller's id in `X-User-ID`.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let parsed = req
      .headers()
      .get(USER_ID_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    match parsed {
      Some(user_id) => futures_util::future::ready(Ok(AuthenticatedUser { user_id: UserId(user_id) })),
      None => {
        warn!("AuthenticatedUser extractor: Missing or invalid X-User-ID header.");
        futures_util::future::ready(Err(AppError::Auth(
          "Authentication credentials were not provided.".to_string(),
        )))
      }
    }
  }
}

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct AddItemPayload {
  pub product: i64,
  pub quantity: u32,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateItemPayload {
  #[serde(default)]
  pub quantity: Option<u32>,
}

// --- Handler Implementation ---

#[instrument(
    name = "handler::add_item",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %req_payload.product, quantity = %req_payload.quantity)
)]
pub async fn add_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  req_payload: web::Json<AddItemPayload>,
) -> Result<HttpResponse, AppError> {
  let AddItemPayload { product, quantity } = req_payload.into_inner();
  let item = app_state
    .carts
    .add_item(auth_user.user_id, ProductId(product), quantity)
    .await?;

  info!("Item {:?} added to cart of user {}.", item.id, auth_user.user_id);
  Ok(HttpResponse::Created().json(CartItemView::from(item)))
}

#[instrument(
    name = "handler::update_item",
    skip(app_state, path, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn update_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateItemPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = ProductId(path.into_inner());
  let item = app_state
    .carts
    .update_item_quantity(auth_user.user_id, product_id, req_payload.quantity)
    .await?;
  Ok(HttpResponse::Ok().json(CartItemView::from(item)))
}

#[instrument(
    name = "handler::remove_item",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, product_id = %path.as_ref())
)]
pub async fn remove_item_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  app_state
    .carts
    .remove_item(auth_user.user_id, ProductId(path.into_inner()))
    .await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::cart_summary", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn summary_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let summary = app_state.carts.summary(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(CartView::from(summary)))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let removed = app_state.carts.clear(auth_user.user_id).await?;
  info!("Cleared {} item(s) from cart.", removed);
  Ok(HttpResponse::NoContent().finish())
}
