// server/src/models/cart.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use storefront::{Cart, CartId, CartItem, CartItemId, ProductId, StoreError, StoreResult, UserId};
use uuid::Uuid;

use super::money_from_cents;

#[derive(Debug, Clone, FromRow)]
pub struct CartRow {
  pub id: i64,
  pub user_id: Uuid,
  pub created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
  fn from(row: CartRow) -> Self {
    Cart { id: CartId(row.id), user_id: UserId(row.user_id), created_at: row.created_at }
  }
}

/// A cart line joined with the product's current price.
#[derive(Debug, Clone, FromRow)]
pub struct CartItemRow {
  pub id: i64,
  pub cart_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  pub price_cents: i64,
}

impl TryFrom<CartItemRow> for CartItem {
  type Error = StoreError;

  fn try_from(row: CartItemRow) -> StoreResult<Self> {
    let quantity = u32::try_from(row.quantity)
      .map_err(|_| StoreError::from(anyhow::anyhow!("cart item {} has quantity {}", row.id, row.quantity)))?;
    Ok(CartItem {
      id: CartItemId(row.id),
      cart_id: CartId(row.cart_id),
      product_id: ProductId(row.product_id),
      quantity,
      unit_price: money_from_cents(row.price_cents)?,
    })
  }
}
