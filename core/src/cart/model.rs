// core/src/cart/model.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::catalog::ProductId;
use crate::money::Money;

/// Identity of an authenticated user, as handed to us by the auth layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub i64);

impl fmt::Display for CartId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(pub i64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cart {
  pub id: CartId,
  pub user_id: UserId,
  pub created_at: DateTime<Utc>,
}

/// One line of a cart. `unit_price` is the product's current price, read
/// alongside the line rather than copied into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
  pub id: CartItemId,
  pub cart_id: CartId,
  pub product_id: ProductId,
  pub quantity: u32,
  pub unit_price: Money,
}

impl CartItem {
  pub fn total_price(&self) -> Money {
    self.unit_price.times(self.quantity)
  }
}

/// Read-only projection of a cart and its derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
  pub cart: Cart,
  pub items: Vec<CartItem>,
  pub total_items: usize,
  pub total_cost: Money,
}

impl CartSummary {
  pub fn new(cart: Cart, items: Vec<CartItem>) -> Self {
    let total_items = items.len();
    let total_cost = items.iter().map(CartItem::total_price).sum();
    Self { cart, items, total_items, total_cost }
  }
}
