// server/src/db/cart.rs

//! Cart persistence. Every method is a single SQL statement, so each cart
//! mutation commits atomically; the `(cart_id, product_id)` unique constraint
//! settles concurrent adds of the same product.

use async_trait::async_trait;
use storefront::{Cart, CartId, CartItem, CartStore, ProductId, StoreError, StoreResult, UserId};
use tracing::{debug, instrument};

use super::{db_err, is_foreign_key_violation, is_unique_violation, PgStore};
use crate::models::{CartItemRow, CartRow};

const ITEM_WITH_PRICE: &str = "SELECT i.id, i.cart_id, i.product_id, i.quantity, p.price_cents \
   FROM {source} i JOIN products p ON p.id = i.product_id";

fn item_query(source: &str, tail: &str) -> String {
  format!("{} {}", ITEM_WITH_PRICE.replace("{source}", source), tail)
}

fn quantity_param(quantity: u32) -> StoreResult<i32> {
  i32::try_from(quantity).map_err(|_| StoreError::Validation(format!("quantity {} is too large", quantity)))
}

#[async_trait]
impl CartStore for PgStore {
  #[instrument(name = "db::get_or_create_cart", skip(self), fields(user_id = %user))]
  async fn get_or_create_cart(&self, user: UserId) -> StoreResult<Cart> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let row: CartRow = sqlx::query_as(
      "INSERT INTO carts (user_id) VALUES ($1) \
       ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
       RETURNING id, user_id, created_at",
    )
    .bind(user.0)
    .fetch_one(self.pool())
    .await
    .map_err(db_err)?;
    Ok(row.into())
  }

  async fn find_item(&self, cart: CartId, product: ProductId) -> StoreResult<Option<CartItem>> {
    let sql = item_query("cart_items", "WHERE i.cart_id = $1 AND i.product_id = $2");
    let row: Option<CartItemRow> = sqlx::query_as(&sql)
      .bind(cart.0)
      .bind(product.0)
      .fetch_optional(self.pool())
      .await
      .map_err(db_err)?;
    row.map(CartItem::try_from).transpose()
  }

  #[instrument(name = "db::insert_cart_item", skip(self), fields(cart_id = %cart, product_id = %product))]
  async fn insert_item(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<CartItem> {
    let sql = format!(
      "WITH inserted AS (\
         INSERT INTO cart_items (cart_id, product_id, quantity) VALUES ($1, $2, $3) \
         RETURNING id, cart_id, product_id, quantity\
       ) {}",
      item_query("inserted", "")
    );
    let row: CartItemRow = sqlx::query_as(&sql)
      .bind(cart.0)
      .bind(product.0)
      .bind(quantity_param(quantity)?)
      .fetch_one(self.pool())
      .await
      .map_err(|e| {
        if is_unique_violation(&e) {
          StoreError::DuplicateItem { product_id: product }
        } else if is_foreign_key_violation(&e) {
          StoreError::ProductNotFound { product_id: product }
        } else {
          db_err(e)
        }
      })?;
    debug!(item_id = row.id, "Inserted cart item.");
    CartItem::try_from(row)
  }

  #[instrument(name = "db::set_cart_item_quantity", skip(self), fields(cart_id = %cart, product_id = %product))]
  async fn set_quantity(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<Option<CartItem>> {
    let sql = format!(
      "WITH updated AS (\
         UPDATE cart_items SET quantity = $3 WHERE cart_id = $1 AND product_id = $2 \
         RETURNING id, cart_id, product_id, quantity\
       ) {}",
      item_query("updated", "")
    );
    let row: Option<CartItemRow> = sqlx::query_as(&sql)
      .bind(cart.0)
      .bind(product.0)
      .bind(quantity_param(quantity)?)
      .fetch_optional(self.pool())
      .await
      .map_err(db_err)?;
    row.map(CartItem::try_from).transpose()
  }

  async fn delete_item(&self, cart: CartId, product: ProductId) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
      .bind(cart.0)
      .bind(product.0)
      .execute(self.pool())
      .await
      .map_err(db_err)?;
    Ok(result.rows_affected() > 0)
  }

  async fn delete_all_items(&self, cart: CartId) -> StoreResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
      .bind(cart.0)
      .execute(self.pool())
      .await
      .map_err(db_err)?;
    Ok(result.rows_affected())
  }

  async fn list_items(&self, cart: CartId) -> StoreResult<Vec<CartItem>> {
    let sql = item_query("cart_items", "WHERE i.cart_id = $1 ORDER BY i.id ASC");
    let rows: Vec<CartItemRow> = sqlx::query_as(&sql)
      .bind(cart.0)
      .fetch_all(self.pool())
      .await
      .map_err(db_err)?;
    rows.into_iter().map(CartItem::try_from).collect()
  }
}
