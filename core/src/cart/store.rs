// core/src/cart/store.rs

use async_trait::async_trait;

use super::model::{Cart, CartId, CartItem, UserId};
use crate::catalog::ProductId;
use crate::error::StoreResult;

/// Persistence for carts and their line items.
///
/// Each method is one atomic step against the backing store. Implementations
/// must enforce one cart per user and one line per `(cart, product)` pair
/// themselves, so concurrent requests for the same user cannot slip a
/// duplicate past a separate existence check.
#[async_trait]
pub trait CartStore: Send + Sync {
  /// Returns the user's cart, creating it on first use.
  async fn get_or_create_cart(&self, user: UserId) -> StoreResult<Cart>;

  async fn find_item(&self, cart: CartId, product: ProductId) -> StoreResult<Option<CartItem>>;

  /// Inserts a new line.
  ///
  /// Fails with `DuplicateItem` if the cart already holds the product and
  /// with `ProductNotFound` if the product does not exist.
  async fn insert_item(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<CartItem>;

  /// Sets the quantity of an existing line; `None` when there is no such line.
  async fn set_quantity(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<Option<CartItem>>;

  /// Deletes a line, returning whether one existed.
  async fn delete_item(&self, cart: CartId, product: ProductId) -> StoreResult<bool>;

  /// Deletes every line in the cart, returning how many were removed.
  async fn delete_all_items(&self, cart: CartId) -> StoreResult<u64>;

  /// All lines in the cart, oldest first.
  async fn list_items(&self, cart: CartId) -> StoreResult<Vec<CartItem>>;
}
