// core/src/cart/service.rs

//! The cart aggregator: per-user cart operations on top of a `CartStore`.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::model::{Cart, CartId, CartItem, CartSummary, UserId};
use super::store::CartStore;
use crate::catalog::{CatalogStore, ProductId};
use crate::error::{StoreError, StoreResult};
use crate::money::Money;

#[derive(Clone)]
pub struct CartService {
  carts: Arc<dyn CartStore>,
  catalog: Arc<dyn CatalogStore>,
}

fn invalid_product(product_id: ProductId) -> StoreError {
  StoreError::Validation(format!("Invalid product id {}: object does not exist", product_id))
}

fn validate_quantity(quantity: u32) -> StoreResult<()> {
  if quantity == 0 {
    return Err(StoreError::Validation("quantity must be a positive number".to_string()));
  }
  Ok(())
}

impl CartService {
  pub fn new(carts: Arc<dyn CartStore>, catalog: Arc<dyn CatalogStore>) -> Self {
    Self { carts, catalog }
  }

  #[instrument(name = "cart::get_or_create", skip(self), fields(user_id = %user))]
  pub async fn get_or_create_cart(&self, user: UserId) -> StoreResult<Cart> {
    let cart = self.carts.get_or_create_cart(user).await?;
    debug!(cart_id = %cart.id, "Resolved cart for user.");
    Ok(cart)
  }

  /// Rejects a quantity whose line total, or the cart total it would produce, overflows.
  async fn ensure_total_fits(
    &self,
    cart: CartId,
    product: ProductId,
    unit_price: Money,
    quantity: u32,
  ) -> StoreResult<()> {
    let items = self.carts.list_items(cart).await?;
    let mut total = unit_price.checked_times(quantity);
    for item in items.iter().filter(|item| item.product_id != product) {
      total = total.and_then(|sum| sum.checked_add(item.unit_price.checked_times(item.quantity)?));
    }
    if total.is_none() {
      warn!(cart_id = %cart, quantity, "Cart total would overflow.");
      return Err(StoreError::Validation(format!(
        "quantity {} is too large for this cart",
        quantity
      )));
    }
    Ok(())
  }

  async fn current_price(&self, product: ProductId) -> StoreResult<Option<Money>> {
    Ok(self.catalog.get_product(product).await?.map(|detail| detail.product.price))
  }

  async fn ensure_product(&self, product: ProductId) -> StoreResult<()> {
    if self.catalog.product_exists(product).await? {
      Ok(())
    } else {
      warn!(product_id = %product, "Product does not exist.");
      Err(StoreError::ProductNotFound { product_id: product })
    }
  }

  /// Adds a new line for `product`. A product already in the cart is rejected
  /// with `DuplicateItem`; use `update_item_quantity` to change it.
  #[instrument(name = "cart::add_item", skip(self), fields(user_id = %user, product_id = %product))]
  pub async fn add_item(&self, user: UserId, product: ProductId, quantity: u32) -> StoreResult<CartItem> {
    validate_quantity(quantity)?;
    let cart = self.get_or_create_cart(user).await?;

    // An unknown product is a bad request body here, not a missing resource.
    let Some(unit_price) = self.current_price(product).await? else {
      warn!("Product does not exist.");
      return Err(invalid_product(product));
    };
    self.ensure_total_fits(cart.id, product, unit_price, quantity).await?;

    let item = self
      .carts
      .insert_item(cart.id, product, quantity)
      .await
      .map_err(|e| match e {
        StoreError::ProductNotFound { product_id } => invalid_product(product_id),
        e @ StoreError::DuplicateItem { .. } => {
          warn!(cart_id = %cart.id, "Product already in cart.");
          e
        }
        other => other,
      })?;

    info!(cart_id = %cart.id, item_quantity = item.quantity, "Added item to cart.");
    Ok(item)
  }

  /// Changes the quantity of an existing line. `None` leaves the line as it is.
  #[instrument(name = "cart::update_item_quantity", skip(self), fields(user_id = %user, product_id = %product))]
  pub async fn update_item_quantity(
    &self,
    user: UserId,
    product: ProductId,
    quantity: Option<u32>,
  ) -> StoreResult<CartItem> {
    let cart = self.get_or_create_cart(user).await?;
    let Some(unit_price) = self.current_price(product).await? else {
      warn!("Product does not exist.");
      return Err(StoreError::ProductNotFound { product_id: product });
    };

    let updated = match quantity {
      Some(q) => {
        validate_quantity(q)?;
        self.ensure_total_fits(cart.id, product, unit_price, q).await?;
        self.carts.set_quantity(cart.id, product, q).await?
      }
      None => self.carts.find_item(cart.id, product).await?,
    };

    match updated {
      Some(item) => {
        info!(cart_id = %cart.id, item_quantity = item.quantity, "Updated cart item quantity.");
        Ok(item)
      }
      None => {
        warn!(cart_id = %cart.id, "Product not found in cart.");
        Err(StoreError::ItemNotInCart { product_id: product })
      }
    }
  }

  #[instrument(name = "cart::remove_item", skip(self), fields(user_id = %user, product_id = %product))]
  pub async fn remove_item(&self, user: UserId, product: ProductId) -> StoreResult<()> {
    let cart = self.get_or_create_cart(user).await?;
    self.ensure_product(product).await?;

    if self.carts.delete_item(cart.id, product).await? {
      info!(cart_id = %cart.id, "Removed item from cart.");
      Ok(())
    } else {
      warn!(cart_id = %cart.id, "Product not found in cart.");
      Err(StoreError::ItemNotInCart { product_id: product })
    }
  }

  /// Empties the cart. Clearing an empty cart is not an error.
  #[instrument(name = "cart::clear", skip(self), fields(user_id = %user))]
  pub async fn clear(&self, user: UserId) -> StoreResult<u64> {
    let cart = self.get_or_create_cart(user).await?;
    let removed = self.carts.delete_all_items(cart.id).await?;
    info!(cart_id = %cart.id, removed, "Cleared cart.");
    Ok(removed)
  }

  #[instrument(name = "cart::summary", skip(self), fields(user_id = %user))]
  pub async fn summary(&self, user: UserId) -> StoreResult<CartSummary> {
    let cart = self.get_or_create_cart(user).await?;
    let items = self.carts.list_items(cart.id).await?;
    let summary = CartSummary::new(cart, items);
    debug!(total_items = summary.total_items, total_cost = %summary.total_cost, "Built cart summary.");
    Ok(summary)
  }
}
