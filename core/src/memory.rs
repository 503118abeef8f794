// core/src/memory.rs

//! An in-process implementation of `CatalogStore` and `CartStore`.
//!
//! All state sits behind one `parking_lot::RwLock`; every trait method takes
//! the lock once, so each mutation is atomic just like a single SQL statement.
//! Guards are never held across an `.await`.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::{event, Level};

use crate::cart::{Cart, CartId, CartItem, CartItemId, CartStore, UserId};
use crate::catalog::{
  CatalogStore, Category, CategoryDetail, CategoryId, NewCategory, NewProduct, NewSubcategory, Product, ProductDetail,
  ProductId, Subcategory, SubcategoryId,
};
use crate::error::{StoreError, StoreResult};
use crate::pagination::Window;

#[derive(Debug, Clone, Copy)]
struct ItemRow {
  cart_id: CartId,
  product_id: ProductId,
  quantity: u32,
}

#[derive(Debug, Default)]
struct State {
  last_id: i64,
  categories: BTreeMap<CategoryId, Category>,
  subcategories: BTreeMap<SubcategoryId, Subcategory>,
  products: BTreeMap<ProductId, Product>,
  carts: HashMap<UserId, Cart>,
  items: BTreeMap<CartItemId, ItemRow>,
}

impl State {
  fn next_id(&mut self) -> i64 {
    self.last_id += 1;
    self.last_id
  }

  fn category_detail(&self, category: &Category) -> CategoryDetail {
    let mut subcategories: Vec<Subcategory> = self
      .subcategories
      .values()
      .filter(|s| s.category_id == category.id)
      .cloned()
      .collect();
    subcategories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    CategoryDetail { category: category.clone(), subcategories }
  }

  fn product_detail(&self, product: &Product) -> Option<ProductDetail> {
    let subcategory = self.subcategories.get(&product.subcategory_id)?.clone();
    let category = product.category_id.and_then(|id| self.categories.get(&id)).cloned();
    Some(ProductDetail { product: product.clone(), subcategory, category })
  }

  fn priced_item(&self, id: CartItemId, row: &ItemRow) -> Option<CartItem> {
    let product = self.products.get(&row.product_id)?;
    Some(CartItem {
      id,
      cart_id: row.cart_id,
      product_id: row.product_id,
      quantity: row.quantity,
      unit_price: product.price,
    })
  }

  fn item_for(&self, cart: CartId, product: ProductId) -> Option<(CartItemId, ItemRow)> {
    self
      .items
      .iter()
      .find(|(_, row)| row.cart_id == cart && row.product_id == product)
      .map(|(id, row)| (*id, *row))
  }
}

fn window_of<T>(rows: Vec<T>, window: Window) -> Vec<T> {
  let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
  let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);
  rows.into_iter().skip(offset).take(limit).collect()
}

#[derive(Debug, Default)]
pub struct MemoryStore {
  state: RwLock<State>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CatalogStore for MemoryStore {
  async fn count_categories(&self) -> StoreResult<u64> {
    Ok(self.state.read().categories.len() as u64)
  }

  async fn list_categories(&self, window: Window) -> StoreResult<Vec<CategoryDetail>> {
    let state = self.state.read();
    let mut categories: Vec<&Category> = state.categories.values().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    let details = categories.into_iter().map(|c| state.category_detail(c)).collect();
    Ok(window_of(details, window))
  }

  async fn get_category(&self, id: CategoryId) -> StoreResult<Option<CategoryDetail>> {
    let state = self.state.read();
    Ok(state.categories.get(&id).map(|c| state.category_detail(c)))
  }

  async fn count_products(&self) -> StoreResult<u64> {
    Ok(self.state.read().products.len() as u64)
  }

  async fn list_products(&self, window: Window) -> StoreResult<Vec<ProductDetail>> {
    let state = self.state.read();
    let mut products: Vec<&Product> = state.products.values().collect();
    products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    let details = products.into_iter().filter_map(|p| state.product_detail(p)).collect();
    Ok(window_of(details, window))
  }

  async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductDetail>> {
    let state = self.state.read();
    Ok(state.products.get(&id).and_then(|p| state.product_detail(p)))
  }

  async fn product_exists(&self, id: ProductId) -> StoreResult<bool> {
    Ok(self.state.read().products.contains_key(&id))
  }

  async fn create_category(&self, new: NewCategory) -> StoreResult<Category> {
    let slug = new.prepare()?;
    let mut state = self.state.write();
    if state.categories.values().any(|c| c.slug == slug) {
      return Err(StoreError::DuplicateSlug { slug });
    }
    let category = Category { id: CategoryId(state.next_id()), name: new.name, slug, image: new.image };
    state.categories.insert(category.id, category.clone());
    event!(Level::DEBUG, category_id = %category.id, "Created category.");
    Ok(category)
  }

  async fn create_subcategory(&self, new: NewSubcategory) -> StoreResult<Subcategory> {
    let slug = new.prepare()?;
    let mut state = self.state.write();
    if !state.categories.contains_key(&new.category_id) {
      return Err(StoreError::CategoryNotFound { category_id: new.category_id });
    }
    if state.subcategories.values().any(|s| s.slug == slug) {
      return Err(StoreError::DuplicateSlug { slug });
    }
    let subcategory = Subcategory {
      id: SubcategoryId(state.next_id()),
      name: new.name,
      slug,
      image: new.image,
      category_id: new.category_id,
    };
    state.subcategories.insert(subcategory.id, subcategory.clone());
    Ok(subcategory)
  }

  async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
    let slug = new.prepare()?;
    let mut state = self.state.write();
    if !state.subcategories.contains_key(&new.subcategory_id) {
      return Err(StoreError::SubcategoryNotFound { subcategory_id: new.subcategory_id });
    }
    if let Some(category_id) = new.category_id {
      if !state.categories.contains_key(&category_id) {
        return Err(StoreError::CategoryNotFound { category_id });
      }
    }
    if state.products.values().any(|p| p.slug == slug) {
      return Err(StoreError::DuplicateSlug { slug });
    }
    let product = Product {
      id: ProductId(state.next_id()),
      name: new.name,
      slug,
      image_small: new.image_small,
      image_medium: new.image_medium,
      image_large: new.image_large,
      price: new.price,
      subcategory_id: new.subcategory_id,
      category_id: new.category_id,
    };
    state.products.insert(product.id, product.clone());
    Ok(product)
  }
}

#[async_trait]
impl CartStore for MemoryStore {
  async fn get_or_create_cart(&self, user: UserId) -> StoreResult<Cart> {
    let mut state = self.state.write();
    if let Some(cart) = state.carts.get(&user) {
      return Ok(cart.clone());
    }
    let cart = Cart { id: CartId(state.next_id()), user_id: user, created_at: Utc::now() };
    state.carts.insert(user, cart.clone());
    event!(Level::DEBUG, cart_id = %cart.id, user_id = %user, "Created cart.");
    Ok(cart)
  }

  async fn find_item(&self, cart: CartId, product: ProductId) -> StoreResult<Option<CartItem>> {
    let state = self.state.read();
    Ok(state.item_for(cart, product).and_then(|(id, row)| state.priced_item(id, &row)))
  }

  async fn insert_item(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<CartItem> {
    let mut state = self.state.write();
    if !state.products.contains_key(&product) {
      return Err(StoreError::ProductNotFound { product_id: product });
    }
    if state.item_for(cart, product).is_some() {
      return Err(StoreError::DuplicateItem { product_id: product });
    }
    let id = CartItemId(state.next_id());
    let row = ItemRow { cart_id: cart, product_id: product, quantity };
    state.items.insert(id, row);
    state
      .priced_item(id, &row)
      .ok_or(StoreError::ProductNotFound { product_id: product })
  }

  async fn set_quantity(&self, cart: CartId, product: ProductId, quantity: u32) -> StoreResult<Option<CartItem>> {
    let mut state = self.state.write();
    let Some((id, mut row)) = state.item_for(cart, product) else {
      return Ok(None);
    };
    row.quantity = quantity;
    state.items.insert(id, row);
    Ok(state.priced_item(id, &row))
  }

  async fn delete_item(&self, cart: CartId, product: ProductId) -> StoreResult<bool> {
    let mut state = self.state.write();
    match state.item_for(cart, product) {
      Some((id, _)) => Ok(state.items.remove(&id).is_some()),
      None => Ok(false),
    }
  }

  async fn delete_all_items(&self, cart: CartId) -> StoreResult<u64> {
    let mut state = self.state.write();
    let before = state.items.len();
    state.items.retain(|_, row| row.cart_id != cart);
    Ok((before - state.items.len()) as u64)
  }

  async fn list_items(&self, cart: CartId) -> StoreResult<Vec<CartItem>> {
    let state = self.state.read();
    Ok(
      state
        .items
        .iter()
        .filter(|(_, row)| row.cart_id == cart)
        .filter_map(|(id, row)| state.priced_item(*id, row))
        .collect(),
    )
  }
}
