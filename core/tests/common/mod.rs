// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use std::sync::Arc;
use storefront::{
  CartService, CatalogStore, Category, MemoryStore, Money, NewCategory, NewProduct, NewSubcategory, Product,
  Subcategory, UserId,
};
use tracing::Level;
use uuid::Uuid;

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn new_user() -> UserId {
  UserId(Uuid::new_v4())
}

pub fn price(s: &str) -> Money {
  s.parse().expect("test price should parse")
}

/// A small catalog: one category with one subcategory, plus helpers to add products to it.
pub struct Fixture {
  pub store: Arc<MemoryStore>,
  pub category: Category,
  pub subcategory: Subcategory,
}

impl Fixture {
  pub async fn new() -> Self {
    setup_tracing();
    let store = Arc::new(MemoryStore::new());
    let category = store
      .create_category(NewCategory { name: "Groceries".into(), slug: None, image: None })
      .await
      .expect("category");
    let subcategory = store
      .create_subcategory(NewSubcategory {
        name: "Fruit".into(),
        slug: None,
        image: Some("subcategories/fruit.png".into()),
        category_id: category.id,
      })
      .await
      .expect("subcategory");
    Self { store, category, subcategory }
  }

  pub async fn product(&self, name: &str, unit_price: &str) -> Product {
    self
      .store
      .create_product(NewProduct {
        name: name.to_string(),
        slug: None,
        image_small: None,
        image_medium: None,
        image_large: None,
        price: price(unit_price),
        subcategory_id: self.subcategory.id,
        category_id: Some(self.category.id),
      })
      .await
      .expect("product")
  }

  pub fn cart_service(&self) -> CartService {
    CartService::new(self.store.clone(), self.store.clone())
  }
}
