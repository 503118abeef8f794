// core/src/catalog/model.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{StoreError, StoreResult};
use crate::money::Money;
use crate::slug::resolve_slug;

pub const MAX_NAME_LEN: usize = 256;

macro_rules! id_type {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub i64);

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl From<i64> for $name {
      fn from(v: i64) -> Self {
        $name(v)
      }
    }
  };
}

id_type!(CategoryId);
id_type!(SubcategoryId);
id_type!(
  /// Primary key of a product; also the `{product_id}` path segment of cart endpoints.
  ProductId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id: CategoryId,
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
  pub id: SubcategoryId,
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
  pub category_id: CategoryId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub slug: String,
  pub image_small: Option<String>,
  pub image_medium: Option<String>,
  pub image_large: Option<String>,
  pub price: Money,
  pub subcategory_id: SubcategoryId,
  pub category_id: Option<CategoryId>,
}

/// A category together with its subcategories, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDetail {
  pub category: Category,
  pub subcategories: Vec<Subcategory>,
}

/// A product with the category records it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
  pub product: Product,
  pub subcategory: Subcategory,
  pub category: Option<Category>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCategory {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubcategory {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  pub category_id: CategoryId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub image_small: Option<String>,
  #[serde(default)]
  pub image_medium: Option<String>,
  #[serde(default)]
  pub image_large: Option<String>,
  pub price: Money,
  pub subcategory_id: SubcategoryId,
  #[serde(default)]
  pub category_id: Option<CategoryId>,
}

fn validate_name(name: &str) -> StoreResult<()> {
  if name.trim().is_empty() {
    return Err(StoreError::Validation("name must not be empty".to_string()));
  }
  if name.chars().count() > MAX_NAME_LEN {
    return Err(StoreError::Validation(format!(
      "name must be at most {} characters",
      MAX_NAME_LEN
    )));
  }
  Ok(())
}

impl NewCategory {
  /// Checks the name and returns the slug to store.
  pub fn prepare(&self) -> StoreResult<String> {
    validate_name(&self.name)?;
    resolve_slug(self.slug.as_deref(), &self.name)
  }
}

impl NewSubcategory {
  pub fn prepare(&self) -> StoreResult<String> {
    validate_name(&self.name)?;
    resolve_slug(self.slug.as_deref(), &self.name)
  }
}

impl NewProduct {
  pub fn prepare(&self) -> StoreResult<String> {
    validate_name(&self.name)?;
    if !self.price.is_valid_price() {
      return Err(StoreError::Validation(format!(
        "price {} exceeds the maximum of 10 digits",
        self.price
      )));
    }
    resolve_slug(self.slug.as_deref(), &self.name)
  }
}
