// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::catalog::{CategoryId, ProductId, SubcategoryId};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Product {product_id} is already in the cart")]
  DuplicateItem { product_id: ProductId },

  #[error("Product {product_id} not found in cart")]
  ItemNotInCart { product_id: ProductId },

  #[error("Product {product_id} not found")]
  ProductNotFound { product_id: ProductId },

  #[error("Category {category_id} not found")]
  CategoryNotFound { category_id: CategoryId },

  #[error("Subcategory {subcategory_id} not found")]
  SubcategoryNotFound { subcategory_id: SubcategoryId },

  #[error("Invalid page: {0}")]
  InvalidPage(String),

  #[error("Slug '{slug}' is already taken")]
  DuplicateSlug { slug: String },

  #[error("Storage backend error. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

impl StoreError {
  /// Wraps any backend error (database driver, I/O) as `StoreError::Backend`.
  pub fn backend<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    StoreError::Backend { source: AnyhowError::new(err) }
  }

  /// True for errors caused by the caller's input rather than the backend.
  pub fn is_client_error(&self) -> bool {
    !matches!(self, StoreError::Backend { .. })
  }
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
