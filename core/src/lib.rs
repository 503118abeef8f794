// src/lib.rs

//! Storefront: the catalog and shopping-cart domain behind the storefront API.
//!
//! The crate provides:
//!  - Catalog entities (categories, subcategories, products) and the `CatalogStore` trait.
//!  - Per-user carts, the `CartStore` trait, and `CartService`, which enforces
//!    one line per product and computes cart totals on read.
//!  - Fixed-point `Money`, slug helpers, and page-number pagination.
//!  - `MemoryStore`, an in-process implementation of both store traits.
//!
//! Storage backends (for example the PostgreSQL stores in the server crate)
//! implement the two traits; everything above them is backend-agnostic.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod memory;
pub mod money;
pub mod pagination;
pub mod slug;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartId, CartItem, CartItemId, CartService, CartStore, CartSummary, UserId};
pub use crate::catalog::{
  CatalogStore, Category, CategoryDetail, CategoryId, NewCategory, NewProduct, NewSubcategory, Product, ProductDetail,
  ProductId, Subcategory, SubcategoryId,
};
pub use crate::error::{StoreError, StoreResult};
pub use crate::memory::MemoryStore;
pub use crate::money::Money;
pub use crate::pagination::{Page, PageNumber, Paginator, Window, DEFAULT_PAGE_SIZE};
