// core/src/catalog/mod.rs

//! Catalog entities: categories, their subcategories, and products.

pub mod model;
pub mod store;

pub use model::{
  Category, CategoryDetail, CategoryId, NewCategory, NewProduct, NewSubcategory, Product, ProductDetail, ProductId,
  Subcategory, SubcategoryId,
};
pub use store::CatalogStore;
