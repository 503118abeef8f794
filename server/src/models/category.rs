// server/src/models/category.rs

use sqlx::FromRow;
use storefront::{Category, CategoryId, Subcategory, SubcategoryId};

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
}

impl From<CategoryRow> for Category {
  fn from(row: CategoryRow) -> Self {
    Category { id: CategoryId(row.id), name: row.name, slug: row.slug, image: row.image }
  }
}

#[derive(Debug, Clone, FromRow)]
pub struct SubcategoryRow {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
  pub category_id: i64,
}

impl From<SubcategoryRow> for Subcategory {
  fn from(row: SubcategoryRow) -> Self {
    Subcategory {
      id: SubcategoryId(row.id),
      name: row.name,
      slug: row.slug,
      image: row.image,
      category_id: CategoryId(row.category_id),
    }
  }
}
