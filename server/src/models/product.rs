// server/src/models/product.rs

use sqlx::FromRow;
use storefront::{
  Category, CategoryId, Product, ProductDetail, ProductId, StoreError, StoreResult, Subcategory, SubcategoryId,
};

use super::money_from_cents;

#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub image_small: Option<String>,
  pub image_medium: Option<String>,
  pub image_large: Option<String>,
  pub price_cents: i64,
  pub subcategory_id: i64,
  pub category_id: Option<i64>,
}

impl TryFrom<ProductRow> for Product {
  type Error = StoreError;

  fn try_from(row: ProductRow) -> StoreResult<Self> {
    Ok(Product {
      id: ProductId(row.id),
      name: row.name,
      slug: row.slug,
      image_small: row.image_small,
      image_medium: row.image_medium,
      image_large: row.image_large,
      price: money_from_cents(row.price_cents)?,
      subcategory_id: SubcategoryId(row.subcategory_id),
      category_id: row.category_id.map(CategoryId),
    })
  }
}

/// A product joined with its subcategory and (optional) category.
#[derive(Debug, Clone, FromRow)]
pub struct ProductDetailRow {
  #[sqlx(flatten)]
  pub product: ProductRow,
  pub sub_name: String,
  pub sub_slug: String,
  pub sub_image: Option<String>,
  pub sub_category_id: i64,
  pub cat_name: Option<String>,
  pub cat_slug: Option<String>,
  pub cat_image: Option<String>,
}

/// Column list matching `ProductDetailRow`; expects aliases `p`, `s` and `c`.
pub const PRODUCT_DETAIL_COLUMNS: &str = "p.id, p.name, p.slug, p.image_small, p.image_medium, p.image_large, \
   p.price_cents, p.subcategory_id, p.category_id, \
   s.name AS sub_name, s.slug AS sub_slug, s.image AS sub_image, s.category_id AS sub_category_id, \
   c.name AS cat_name, c.slug AS cat_slug, c.image AS cat_image";

impl TryFrom<ProductDetailRow> for ProductDetail {
  type Error = StoreError;

  fn try_from(row: ProductDetailRow) -> StoreResult<Self> {
    let subcategory = Subcategory {
      id: SubcategoryId(row.product.subcategory_id),
      name: row.sub_name,
      slug: row.sub_slug,
      image: row.sub_image,
      category_id: CategoryId(row.sub_category_id),
    };
    let category = match (row.product.category_id, row.cat_name, row.cat_slug) {
      (Some(id), Some(name), Some(slug)) => Some(Category { id: CategoryId(id), name, slug, image: row.cat_image }),
      _ => None,
    };
    Ok(ProductDetail { product: Product::try_from(row.product)?, subcategory, category })
  }
}
