// server/src/db/catalog.rs

use async_trait::async_trait;
use std::collections::HashMap;
use storefront::{
  CatalogStore, Category, CategoryDetail, CategoryId, NewCategory, NewProduct, NewSubcategory, Product, ProductDetail,
  ProductId, StoreError, StoreResult, Subcategory, Window,
};
use tracing::{info, instrument};

use super::{constraint_of, db_err, is_foreign_key_violation, is_unique_violation, to_i64, PgStore};
use crate::models::product::PRODUCT_DETAIL_COLUMNS;
use crate::models::{cents_from_money, CategoryRow, ProductDetailRow, ProductRow, SubcategoryRow};

impl PgStore {
  async fn attach_subcategories(&self, categories: Vec<CategoryRow>) -> StoreResult<Vec<CategoryDetail>> {
    let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    let subcategories: Vec<SubcategoryRow> = sqlx::query_as(
      "SELECT id, name, slug, image, category_id FROM subcategories \
       WHERE category_id = ANY($1) ORDER BY name ASC, id ASC",
    )
    .bind(&ids)
    .fetch_all(self.pool())
    .await
    .map_err(db_err)?;

    let mut grouped: HashMap<i64, Vec<Subcategory>> = HashMap::new();
    for row in subcategories {
      grouped.entry(row.category_id).or_default().push(row.into());
    }

    Ok(
      categories
        .into_iter()
        .map(|row| {
          let subcategories = grouped.remove(&row.id).unwrap_or_default();
          CategoryDetail { category: row.into(), subcategories }
        })
        .collect(),
    )
  }
}

fn map_insert_error(e: sqlx::Error, slug: &str) -> StoreError {
  if is_unique_violation(&e) {
    StoreError::DuplicateSlug { slug: slug.to_string() }
  } else {
    db_err(e)
  }
}

#[async_trait]
impl CatalogStore for PgStore {
  async fn count_categories(&self) -> StoreResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
      .fetch_one(self.pool())
      .await
      .map_err(db_err)?;
    Ok(count.max(0) as u64)
  }

  #[instrument(name = "db::list_categories", skip(self))]
  async fn list_categories(&self, window: Window) -> StoreResult<Vec<CategoryDetail>> {
    let rows: Vec<CategoryRow> = sqlx::query_as(
      "SELECT id, name, slug, image FROM categories ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2",
    )
    .bind(to_i64(window.limit))
    .bind(to_i64(window.offset))
    .fetch_all(self.pool())
    .await
    .map_err(db_err)?;
    self.attach_subcategories(rows).await
  }

  #[instrument(name = "db::get_category", skip(self), fields(category_id = %id))]
  async fn get_category(&self, id: CategoryId) -> StoreResult<Option<CategoryDetail>> {
    let row: Option<CategoryRow> = sqlx::query_as("SELECT id, name, slug, image FROM categories WHERE id = $1")
      .bind(id.0)
      .fetch_optional(self.pool())
      .await
      .map_err(db_err)?;
    match row {
      Some(row) => Ok(self.attach_subcategories(vec![row]).await?.pop()),
      None => Ok(None),
    }
  }

  async fn count_products(&self) -> StoreResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(self.pool())
      .await
      .map_err(db_err)?;
    Ok(count.max(0) as u64)
  }

  #[instrument(name = "db::list_products", skip(self))]
  async fn list_products(&self, window: Window) -> StoreResult<Vec<ProductDetail>> {
    let sql = format!(
      "SELECT {} FROM products p \
       JOIN subcategories s ON s.id = p.subcategory_id \
       LEFT JOIN categories c ON c.id = p.category_id \
       ORDER BY p.name ASC, p.id ASC LIMIT $1 OFFSET $2",
      PRODUCT_DETAIL_COLUMNS
    );
    let rows: Vec<ProductDetailRow> = sqlx::query_as(&sql)
      .bind(to_i64(window.limit))
      .bind(to_i64(window.offset))
      .fetch_all(self.pool())
      .await
      .map_err(db_err)?;
    rows.into_iter().map(ProductDetail::try_from).collect()
  }

  #[instrument(name = "db::get_product", skip(self), fields(product_id = %id))]
  async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductDetail>> {
    let sql = format!(
      "SELECT {} FROM products p \
       JOIN subcategories s ON s.id = p.subcategory_id \
       LEFT JOIN categories c ON c.id = p.category_id \
       WHERE p.id = $1",
      PRODUCT_DETAIL_COLUMNS
    );
    let row: Option<ProductDetailRow> = sqlx::query_as(&sql)
      .bind(id.0)
      .fetch_optional(self.pool())
      .await
      .map_err(db_err)?;
    row.map(ProductDetail::try_from).transpose()
  }

  async fn product_exists(&self, id: ProductId) -> StoreResult<bool> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
      .bind(id.0)
      .fetch_one(self.pool())
      .await
      .map_err(db_err)
  }

  #[instrument(name = "db::create_category", skip(self, new), fields(name = %new.name))]
  async fn create_category(&self, new: NewCategory) -> StoreResult<Category> {
    let slug = new.prepare()?;
    let row: CategoryRow = sqlx::query_as(
      "INSERT INTO categories (name, slug, image) VALUES ($1, $2, $3) RETURNING id, name, slug, image",
    )
    .bind(&new.name)
    .bind(&slug)
    .bind(&new.image)
    .fetch_one(self.pool())
    .await
    .map_err(|e| map_insert_error(e, &slug))?;
    info!(category_id = row.id, slug = %row.slug, "Created category.");
    Ok(row.into())
  }

  #[instrument(name = "db::create_subcategory", skip(self, new), fields(name = %new.name))]
  async fn create_subcategory(&self, new: NewSubcategory) -> StoreResult<Subcategory> {
    let slug = new.prepare()?;
    let row: SubcategoryRow = sqlx::query_as(
      "INSERT INTO subcategories (name, slug, image, category_id) VALUES ($1, $2, $3, $4) \
       RETURNING id, name, slug, image, category_id",
    )
    .bind(&new.name)
    .bind(&slug)
    .bind(&new.image)
    .bind(new.category_id.0)
    .fetch_one(self.pool())
    .await
    .map_err(|e| {
      if is_foreign_key_violation(&e) {
        StoreError::CategoryNotFound { category_id: new.category_id }
      } else {
        map_insert_error(e, &slug)
      }
    })?;
    info!(subcategory_id = row.id, slug = %row.slug, "Created subcategory.");
    Ok(row.into())
  }

  #[instrument(name = "db::create_product", skip(self, new), fields(name = %new.name))]
  async fn create_product(&self, new: NewProduct) -> StoreResult<Product> {
    let slug = new.prepare()?;
    let price_cents = cents_from_money(new.price)?;
    let row: ProductRow = sqlx::query_as(
      "INSERT INTO products \
         (name, slug, image_small, image_medium, image_large, price_cents, subcategory_id, category_id) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
       RETURNING id, name, slug, image_small, image_medium, image_large, price_cents, subcategory_id, category_id",
    )
    .bind(&new.name)
    .bind(&slug)
    .bind(&new.image_small)
    .bind(&new.image_medium)
    .bind(&new.image_large)
    .bind(price_cents)
    .bind(new.subcategory_id.0)
    .bind(new.category_id.map(|c| c.0))
    .fetch_one(self.pool())
    .await
    .map_err(|e| {
      let constraint = constraint_of(&e);
      match (constraint.as_deref(), new.category_id) {
        (Some("products_subcategory_id_fkey"), _) => {
          StoreError::SubcategoryNotFound { subcategory_id: new.subcategory_id }
        }
        (Some("products_category_id_fkey"), Some(category_id)) => StoreError::CategoryNotFound { category_id },
        _ => map_insert_error(e, &slug),
      }
    })?;
    info!(product_id = row.id, slug = %row.slug, "Created product.");
    Product::try_from(row)
  }
}
