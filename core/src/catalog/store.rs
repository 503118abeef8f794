// core/src/catalog/store.rs

use async_trait::async_trait;

use super::model::{
  Category, CategoryDetail, CategoryId, NewCategory, NewProduct, NewSubcategory, Product, ProductDetail, ProductId,
  Subcategory,
};
use crate::error::StoreResult;
use crate::pagination::{Page, PageNumber, Paginator, Window};

/// Read and write access to the catalog.
///
/// Listings are ordered by name, ties broken by id. Creation methods validate
/// their input (`New*::prepare`), fail with `DuplicateSlug` when the slug is
/// taken, and with `CategoryNotFound` / `SubcategoryNotFound` when a parent is missing.
#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn count_categories(&self) -> StoreResult<u64>;

  async fn list_categories(&self, window: Window) -> StoreResult<Vec<CategoryDetail>>;

  async fn get_category(&self, id: CategoryId) -> StoreResult<Option<CategoryDetail>>;

  async fn count_products(&self) -> StoreResult<u64>;

  async fn list_products(&self, window: Window) -> StoreResult<Vec<ProductDetail>>;

  async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductDetail>>;

  async fn product_exists(&self, id: ProductId) -> StoreResult<bool>;

  async fn create_category(&self, new: NewCategory) -> StoreResult<Category>;

  async fn create_subcategory(&self, new: NewSubcategory) -> StoreResult<Subcategory>;

  async fn create_product(&self, new: NewProduct) -> StoreResult<Product>;

  async fn category_page(&self, paginator: &Paginator, page: PageNumber) -> StoreResult<Page<CategoryDetail>> {
    let count = self.count_categories().await?;
    let (page, window) = paginator.resolve(page, count)?;
    let results = self.list_categories(window).await?;
    Ok(Page { count, page, num_pages: paginator.num_pages(count), results })
  }

  async fn product_page(&self, paginator: &Paginator, page: PageNumber) -> StoreResult<Page<ProductDetail>> {
    let count = self.count_products().await?;
    let (page, window) = paginator.resolve(page, count)?;
    let results = self.list_products(window).await?;
    Ok(Page { count, page, num_pages: paginator.num_pages(count), results })
  }
}
