// server/src/web/serializers.rs

//! JSON shapes returned by the API.

use serde::Serialize;
use storefront::{
  CartId, CartItem, CartItemId, CartSummary, Category, CategoryDetail, CategoryId, Money, Page, ProductDetail,
  ProductId, Subcategory,
};

use crate::config::AppConfig;

#[derive(Debug, Serialize)]
pub struct SubcategoryView {
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
}

impl SubcategoryView {
  pub fn new(sub: Subcategory, config: &AppConfig) -> Self {
    Self { image: config.media_url_for(sub.image.as_deref()), name: sub.name, slug: sub.slug }
  }
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
  pub id: CategoryId,
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
  pub subcategories: Vec<SubcategoryView>,
}

impl CategoryView {
  pub fn new(detail: CategoryDetail, config: &AppConfig) -> Self {
    let CategoryDetail { category, subcategories } = detail;
    Self {
      id: category.id,
      image: config.media_url_for(category.image.as_deref()),
      name: category.name,
      slug: category.slug,
      subcategories: subcategories.into_iter().map(|s| SubcategoryView::new(s, config)).collect(),
    }
  }
}

/// A category as embedded in a product, without its subcategories.
#[derive(Debug, Serialize)]
pub struct CategoryBriefView {
  pub name: String,
  pub slug: String,
  pub image: Option<String>,
}

impl CategoryBriefView {
  pub fn new(category: Category, config: &AppConfig) -> Self {
    Self { image: config.media_url_for(category.image.as_deref()), name: category.name, slug: category.slug }
  }
}

#[derive(Debug, Serialize)]
pub struct ProductView {
  pub id: ProductId,
  pub name: String,
  pub slug: String,
  pub price: Money,
  pub category: Option<CategoryBriefView>,
  pub subcategory: SubcategoryView,
  pub image_small: Option<String>,
  pub image_medium: Option<String>,
  pub image_large: Option<String>,
}

impl ProductView {
  pub fn new(detail: ProductDetail, config: &AppConfig) -> Self {
    let ProductDetail { product, subcategory, category } = detail;
    Self {
      id: product.id,
      price: product.price,
      category: category.map(|c| CategoryBriefView::new(c, config)),
      subcategory: SubcategoryView::new(subcategory, config),
      image_small: config.media_url_for(product.image_small.as_deref()),
      image_medium: config.media_url_for(product.image_medium.as_deref()),
      image_large: config.media_url_for(product.image_large.as_deref()),
      name: product.name,
      slug: product.slug,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CartItemView {
  pub id: CartItemId,
  pub product: ProductId,
  pub quantity: u32,
  pub total_price: Money,
}

impl From<CartItem> for CartItemView {
  fn from(item: CartItem) -> Self {
    Self { id: item.id, product: item.product_id, quantity: item.quantity, total_price: item.total_price() }
  }
}

#[derive(Debug, Serialize)]
pub struct CartView {
  pub id: CartId,
  pub items: Vec<CartItemView>,
  pub total_items: usize,
  pub total_cost: Money,
}

impl From<CartSummary> for CartView {
  fn from(summary: CartSummary) -> Self {
    Self {
      id: summary.cart.id,
      items: summary.items.into_iter().map(CartItemView::from).collect(),
      total_items: summary.total_items,
      total_cost: summary.total_cost,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct PageView<T> {
  pub count: u64,
  pub next: Option<String>,
  pub previous: Option<String>,
  pub results: Vec<T>,
}

impl<T> PageView<T> {
  /// `path` is the request path the page links are built on, e.g. `/api/v1/products`.
  pub fn new(page: Page<T>, path: &str) -> Self {
    let link = |n: u64| format!("{}?page={}", path, n);
    Self {
      next: page.has_next().then(|| link(page.page + 1)),
      previous: page.has_previous().then(|| link(page.page - 1)),
      count: page.count,
      results: page.results,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn page_links() {
    let page = Page { count: 25, page: 2, num_pages: 3, results: vec![1, 2] };
    let view = PageView::new(page, "/api/v1/products");
    assert_eq!(view.next.as_deref(), Some("/api/v1/products?page=3"));
    assert_eq!(view.previous.as_deref(), Some("/api/v1/products?page=1"));

    let only = PageView::new(Page { count: 0, page: 1, num_pages: 1, results: Vec::<u8>::new() }, "/x");
    assert!(only.next.is_none() && only.previous.is_none());
  }
}
