// server/src/db/seed.rs

//! Loads a catalog fixture into an empty store.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use storefront::{CatalogStore, CategoryId, Money, NewCategory, NewProduct, NewSubcategory};
use tracing::{info, instrument};

use crate::errors::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
  pub categories: Vec<CategoryFixture>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryFixture {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub subcategories: Vec<SubcategoryFixture>,
}

#[derive(Debug, Deserialize)]
pub struct SubcategoryFixture {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  #[serde(default)]
  pub image: Option<String>,
  #[serde(default)]
  pub products: Vec<ProductFixture>,
}

#[derive(Debug, Deserialize)]
pub struct ProductFixture {
  pub name: String,
  #[serde(default)]
  pub slug: Option<String>,
  pub price: Money,
  #[serde(default)]
  pub image_small: Option<String>,
  #[serde(default)]
  pub image_medium: Option<String>,
  #[serde(default)]
  pub image_large: Option<String>,
  /// Slug of a category from the same fixture; defaults to the enclosing one.
  #[serde(default)]
  pub category: Option<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
  pub categories: usize,
  pub subcategories: usize,
  pub products: usize,
}

pub fn load_fixture(path: &Path) -> Result<CatalogFixture> {
  tracing::debug!("Attempting to load catalog fixture from: {:?}", path);
  let contents = std::fs::read_to_string(path)
    .map_err(|e| AppError::Config(format!("Failed to read catalog fixture {:?}: {}", path, e)))?;
  serde_json::from_str(&contents)
    .map_err(|e| AppError::Config(format!("Failed to parse catalog fixture {:?}: {}", path, e)))
}

/// Inserts the fixture. Does nothing if the store already holds categories.
#[instrument(name = "seed::catalog", skip_all)]
pub async fn seed_catalog(store: &dyn CatalogStore, fixture: CatalogFixture) -> Result<SeedReport> {
  let mut report = SeedReport::default();
  if store.count_categories().await? > 0 {
    info!("Catalog already populated; skipping seed.");
    return Ok(report);
  }

  // Categories first, so products may point at any category in the fixture.
  let mut by_slug: HashMap<String, CategoryId> = HashMap::new();
  let mut created = Vec::with_capacity(fixture.categories.len());
  for cat in fixture.categories {
    let category = store
      .create_category(NewCategory { name: cat.name, slug: cat.slug, image: cat.image })
      .await?;
    by_slug.insert(category.slug.clone(), category.id);
    report.categories += 1;
    created.push((category.id, cat.subcategories));
  }

  for (category_id, subcategories) in created {
    for sub in subcategories {
      let subcategory = store
        .create_subcategory(NewSubcategory { name: sub.name, slug: sub.slug, image: sub.image, category_id })
        .await?;
      report.subcategories += 1;

      for prod in sub.products {
        let product_category = match prod.category.as_deref() {
          None => category_id,
          Some(slug) => *by_slug.get(slug).ok_or_else(|| {
            AppError::Validation(format!(
              "Product '{}' refers to unknown category slug '{}'",
              prod.name, slug
            ))
          })?,
        };
        store
          .create_product(NewProduct {
            name: prod.name,
            slug: prod.slug,
            image_small: prod.image_small,
            image_medium: prod.image_medium,
            image_large: prod.image_large,
            price: prod.price,
            subcategory_id: subcategory.id,
            category_id: Some(product_category),
          })
          .await?;
        report.products += 1;
      }
    }
  }

  info!(
    categories = report.categories,
    subcategories = report.subcategories,
    products = report.products,
    "Catalog seeded."
  );
  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use storefront::{MemoryStore, PageNumber, Paginator};

  const FIXTURE: &str = r#"{
    "categories": [
      {
        "name": "Drinks",
        "subcategories": [
          {
            "name": "Tea",
            "products": [
              { "name": "Green Tea", "price": "3.50", "image_small": "products/small/green-tea.png" },
              { "name": "Mug", "price": 9, "category": "kitchen" }
            ]
          }
        ]
      },
      { "name": "Kitchen", "slug": "kitchen" }
    ]
  }"#;

  #[tokio::test]
  async fn seeds_once_and_resolves_category_slugs() {
    let store = MemoryStore::new();
    let fixture: CatalogFixture = serde_json::from_str(FIXTURE).unwrap();
    let report = seed_catalog(&store, fixture).await.unwrap();
    assert_eq!(report, SeedReport { categories: 2, subcategories: 1, products: 2 });

    let page = store.product_page(&Paginator::default(), PageNumber::First).await.unwrap();
    let mug = page.results.iter().find(|p| p.product.slug == "mug").unwrap();
    assert_eq!(mug.category.as_ref().unwrap().slug, "kitchen");
    assert_eq!(mug.product.price.to_string(), "9.00");
    let tea = page.results.iter().find(|p| p.product.slug == "green-tea").unwrap();
    assert_eq!(tea.category.as_ref().unwrap().slug, "drinks");

    let again: CatalogFixture = serde_json::from_str(FIXTURE).unwrap();
    assert_eq!(seed_catalog(&store, again).await.unwrap(), SeedReport::default());
  }

  #[tokio::test]
  async fn unknown_category_slug_is_rejected() {
    let store = MemoryStore::new();
    let fixture: CatalogFixture = serde_json::from_str(
      r#"{"categories":[{"name":"A","subcategories":[{"name":"B","products":[{"name":"C","price":"1.00","category":"nope"}]}]}]}"#,
    )
    .unwrap();
    assert!(matches!(seed_catalog(&store, fixture).await, Err(AppError::Validation(_))));
  }
}
