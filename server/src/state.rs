// server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::{CartService, CartStore, CatalogStore, Paginator};

#[derive(Clone)]
pub struct AppState {
  pub catalog: Arc<dyn CatalogStore>,
  pub carts: CartService,
  pub paginator: Paginator,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(catalog: Arc<dyn CatalogStore>, cart_store: Arc<dyn CartStore>, config: Arc<AppConfig>) -> Self {
    Self {
      carts: CartService::new(cart_store, catalog.clone()),
      catalog,
      paginator: Paginator::new(config.page_size),
      config,
    }
  }
}
