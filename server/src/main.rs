// server/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod models;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PgStore;
use crate::errors::Result as AppResult;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use storefront::{CartStore, CatalogStore, MemoryStore};
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

/// Picks the storage backend: PostgreSQL when `DATABASE_URL` is set, otherwise in-memory.
async fn build_state(config: Arc<AppConfig>) -> AppResult<AppState> {
  let (catalog, carts): (Arc<dyn CatalogStore>, Arc<dyn CartStore>) = match config.database_url.as_deref() {
    Some(url) => {
      let store = Arc::new(PgStore::new(db::connect(&config, url).await?));
      (store.clone(), store)
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; using the in-memory store. Data will not survive a restart.");
      let store = Arc::new(MemoryStore::new());
      (store.clone(), store)
    }
  };

  if config.seed_db {
    let fixture = db::seed::load_fixture(&config.catalog_fixture)?;
    db::seed::seed_catalog(catalog.as_ref(), fixture).await?;
  }

  Ok(AppState::new(catalog, carts, config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let app_state = match build_state(app_config.clone()).await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialise storage.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
