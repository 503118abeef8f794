// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// `None` runs the API on the in-memory store.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub run_migrations: bool,

  pub seed_db: bool,
  pub catalog_fixture: PathBuf,

  pub page_size: u32,
  pub media_url: String,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      database_url: None,
      database_max_connections: 5,
      run_migrations: true,
      seed_db: false,
      catalog_fixture: PathBuf::from("fixtures/catalog.json"),
      page_size: storefront::DEFAULT_PAGE_SIZE,
      media_url: "/media/".to_string(),
    }
  }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> Result<T>
where
  T: std::str::FromStr,
  T::Err: std::fmt::Display,
{
  match lookup(name) {
    Some(raw) => raw
      .trim()
      .parse::<T>()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e))),
    None => Ok(default),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let defaults = Self::default();

    let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);
    let server_port = parse_var(&lookup, "SERVER_PORT", defaults.server_port)?;
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    let database_max_connections =
      parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.database_max_connections)?;
    let run_migrations = parse_var(&lookup, "RUN_MIGRATIONS", defaults.run_migrations)?;
    let seed_db = parse_var(&lookup, "SEED_DB", defaults.seed_db)?;
    let catalog_fixture = lookup("CATALOG_FIXTURE")
      .map(PathBuf::from)
      .unwrap_or(defaults.catalog_fixture);

    let page_size = parse_var(&lookup, "PAGE_SIZE", defaults.page_size)?;
    if !(1..=100).contains(&page_size) {
      return Err(AppError::Config(format!("PAGE_SIZE must be between 1 and 100, got {}", page_size)));
    }

    let mut media_url = lookup("MEDIA_URL").unwrap_or(defaults.media_url);
    if !media_url.ends_with('/') {
      media_url.push('/');
    }

    tracing::info!("Application configuration loaded successfully.");
    // database_url may carry credentials; only log whether it is set.
    tracing::debug!(
      server_host = %server_host,
      server_port,
      database_configured = database_url.is_some(),
      page_size,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      run_migrations,
      seed_db,
      catalog_fixture,
      page_size,
      media_url,
    })
  }

  /// Public URL for a stored media path, e.g. `products/small/tea.png` -> `/media/products/small/tea.png`.
  pub fn media_url_for(&self, path: Option<&str>) -> Option<String> {
    path
      .filter(|p| !p.is_empty())
      .map(|p| format!("{}{}", self.media_url, p.trim_start_matches('/')))
  }
}
