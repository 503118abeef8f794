// server/src/db/mod.rs

//! PostgreSQL implementation of the storefront store traits.

pub mod cart;
pub mod catalog;
pub mod seed;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use storefront::StoreError;
use tracing::info;

use crate::config::AppConfig;
use crate::errors::Result;

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

/// Connects the pool and, if configured, applies the embedded migrations.
pub async fn connect(config: &AppConfig, database_url: &str) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.database_max_connections)
    .connect(database_url)
    .await?;
  info!("Successfully connected to the database.");

  if config.run_migrations {
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied.");
  }
  Ok(pool)
}

pub(crate) fn db_err(e: sqlx::Error) -> StoreError {
  tracing::error!(error = %e, "Database query failed.");
  StoreError::backend(e)
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
  matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
  matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

/// Name of the violated constraint, when the database reports one.
pub(crate) fn constraint_of(e: &sqlx::Error) -> Option<String> {
  match e {
    sqlx::Error::Database(db) => db.constraint().map(str::to_owned),
    _ => None,
  }
}

pub(crate) fn to_i64(v: u64) -> i64 {
  i64::try_from(v).unwrap_or(i64::MAX)
}
