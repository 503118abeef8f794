// server/src/models/mod.rs

//! Row types as they come back from PostgreSQL, and their conversion into
//! storefront domain values.

pub mod cart;
pub mod category;
pub mod product;

pub use cart::{CartItemRow, CartRow};
pub use category::{CategoryRow, SubcategoryRow};
pub use product::{ProductDetailRow, ProductRow};

use storefront::{Money, StoreError, StoreResult};

/// Prices are stored as BIGINT cents; a negative value means the row was written around our checks.
pub(crate) fn money_from_cents(cents: i64) -> StoreResult<Money> {
  u64::try_from(cents)
    .map(Money::from_cents)
    .map_err(|_| StoreError::from(anyhow::anyhow!("negative price_cents {} in database", cents)))
}

pub(crate) fn cents_from_money(money: Money) -> StoreResult<i64> {
  i64::try_from(money.cents())
    .map_err(|_| StoreError::Validation(format!("amount {} is out of range", money)))
}
