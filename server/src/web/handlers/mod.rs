// server/src/web/handlers/mod.rs

// Declare handler modules
pub mod cart_handlers;
pub mod category_handlers;
pub mod product_handlers;

use serde::Deserialize;
use storefront::PageNumber;

use crate::errors::Result;

/// `?page=` query parameter shared by the catalog listings.
#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
  pub page: Option<String>,
}

impl PageQuery {
  pub fn page_number(&self) -> Result<PageNumber> {
    match self.page.as_deref() {
      None | Some("") => Ok(PageNumber::First),
      Some(raw) => Ok(raw.parse()?),
    }
  }
}
