// core/src/pagination.rs

//! Page-number pagination for catalog listings.
//!
//! Page 1 is always valid, even for an empty listing. Any other page must fall
//! within `1..=num_pages`. `last` selects the final page.

use crate::error::{StoreError, StoreResult};
use serde::Serialize;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageNumber {
  #[default]
  First,
  Number(u64),
  Last,
}

impl FromStr for PageNumber {
  type Err = StoreError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s == "last" {
      return Ok(PageNumber::Last);
    }
    match s.parse::<u64>() {
      Ok(0) | Err(_) => Err(StoreError::InvalidPage(format!("'{}' is not a valid page number", s))),
      Ok(n) => Ok(PageNumber::Number(n)),
    }
  }
}

/// An offset/limit slice of a listing, resolved against its total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  pub offset: u64,
  pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
  page_size: u32,
}

impl Paginator {
  pub fn new(page_size: u32) -> Self {
    Self { page_size: page_size.max(1) }
  }

  pub fn page_size(&self) -> u32 {
    self.page_size
  }

  pub fn num_pages(&self, count: u64) -> u64 {
    if count == 0 {
      1
    } else {
      count.div_ceil(u64::from(self.page_size))
    }
  }

  /// Resolves `requested` against `count`, returning the 1-based page number and its window.
  pub fn resolve(&self, requested: PageNumber, count: u64) -> StoreResult<(u64, Window)> {
    let num_pages = self.num_pages(count);
    let page = match requested {
      PageNumber::First => 1,
      PageNumber::Last => num_pages,
      PageNumber::Number(n) => n,
    };
    if page == 0 || page > num_pages {
      return Err(StoreError::InvalidPage(format!(
        "page {} is out of range (1..={})",
        page, num_pages
      )));
    }
    let limit = u64::from(self.page_size);
    Ok((page, Window { offset: (page - 1) * limit, limit }))
  }
}

impl Default for Paginator {
  fn default() -> Self {
    Self::new(DEFAULT_PAGE_SIZE)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
  pub count: u64,
  pub page: u64,
  pub num_pages: u64,
  pub results: Vec<T>,
}

impl<T> Page<T> {
  pub fn has_next(&self) -> bool {
    self.page < self.num_pages
  }

  pub fn has_previous(&self) -> bool {
    self.page > 1
  }

  pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
    Page {
      count: self.count,
      page: self.page,
      num_pages: self.num_pages,
      results: self.results.into_iter().map(f).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_listing_has_one_valid_page() {
    let p = Paginator::default();
    assert_eq!(p.num_pages(0), 1);
    assert_eq!(p.resolve(PageNumber::First, 0).unwrap(), (1, Window { offset: 0, limit: 10 }));
    assert!(p.resolve(PageNumber::Number(2), 0).is_err());
  }

  #[test]
  fn windows_step_by_page_size() {
    let p = Paginator::new(10);
    assert_eq!(p.num_pages(10), 1);
    assert_eq!(p.num_pages(11), 2);
    let (page, window) = p.resolve(PageNumber::Number(2), 25).unwrap();
    assert_eq!(page, 2);
    assert_eq!(window, Window { offset: 10, limit: 10 });
    assert_eq!(p.resolve(PageNumber::Last, 25).unwrap().0, 3);
    assert!(matches!(
      p.resolve(PageNumber::Number(2), 10),
      Err(StoreError::InvalidPage(_))
    ));
  }

  #[test]
  fn parses_page_numbers() {
    assert_eq!("3".parse::<PageNumber>().unwrap(), PageNumber::Number(3));
    assert_eq!("last".parse::<PageNumber>().unwrap(), PageNumber::Last);
    assert!("0".parse::<PageNumber>().is_err());
    assert!("two".parse::<PageNumber>().is_err());
  }
}
