// core/src/slug.rs

//! URL slugs for catalog entities.

use crate::error::{StoreError, StoreResult};

pub const MAX_SLUG_LEN: usize = 256;

/// Derives a slug from a display name: ASCII alphanumerics are lower-cased,
/// runs of whitespace and hyphens collapse to a single `-`, everything else is
/// dropped, and leading/trailing separators are trimmed.
pub fn slugify(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut pending_dash = false;

  for ch in name.chars() {
    if ch.is_ascii_alphanumeric() || ch == '_' {
      if pending_dash && !out.is_empty() {
        out.push('-');
      }
      pending_dash = false;
      out.push(ch.to_ascii_lowercase());
    } else if ch.is_whitespace() || ch == '-' {
      pending_dash = true;
    }
  }

  out.truncate(MAX_SLUG_LEN);
  out
}

/// Slugs are non-empty runs of ASCII letters, digits, underscores or hyphens.
pub fn validate_slug(slug: &str) -> StoreResult<()> {
  if slug.is_empty() {
    return Err(StoreError::Validation("slug must not be empty".to_string()));
  }
  if slug.len() > MAX_SLUG_LEN {
    return Err(StoreError::Validation(format!(
      "slug must be at most {} characters",
      MAX_SLUG_LEN
    )));
  }
  if !slug.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
    return Err(StoreError::Validation(format!(
      "slug '{}' may only contain letters, numbers, underscores or hyphens",
      slug
    )));
  }
  Ok(())
}

/// Uses `explicit` when given and non-blank, otherwise derives one from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> StoreResult<String> {
  let slug = match explicit.map(str::trim) {
    Some(s) if !s.is_empty() => s.to_string(),
    _ => slugify(name),
  };
  validate_slug(&slug)?;
  Ok(slug)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slugify_collapses_separators() {
    assert_eq!(slugify("Fresh  Fruit & Veg"), "fresh-fruit-veg");
    assert_eq!(slugify("  --Dairy--  "), "dairy");
    assert_eq!(slugify("snake_case name"), "snake_case-name");
  }

  #[test]
  fn non_ascii_names_need_an_explicit_slug() {
    assert_eq!(slugify("Молоко"), "");
    assert!(resolve_slug(None, "Молоко").is_err());
    assert_eq!(resolve_slug(Some("milk"), "Молоко").unwrap(), "milk");
  }

  #[test]
  fn validate_rejects_bad_characters() {
    assert!(validate_slug("good-slug_1").is_ok());
    assert!(validate_slug("bad slug").is_err());
    assert!(validate_slug(&"a".repeat(MAX_SLUG_LEN + 1)).is_err());
  }
}
