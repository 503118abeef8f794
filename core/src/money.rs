// core/src/money.rs

//! Fixed-point, non-negative monetary amounts with two decimal places.
//!
//! Amounts are held as integer cents so sums and line totals are exact. On the
//! wire they are decimal strings (`"12.50"`), the way price fields are usually
//! rendered by REST APIs to avoid float rounding on the client.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

/// Largest price a product may carry: ten digits, two of them decimal places.
pub const MAX_PRICE_CENTS: u64 = 9_999_999_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
  pub const ZERO: Money = Money(0);

  pub const fn from_cents(cents: u64) -> Self {
    Money(cents)
  }

  pub const fn cents(self) -> u64 {
    self.0
  }

  /// Line total for `quantity` units at this unit price. Saturates instead of wrapping;
  /// callers that accept quantities check `checked_times` first.
  pub fn times(self, quantity: u32) -> Money {
    Money(self.0.saturating_mul(u64::from(quantity)))
  }

  pub fn checked_times(self, quantity: u32) -> Option<Money> {
    self.0.checked_mul(u64::from(quantity)).map(Money)
  }

  pub fn checked_add(self, other: Money) -> Option<Money> {
    self.0.checked_add(other.0).map(Money)
  }

  /// Whether this amount fits a product price column (`max_digits=10, decimal_places=2`).
  pub fn is_valid_price(self) -> bool {
    self.0 <= MAX_PRICE_CENTS
  }
}

impl fmt::Display for Money {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
  }
}

impl Sum for Money {
  fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
    iter.fold(Money::ZERO, |acc, m| Money(acc.0.saturating_add(m.0)))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoneyError(String);

impl fmt::Display for ParseMoneyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "invalid amount '{}': expected digits with at most two decimal places", self.0)
  }
}

impl std::error::Error for ParseMoneyError {}

impl FromStr for Money {
  type Err = ParseMoneyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || ParseMoneyError(s.to_string());
    let trimmed = s.trim();
    let (whole, frac) = match trimmed.split_once('.') {
      Some((w, f)) => (w, f),
      None => (trimmed, ""),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }
    if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid());
    }

    let whole: u64 = whole.parse().map_err(|_| invalid())?;
    let frac_cents: u64 = match frac.len() {
      0 => 0,
      1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
      _ => frac.parse().map_err(|_| invalid())?,
    };

    whole
      .checked_mul(100)
      .and_then(|c| c.checked_add(frac_cents))
      .map(Money)
      .ok_or_else(invalid)
  }
}

impl Serialize for Money {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Money {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct MoneyVisitor;

    impl de::Visitor<'_> for MoneyVisitor {
      type Value = Money;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal amount such as \"12.50\" or 12.5")
      }

      fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
      }

      fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        v.checked_mul(100)
          .map(Money)
          .ok_or_else(|| E::custom("amount out of range"))
      }

      fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        let v = u64::try_from(v).map_err(|_| E::custom("amount must not be negative"))?;
        self.visit_u64(v)
      }

      fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        // Go through the two-place string form so 19.99 does not become 1998 cents.
        if !v.is_finite() || v < 0.0 {
          return Err(E::custom("amount must be a finite, non-negative number"));
        }
        format!("{v:.2}").parse().map_err(E::custom)
      }
    }

    deserializer.deserialize_any(MoneyVisitor)
  }
}
