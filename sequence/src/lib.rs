// sequence/src/lib.rs

//! The triangular run-length sequence: each integer `k >= 1` repeated `k` times.
//!
//! ```text
//! 1, 2, 2, 3, 3, 3, 4, 4, 4, 4, ...
//! ```

use std::iter::{self, FusedIterator};

/// The first `n` terms of the sequence. `generate(0)` is empty.
pub fn generate(n: usize) -> Vec<u64> {
  let mut out = Vec::with_capacity(n);
  let mut k: u64 = 1;
  while out.len() < n {
    let run = usize::try_from(k).unwrap_or(usize::MAX);
    out.extend(iter::repeat(k).take(run));
    k += 1;
  }
  out.truncate(n);
  out
}

/// Endless iterator over the sequence.
pub fn terms() -> Terms {
  Terms { value: 1, remaining: 1 }
}

#[derive(Debug, Clone)]
pub struct Terms {
  value: u64,
  remaining: u64,
}

impl Iterator for Terms {
  type Item = u64;

  fn next(&mut self) -> Option<u64> {
    if self.remaining == 0 {
      self.value += 1;
      self.remaining = self.value;
    }
    self.remaining -= 1;
    Some(self.value)
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (usize::MAX, None)
  }
}

impl FusedIterator for Terms {}

/// The term at 0-based position `index`: the smallest `k` with `k(k+1)/2 > index`.
pub fn term_at(index: u64) -> u64 {
  // Float estimate from the quadratic formula, then nudge to the exact integer.
  let estimate = (((8.0 * index as f64 + 1.0).sqrt() - 1.0) / 2.0).floor() as u64;
  // u128 so k(k+1) cannot overflow; term_at(u64::MAX) is about 6.07e9.
  let triangular = |k: u64| u128::from(k) * (u128::from(k) + 1) / 2;
  let index = u128::from(index);

  let mut k = estimate.max(1);
  while k > 1 && triangular(k - 1) > index {
    k -= 1;
  }
  while triangular(k) <= index {
    k += 1;
  }
  k
}

/// Renders terms the way a list literal looks: `[1, 2, 2]`.
pub fn format_terms(terms: &[u64]) -> String {
  let body: Vec<String> = terms.iter().map(u64::to_string).collect();
  format!("[{}]", body.join(", "))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_prefixes() {
    assert_eq!(generate(0), Vec::<u64>::new());
    assert_eq!(generate(1), vec![1]);
    assert_eq!(generate(4), vec![1, 2, 2, 3]);
    assert_eq!(generate(6), vec![1, 2, 2, 3, 3, 3]);
    assert_eq!(generate(11), vec![1, 2, 2, 3, 3, 3, 4, 4, 4, 4, 5]);
  }

  #[test]
  fn length_is_exact() {
    for n in 0..200 {
      assert_eq!(generate(n).len(), n);
    }
  }

  #[test]
  fn each_value_repeats_its_own_count() {
    let seq = generate(55); // exactly 1..=10
    for k in 1..=10u64 {
      assert_eq!(seq.iter().filter(|&&v| v == k).count() as u64, k);
    }
  }

  #[test]
  fn iterator_and_closed_form_agree_with_generate() {
    let seq = generate(500);
    let from_iter: Vec<u64> = terms().take(500).collect();
    assert_eq!(from_iter, seq);
    for (i, &v) in seq.iter().enumerate() {
      assert_eq!(term_at(i as u64), v, "index {}", i);
    }
  }

  #[test]
  fn closed_form_at_run_boundaries() {
    // Index k(k+1)/2 - 1 is the last k; the next index starts k + 1.
    for k in [1u64, 2, 10, 1_000, 1_000_000] {
      let last = k * (k + 1) / 2 - 1;
      assert_eq!(term_at(last), k);
      assert_eq!(term_at(last + 1), k + 1);
    }
  }

  #[test]
  fn closed_form_near_u64_max() {
    let tri = |k: u64| u128::from(k) * (u128::from(k) + 1) / 2;
    for index in [u64::MAX / 2, u64::MAX / 2 + 1, u64::MAX - 1, u64::MAX] {
      let k = term_at(index);
      assert!(tri(k) > u128::from(index), "index {}", index);
      assert!(tri(k - 1) <= u128::from(index), "index {}", index);
    }
    assert_eq!(term_at(u64::MAX), 6_074_001_000);
  }

  #[test]
  fn formats_like_a_list() {
    assert_eq!(format_terms(&generate(4)), "[1, 2, 2, 3]");
    assert_eq!(format_terms(&[]), "[]");
  }
}
