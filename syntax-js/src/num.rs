use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

fn radix_value(digits: &str, radix: u32) -> Option<f64> {
  if digits.is_empty() {
    return None;
  }
  let mut value = 0f64;
  for c in digits.chars() {
    let d = c.to_digit(radix)?;
    value = value * radix as f64 + d as f64;
  }
  Some(value)
}

impl JsNumber {
  /// Evaluates a numeric literal's raw source text. Handles decimal (including fractions,
  /// exponents, and `.5` forms), `0x`/`0o`/`0b` prefixes, and legacy octals like `0755`.
  pub fn from_literal(raw: &str) -> Option<JsNumber> {
    if let Some(rest) = raw.strip_prefix("0b").or_else(|| raw.strip_prefix("0B")) {
      return radix_value(rest, 2).map(JsNumber);
    };
    if let Some(rest) = raw.strip_prefix("0o").or_else(|| raw.strip_prefix("0O")) {
      return radix_value(rest, 8).map(JsNumber);
    };
    if let Some(rest) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
      return radix_value(rest, 16).map(JsNumber);
    };
    if raw.len() > 1 && raw.starts_with('0') && raw.bytes().all(|b| b.is_ascii_digit()) {
      // `08` and `09` fall back to decimal, like engines treat them.
      if let Some(value) = radix_value(&raw[1..], 8) {
        return Some(JsNumber(value));
      };
    };
    raw.parse::<f64>().ok().map(JsNumber)
  }
}

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::JsNumber;

  #[test]
  fn evaluates_literal_forms() {
    assert_eq!(JsNumber::from_literal("42"), Some(JsNumber(42.0)));
    assert_eq!(JsNumber::from_literal("4.5"), Some(JsNumber(4.5)));
    assert_eq!(JsNumber::from_literal(".5"), Some(JsNumber(0.5)));
    assert_eq!(JsNumber::from_literal("1e3"), Some(JsNumber(1000.0)));
    assert_eq!(JsNumber::from_literal("0x10"), Some(JsNumber(16.0)));
    assert_eq!(JsNumber::from_literal("0b101"), Some(JsNumber(5.0)));
    assert_eq!(JsNumber::from_literal("0o17"), Some(JsNumber(15.0)));
    assert_eq!(JsNumber::from_literal("0755"), Some(JsNumber(493.0)));
    assert_eq!(JsNumber::from_literal("09"), Some(JsNumber(9.0)));
    assert_eq!(JsNumber::from_literal("0xg"), None);
  }
}
