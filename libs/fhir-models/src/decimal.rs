//! Exact-text FHIR decimals
//!
//! A FHIR `decimal` is significant down to its last written digit: `1.50` and
//! `1.5` compare equal but must serialize differently. [`Decimal`] keeps the
//! literal exactly as it was read (or constructed). Comparisons run on a
//! canonical digit string so literals of any length stay exact; a
//! [`rust_decimal::Decimal`] is attached when the value fits one.

use crate::common::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// JSON number grammar: no leading zeros, no bare dot, optional exponent.
static LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal literal pattern must compile")
});

/// A decimal number that remembers its original text.
///
/// Equality, ordering and hashing are numeric, so `Decimal::must("1.0")` equals
/// `Decimal::must("1.00")`. Display and the wire codecs always use the stored
/// text. There is no precision limit.
///
/// # Examples
///
/// ```rust
/// use fhirwire_models::Decimal;
///
/// let d: Decimal = "120.50".parse().unwrap();
/// assert_eq!(d.to_string(), "120.50");
/// assert_eq!(d, Decimal::must("120.5"));
///
/// let pi = Decimal::must("3.14159265358979323846264338327950");
/// assert_eq!(pi.as_str(), "3.14159265358979323846264338327950");
/// assert!(pi.value().is_none());
/// ```
#[derive(Clone)]
pub struct Decimal {
    text: Arc<str>,
    magnitude: Magnitude,
    value: Option<rust_decimal::Decimal>,
}

/// `digits × 10^exponent` with no leading or trailing zeros in `digits`.
/// Zero is the empty digit string with a positive sign.
#[derive(Clone, PartialEq, Eq, Hash)]
struct Magnitude {
    negative: bool,
    digits: Arc<str>,
    exponent: i128,
}

impl Magnitude {
    fn new(negative: bool, digits: &str, exponent: i128) -> Self {
        let digits = digits.trim_start_matches('0');
        let trimmed = digits.trim_end_matches('0');
        if trimmed.is_empty() {
            return Self {
                negative: false,
                digits: Arc::from(""),
                exponent: 0,
            };
        }
        Self {
            negative,
            exponent: exponent + (digits.len() - trimmed.len()) as i128,
            digits: Arc::from(trimmed),
        }
    }

    /// Splits a literal that already matched [`LITERAL`].
    fn from_literal(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], unsigned[at + 1..].parse::<i32>().ok()?),
            None => (unsigned, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        let mut digits = String::with_capacity(int.len() + frac.len());
        digits.push_str(int);
        digits.push_str(frac);
        Some(Self::new(
            negative,
            &digits,
            i128::from(exponent) - frac.len() as i128,
        ))
    }

    /// `None` once the digits or the scale exceed what
    /// [`rust_decimal::Decimal`] holds.
    fn native(&self) -> Option<rust_decimal::Decimal> {
        let mut mantissa: i128 = if self.digits.is_empty() {
            0
        } else {
            self.digits.parse().ok()?
        };
        if self.negative {
            mantissa = -mantissa;
        }

        if self.exponent <= 0 {
            let scale = u32::try_from(-self.exponent).ok()?;
            return rust_decimal::Decimal::try_from_i128_with_scale(mantissa, scale).ok();
        }
        let mut value = rust_decimal::Decimal::try_from_i128_with_scale(mantissa, 0).ok()?;
        for _ in 0..self.exponent {
            value = value.checked_mul(rust_decimal::Decimal::TEN)?;
        }
        Some(value)
    }

    fn signum(&self) -> i8 {
        match (self.digits.is_empty(), self.negative) {
            (true, _) => 0,
            (false, true) => -1,
            (false, false) => 1,
        }
    }
}

impl Ord for Magnitude {
    fn cmp(&self, other: &Self) -> Ordering {
        let sign = self.signum().cmp(&other.signum());
        if sign != Ordering::Equal || self.signum() == 0 {
            return sign;
        }

        // Position of the leading digit, then digit by digit. Without
        // trailing zeros the shorter of two equal prefixes is the smaller.
        let lead = |m: &Self| m.exponent + m.digits.len() as i128;
        let abs = lead(self)
            .cmp(&lead(other))
            .then_with(|| self.digits.cmp(&other.digits));
        if self.negative {
            abs.reverse()
        } else {
            abs
        }
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Decimal {
    /// Parses a JSON-number-style decimal literal, keeping the text verbatim.
    ///
    /// Accepts `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` with any number
    /// of digits. Exponents outside the `i32` range are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        if !LITERAL.is_match(text) {
            return Err(Error::InvalidDecimal(text.to_string()));
        }
        let magnitude =
            Magnitude::from_literal(text).ok_or_else(|| Error::InvalidDecimal(text.to_string()))?;

        Ok(Self {
            text: Arc::from(text),
            value: magnitude.native(),
            magnitude,
        })
    }

    /// Like [`Decimal::parse`] but panics on invalid input.
    ///
    /// Meant for literals in tests and fixtures.
    pub fn must(text: &str) -> Self {
        match Self::parse(text) {
            Ok(decimal) => decimal,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self {
            text: Arc::from(value.to_string()),
            magnitude: Magnitude::new(value < 0, &value.unsigned_abs().to_string(), 0),
            value: Some(rust_decimal::Decimal::from(value)),
        }
    }

    /// Converts a float using its shortest round-trip rendering.
    ///
    /// `1.5` becomes `"1.5"` and `120.0` becomes `"120"`. NaN and infinities are
    /// rejected.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidDecimal(value.to_string()));
        }
        Self::parse(&value.to_string())
    }

    /// The literal exactly as it will be written.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The value as a [`rust_decimal::Decimal`], or `None` when it needs more
    /// than the 28 significant digits that type carries.
    pub fn value(&self) -> Option<rust_decimal::Decimal> {
        self.value
    }

    pub fn to_f64(&self) -> f64 {
        // Every accepted literal is also a valid float literal.
        self.text.parse().unwrap_or_default()
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.signum() == 0
    }
}

impl FromStr for Decimal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<i32> for Decimal {
    fn from(value: i32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl From<u32> for Decimal {
    fn from(value: u32) -> Self {
        Self::from_i64(i64::from(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Decimal").field(&&*self.text).finish()
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.magnitude == other.magnitude
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.magnitude.hash(state);
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude.cmp(&other.magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keeps_trailing_zeros() {
        for text in ["1.50", "120.50", "0.000", "-0", "1e3", "2.50E-2", "0.5"] {
            assert_eq!(Decimal::must(text).to_string(), text);
        }
    }

    #[test]
    fn rejects_non_literals() {
        for text in [
            "abc", "NaN", "Infinity", "", "1.", ".5", "+1", "1e", "1.2.3", " 1", "007", "01.5",
            "-00", "00",
        ] {
            assert!(
                matches!(Decimal::parse(text), Err(Error::InvalidDecimal(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unbounded_exponent() {
        assert!(Decimal::parse("1e99999999999").is_err());
        assert!(Decimal::parse("1e2147483647").is_ok());
    }

    #[test]
    fn keeps_digits_beyond_native_precision() {
        for text in [
            "123456789012345678901234567890",
            "0.00000000000000000000000000001",
            "1.00000000000000000000000000001",
            "3.14159265358979323846264338327950",
            "-98765432109876543210.123456789012345678901",
        ] {
            let d = Decimal::must(text);
            assert_eq!(d.as_str(), text);
            assert_eq!(d.to_string(), text);
        }
        assert!(Decimal::must("123456789012345678901234567890").value().is_none());
    }

    #[test]
    fn long_literals_compare_exactly() {
        let a = Decimal::must("1.00000000000000000000000000001");
        let b = Decimal::must("1.00000000000000000000000000002");
        assert_ne!(a, b);
        assert!(a < b);
        assert!(a > Decimal::must("1"));
        assert_eq!(a, Decimal::must("1.000000000000000000000000000010"));
        assert_eq!(
            Decimal::must("123456789012345678901234567890"),
            Decimal::must("1.23456789012345678901234567890e29")
        );
        assert!(Decimal::must("-0.00000000000000000000000000001") < Decimal::must("0"));
        assert!(Decimal::must("1e40") > Decimal::must("99999999999999999999999999999999999999"));
    }

    #[test]
    fn from_float() {
        assert_eq!(Decimal::from_f64(1.5).unwrap().as_str(), "1.5");
        assert_eq!(Decimal::from_f64(120.0).unwrap().as_str(), "120");
        assert!(Decimal::from_f64(f64::NAN).is_err());
        assert!(Decimal::from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn from_int() {
        assert_eq!(Decimal::from(42).as_str(), "42");
        assert_eq!(Decimal::from_i64(-7).as_str(), "-7");
        assert_eq!(Decimal::from_i64(-1200), Decimal::must("-1.2e3"));
        assert_eq!(Decimal::from_i64(i64::MIN).as_str(), i64::MIN.to_string());
    }

    #[test]
    fn numeric_equality_and_order() {
        assert_eq!(Decimal::must("1.0"), Decimal::must("1.00"));
        assert_ne!(Decimal::must("1.0"), Decimal::must("1.01"));
        assert!(Decimal::must("2") > Decimal::must("1.99"));
        assert!(Decimal::must("-2") < Decimal::must("-1.99"));
        assert_eq!(Decimal::must("-0"), Decimal::must("0.000"));
        assert_eq!(Decimal::must("2.50E-2"), Decimal::must("0.025"));

        let set: HashSet<_> = [
            Decimal::must("1.0"),
            Decimal::must("1.000"),
            Decimal::must("1e0"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn accessors() {
        let d = Decimal::must("3.14");
        assert!((d.to_f64() - 3.14).abs() < f64::EPSILON);
        assert!(!d.is_zero());
        assert!(Decimal::must("0.00").is_zero());
        assert!(Decimal::must("-0e5").is_zero());
        assert_eq!(
            Decimal::must("1e2").value(),
            Some(rust_decimal::Decimal::from(100))
        );
    }

    #[test]
    #[should_panic]
    fn must_panics_on_garbage() {
        Decimal::must("not a number");
    }
}
