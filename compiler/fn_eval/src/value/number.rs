//! Decimal numbers.
//!
//! A number keeps the text it was written or computed as. Text containing
//! a `.` is float-typed, anything else is integer-typed. Integer pairs use
//! checked `i64` arithmetic for `+ - *` and fall back to `f64` on overflow;
//! everything else is computed in `f64`.

use std::fmt;
use std::rc::Rc;

use crate::errors::{division_by_zero, EvalError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumberKind {
    Int,
    Float,
}

#[derive(Clone, Debug)]
pub struct Number {
    text: Rc<str>,
}

impl Number {
    /// Wrap decimal text as produced by the lexer.
    pub fn from_text(text: &str) -> Self {
        Number { text: text.into() }
    }

    pub fn from_i64(value: i64) -> Self {
        Number {
            text: value.to_string().into(),
        }
    }

    /// Shortest round-trip decimal text, without a forced trailing `.0`.
    pub fn from_f64(value: f64) -> Self {
        Number {
            text: format!("{value}").into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NumberKind {
        if self.text.contains('.') {
            NumberKind::Float
        } else {
            NumberKind::Int
        }
    }

    pub fn as_f64(&self) -> f64 {
        self.text.parse().unwrap_or(f64::NAN)
    }

    /// The value as `i64`, if integer-typed and in range.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind() {
            NumberKind::Int => self.text.parse().ok(),
            NumberKind::Float => None,
        }
    }

    fn int_pair(&self, other: &Number) -> Option<(i64, i64)> {
        Some((self.as_i64()?, other.as_i64()?))
    }

    fn combine(
        &self,
        other: &Number,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Number {
        if let Some(result) = self.int_pair(other).and_then(|(a, b)| int_op(a, b)) {
            return Number::from_i64(result);
        }
        Number::from_f64(float_op(self.as_f64(), other.as_f64()))
    }

    #[must_use]
    pub fn add(&self, other: &Number) -> Number {
        self.combine(other, i64::checked_add, |a, b| a + b)
    }

    #[must_use]
    pub fn sub(&self, other: &Number) -> Number {
        self.combine(other, i64::checked_sub, |a, b| a - b)
    }

    #[must_use]
    pub fn mul(&self, other: &Number) -> Number {
        self.combine(other, i64::checked_mul, |a, b| a * b)
    }

    /// Always computed in `f64`.
    pub fn div(&self, other: &Number) -> Result<Number, EvalError> {
        let divisor = other.as_f64();
        if divisor == 0.0 {
            return Err(division_by_zero());
        }
        Ok(Number::from_f64(self.as_f64() / divisor))
    }

    pub fn more_than(&self, other: &Number) -> bool {
        self.as_f64() > other.as_f64()
    }

    pub fn less_than(&self, other: &Number) -> bool {
        self.as_f64() < other.as_f64()
    }
}

/// Numbers compare by value, so `2` equals `2.0`.
impl PartialEq for Number {
    #[expect(clippy::float_cmp, reason = "language equality is exact f64 equality")]
    fn eq(&self, other: &Self) -> bool {
        self.as_f64() == other.as_f64()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn n(text: &str) -> Number {
        Number::from_text(text)
    }

    #[test]
    fn kind_follows_decimal_point() {
        assert_eq!(n("12").kind(), NumberKind::Int);
        assert_eq!(n("1.5").kind(), NumberKind::Float);
        assert_eq!(n("1.5").as_i64(), None);
        assert_eq!(n("12").as_i64(), Some(12));
    }

    #[test]
    fn float_sums_drop_trailing_zero() {
        assert_eq!(n("2.5").add(&n("2.5")).text(), "5");
        assert_eq!(n("2.5").add(&n("2")).text(), "4.5");
        assert_eq!(n("0.1").add(&n("0.2")).text(), "0.30000000000000004");
    }

    #[test]
    fn integer_arithmetic_is_exact() {
        assert_eq!(n("9007199254740993").add(&n("0")).text(), "9007199254740993");
        assert_eq!(n("7").sub(&n("10")).text(), "-3");
        assert_eq!(n("6").mul(&n("7")).text(), "42");
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let big = Number::from_i64(i64::MAX);
        let sum = big.add(&n("1"));
        assert_eq!(sum.text(), "9223372036854775808");
        assert_eq!(sum.kind(), NumberKind::Int);
        assert_eq!(sum.as_i64(), None);
    }

    #[test]
    fn division_uses_floats() {
        assert_eq!(n("7").div(&n("2")).unwrap().text(), "3.5");
        assert_eq!(n("6").div(&n("3")).unwrap().text(), "2");
        assert_eq!(n("1").div(&n("0")).unwrap_err(), division_by_zero());
        assert_eq!(n("1").div(&n("0.0")).unwrap_err(), division_by_zero());
    }

    #[test]
    fn comparisons_and_equality() {
        assert!(n("3").more_than(&n("2.5")));
        assert!(n("2").less_than(&n("2.5")));
        assert!(!n("2").less_than(&n("2")));
        assert_eq!(n("2"), n("2.0"));
        assert_ne!(n("2"), n("3"));
    }

    proptest! {
        #[test]
        fn small_integer_sums_render_exactly(a in -10_000i64..10_000, b in -10_000i64..10_000) {
            let sum = Number::from_i64(a).add(&Number::from_i64(b));
            prop_assert_eq!(sum.text(), (a + b).to_string());
        }

        #[test]
        fn two_digit_fractions_add_like_decimals(
            a in 0u32..100, af in 0u32..100, b in 0u32..100, bf in 0u32..100,
        ) {
            let x = n(&format!("{a}.{af:02}"));
            let y = n(&format!("{b}.{bf:02}"));
            let expected = f64::from(a * 100 + af + b * 100 + bf) / 100.0;
            prop_assert!((x.add(&y).as_f64() - expected).abs() < 1e-9);
        }
    }
}
