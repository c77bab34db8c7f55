//! Scalar trait for state and vector element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, Mul};

pub use faer::c64;

/// Trait for scalar types supported by lazyptr.
///
/// This wraps faer's `ComplexField` (so GEMM kernels accept it) with the
/// handful of element operations the contraction code needs.
pub trait Scalar:
    ComplexField
    + Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Mul<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Complex conjugate. Identity for real types.
    fn conjugate(self) -> Self;

    /// Squared modulus `|x|^2`.
    fn abs_sqr(self) -> f64;

    /// Whether every component is finite.
    fn is_finite_value(self) -> bool;

    /// Embed a real number.
    fn from_real(value: f64) -> Self;
}

impl Scalar for f64 {
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn conjugate(self) -> Self {
        self
    }

    #[inline]
    fn abs_sqr(self) -> f64 {
        self * self
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        f64::is_finite(self)
    }

    fn from_real(value: f64) -> Self {
        value
    }
}

impl Scalar for c64 {
    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    #[inline]
    fn conjugate(self) -> Self {
        c64::new(self.re, -self.im)
    }

    #[inline]
    fn abs_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn is_finite_value(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    fn from_real(value: f64) -> Self {
        c64::new(value, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_f64_is_real() {
        assert!(<f64 as ComplexField>::IS_REAL);
    }

    #[test]
    fn test_c64_is_not_real() {
        assert!(!<c64 as ComplexField>::IS_REAL);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(<f64 as Scalar>::zero(), 0.0);
        assert_eq!(<f64 as Scalar>::one(), 1.0);
        assert_eq!(<c64 as Scalar>::zero(), c64::new(0.0, 0.0));
        assert_eq!(<c64 as Scalar>::one(), c64::new(1.0, 0.0));
    }

    #[test]
    fn test_conjugate() {
        assert_eq!(Scalar::conjugate(2.5f64), 2.5);
        let z = c64::new(1.0, 2.0);
        assert_eq!(Scalar::conjugate(z), c64::new(1.0, -2.0));
    }

    #[test]
    fn test_finiteness() {
        assert!(Scalar::is_finite_value(1.0f64));
        assert!(!Scalar::is_finite_value(f64::NAN));
        assert!(!Scalar::is_finite_value(c64::new(0.0, f64::INFINITY)));
        assert_eq!(Scalar::abs_sqr(c64::new(3.0, 4.0)), 25.0);
    }
}
