//! Scalar trait for tensor element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

pub use faer::c64;

/// Trait for scalar types supported by tenalg.
///
/// This wraps faer's `ComplexField` with the arithmetic operator bounds the
/// tensor algorithms need, so generic code can write `a * b + c` directly.
pub trait Scalar:
    ComplexField
    + Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + 'static
{
    /// The real type associated with this scalar.
    type Real: RealScalar;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embed a real value into this scalar type.
    ///
    /// The qualified `<Self as Scalar>` paths keep the associated type
    /// unambiguous; `ComplexField` declares a `Real` of its own.
    fn from_real(r: <Self as Scalar>::Real) -> Self;

    /// Multiply by a real interpolation weight.
    fn scale_real(self, t: f64) -> Self;

    /// Squared modulus, `|x|^2`.
    fn abs_sqr(self) -> <Self as Scalar>::Real;

    /// Exact test against the additive identity.
    ///
    /// Pivot selection in Gaussian elimination deliberately compares against
    /// exact zero rather than a tolerance, matching the reference semantics.
    fn is_zero(self) -> bool {
        self == Self::zero()
    }
}

/// Scalars that are their own real part, with an ordering and a square root.
pub trait RealScalar: Scalar + PartialOrd {
    fn sqrt(self) -> Self;
}

impl Scalar for f64 {
    type Real = f64;

    fn one() -> Self {
        1.0
    }

    fn from_real(r: f64) -> Self {
        r
    }

    fn scale_real(self, t: f64) -> Self {
        self * t
    }

    fn abs_sqr(self) -> f64 {
        self * self
    }
}

impl RealScalar for f64 {
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }
}

impl Scalar for c64 {
    type Real = f64;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_real(r: f64) -> Self {
        c64::new(r, 0.0)
    }

    fn scale_real(self, t: f64) -> Self {
        c64::new(self.re * t, self.im * t)
    }

    fn abs_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }
}
