use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for matrix elements the solver layer operates on.
///
/// Covers real and complex double precision (`f64`, `Complex<f64>`), the
/// element types the kernel library factors. The associated [`Real`] type
/// carries moduli, singular values, and eigenvalues.
///
/// [`Real`]: LinalgScalar::Real
pub trait LinalgScalar: Scalar + 'static {
    /// The real component type (`Self` for reals, `f64` for `Complex<f64>`).
    type Real: Scalar + Float;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// Whether the value is finite (no NaN, no infinity in any component).
    fn is_finite(self) -> bool;
}

impl LinalgScalar for f64 {
    type Real = f64;

    #[inline]
    fn modulus(self) -> f64 {
        self.abs()
    }

    #[inline]
    fn conj(self) -> f64 {
        self
    }

    #[inline]
    fn re(self) -> f64 {
        self
    }

    #[inline]
    fn from_real(r: f64) -> f64 {
        r
    }

    #[inline]
    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

impl LinalgScalar for Complex<f64> {
    type Real = f64;

    #[inline]
    fn modulus(self) -> f64 {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> f64 {
        self.re
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex::new(r, 0.0)
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}
