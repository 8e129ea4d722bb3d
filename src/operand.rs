//! Input validation and aliasing layer.
//!
//! The kernel library factors matrices in place, so every solver needs a
//! working buffer it is allowed to destroy. Ownership decides that: passing a
//! matrix **by value** donates its storage to the call (the analogue of an
//! `overwrite=true` flag), while passing `&m` always leaves the caller's data
//! untouched behind a fresh copy. Either way the dispatcher ends up holding a
//! buffer that is safe to overwrite: a donation, or a copy made here.
//!
//! Finite-value checking happens in the same pass. Disabling `check_finite`
//! skips that validation for speed, and shifts responsibility for NaN/Inf
//! corruption (silent wrong answers, or faults inside the native kernels)
//! entirely to the caller.

use log::debug;

use crate::error::Error;
use crate::matrix::{Matrix, Vector};
use crate::traits::LinalgScalar;

/// A caller-supplied matrix operand: borrowed (copied before any destructive
/// kernel call) or owned (storage may be consumed in place).
///
/// Solvers accept `impl Into<Operand<T>>`, so both forms work at the call
/// site:
///
/// ```
/// use densolve::{inv, Matrix};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let i1 = inv(&a, true).unwrap();     // `a` is copied, still usable
/// let i2 = inv(a, true).unwrap();      // `a` is donated to the call
/// assert_eq!(i1, i2);
/// ```
#[derive(Debug)]
pub enum Operand<'a, T> {
    /// Borrowed input; never mutated.
    Borrowed(&'a Matrix<T>),
    /// Donated input; the kernel may factor it in place.
    Owned(Matrix<T>),
}

impl<'a, T> From<&'a Matrix<T>> for Operand<'a, T> {
    fn from(m: &'a Matrix<T>) -> Self {
        Operand::Borrowed(m)
    }
}

impl<T> From<Matrix<T>> for Operand<'_, T> {
    fn from(m: Matrix<T>) -> Self {
        Operand::Owned(m)
    }
}

impl<T: LinalgScalar> Operand<'_, T> {
    /// The operand's matrix, whichever way it is held.
    #[inline]
    pub(crate) fn matrix(&self) -> &Matrix<T> {
        match self {
            Operand::Borrowed(m) => m,
            Operand::Owned(m) => m,
        }
    }

    #[inline]
    pub(crate) fn nrows(&self) -> usize {
        self.matrix().nrows()
    }

    #[inline]
    pub(crate) fn ncols(&self) -> usize {
        self.matrix().ncols()
    }

    /// Validate and produce a buffer the kernel may overwrite.
    pub(crate) fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error> {
        if check_finite && !self.matrix().all_finite() {
            return Err(Error::NonFinite);
        }
        match self {
            Operand::Borrowed(m) => {
                debug!("operand borrowed: copying {}x{}", m.nrows(), m.ncols());
                Ok(m.clone())
            }
            Operand::Owned(m) => Ok(m),
        }
    }
}

/// Right-hand-side operand whose shape the solution mirrors: a [`Vector`]
/// yields a `Vector` solution, a [`Matrix`] (one system per column) yields a
/// `Matrix`. By-value inputs donate their storage, references are copied.
pub trait Rhs<T: LinalgScalar> {
    /// The solution type produced by [`assemble`](Rhs::assemble).
    type Out;

    /// Leading dimension (number of equations).
    fn nrows(&self) -> usize;

    /// Number of independent systems.
    fn ncols(&self) -> usize;

    /// Validate and convert into a working column matrix.
    fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error>;

    /// Reassemble a solution matrix into the caller's shape.
    fn assemble(m: Matrix<T>) -> Self::Out;
}

impl<T: LinalgScalar> Rhs<T> for Matrix<T> {
    type Out = Matrix<T>;

    fn nrows(&self) -> usize {
        Matrix::nrows(self)
    }

    fn ncols(&self) -> usize {
        Matrix::ncols(self)
    }

    fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error> {
        if check_finite && !self.all_finite() {
            return Err(Error::NonFinite);
        }
        Ok(self)
    }

    fn assemble(m: Matrix<T>) -> Matrix<T> {
        m
    }
}

impl<T: LinalgScalar> Rhs<T> for &Matrix<T> {
    type Out = Matrix<T>;

    fn nrows(&self) -> usize {
        Matrix::nrows(self)
    }

    fn ncols(&self) -> usize {
        Matrix::ncols(self)
    }

    fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error> {
        if check_finite && !self.all_finite() {
            return Err(Error::NonFinite);
        }
        Ok(self.clone())
    }

    fn assemble(m: Matrix<T>) -> Matrix<T> {
        m
    }
}

impl<T: LinalgScalar> Rhs<T> for Vector<T> {
    type Out = Vector<T>;

    fn nrows(&self) -> usize {
        self.len()
    }

    fn ncols(&self) -> usize {
        1
    }

    fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error> {
        if check_finite && !self.all_finite() {
            return Err(Error::NonFinite);
        }
        Ok(self.into())
    }

    fn assemble(m: Matrix<T>) -> Vector<T> {
        m.into()
    }
}

impl<T: LinalgScalar> Rhs<T> for &Vector<T> {
    type Out = Vector<T>;

    fn nrows(&self) -> usize {
        self.len()
    }

    fn ncols(&self) -> usize {
        1
    }

    fn into_working(self, check_finite: bool) -> Result<Matrix<T>, Error> {
        if check_finite && !self.all_finite() {
            return Err(Error::NonFinite);
        }
        Ok(self.clone().into())
    }

    fn assemble(m: Matrix<T>) -> Vector<T> {
        m.into()
    }
}

/// Validate a 1-D slice (Toeplitz generators) for finiteness.
pub(crate) fn check_finite_slice<T: LinalgScalar>(
    v: &[T],
    check_finite: bool,
) -> Result<(), Error> {
    if check_finite && !v.iter().all(|&x| x.is_finite()) {
        return Err(Error::NonFinite);
    }
    Ok(())
}
