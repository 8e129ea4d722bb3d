use core::ops::{Index, IndexMut};

use crate::traits::{LinalgScalar, Scalar};

use super::Matrix;

/// Dynamically-sized vector: a single right-hand side or Toeplitz generator.
///
/// Solvers accept either a `Vector` (one system) or a [`Matrix`] (one system
/// per column) as the right-hand side; the solution mirrors the input shape.
///
/// # Examples
///
/// ```
/// use densolve::Vector;
///
/// let v = Vector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T: Scalar> Vector<T> {
    /// Create a vector from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a zero vector of length `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }
}

impl<T> Vector<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the vector, returning its storage.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: LinalgScalar> Vector<T> {
    /// Whether every element is finite.
    pub fn all_finite(&self) -> bool {
        self.data.iter().all(|&x| x.is_finite())
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

// ── Conversions: Vector ↔ single-column Matrix ──────────────────────

impl<T: Scalar> From<Vector<T>> for Matrix<T> {
    /// A length-`n` vector becomes an `n x 1` matrix (storage reused).
    fn from(v: Vector<T>) -> Self {
        let n = v.len();
        Matrix::from_vec(n, 1, v.data)
    }
}

impl<T: Scalar> From<Matrix<T>> for Vector<T> {
    /// A single-column matrix becomes a vector (storage reused).
    ///
    /// Panics if the matrix has more than one column.
    fn from(m: Matrix<T>) -> Self {
        assert_eq!(m.ncols(), 1, "expected a single-column matrix");
        Vector { data: m.into_vec() }
    }
}
