use core::ops::{Mul, Sub};

use crate::traits::Scalar;

use super::vector::Vector;
use super::Matrix;

// ── Matrix product ──────────────────────────────────────────────────

impl<T: Scalar> Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows(),
            self.ncols(),
            rhs.nrows(),
            rhs.ncols(),
        );
        let mut out = Matrix::zeros(self.nrows(), rhs.ncols());
        for j in 0..rhs.ncols() {
            for k in 0..self.ncols() {
                let r = rhs[(k, j)];
                for i in 0..self.nrows() {
                    out[(i, j)] = out[(i, j)] + self[(i, k)] * r;
                }
            }
        }
        out
    }
}

impl<T: Scalar> Mul<Matrix<T>> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: Matrix<T>) -> Matrix<T> {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&Vector<T>> for &Matrix<T> {
    type Output = Vector<T>;

    fn mul(self, rhs: &Vector<T>) -> Vector<T> {
        assert_eq!(
            self.ncols(),
            rhs.len(),
            "dimension mismatch: {}x{} * {}",
            self.nrows(),
            self.ncols(),
            rhs.len(),
        );
        let mut out = Vector::zeros(self.nrows());
        for k in 0..self.ncols() {
            let r = rhs[k];
            for i in 0..self.nrows() {
                out[i] = out[i] + self[(i, k)] * r;
            }
        }
        out
    }
}

// ── Element-wise subtraction ────────────────────────────────────────

impl<T: Scalar> Sub<&Matrix<T>> for &Matrix<T> {
    type Output = Matrix<T>;

    fn sub(self, rhs: &Matrix<T>) -> Matrix<T> {
        assert_eq!(
            (self.nrows(), self.ncols()),
            (rhs.nrows(), rhs.ncols()),
            "dimension mismatch: {}x{} - {}x{}",
            self.nrows(),
            self.ncols(),
            rhs.nrows(),
            rhs.ncols(),
        );
        Matrix::from_fn(self.nrows(), self.ncols(), |i, j| {
            self[(i, j)] - rhs[(i, j)]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matmul() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[5.0, 6.0, 7.0, 8.0]);
        let c = &a * &b;
        assert_eq!(c[(0, 0)], 19.0);
        assert_eq!(c[(0, 1)], 22.0);
        assert_eq!(c[(1, 0)], 43.0);
        assert_eq!(c[(1, 1)], 50.0);
    }

    #[test]
    fn matvec() {
        let a = Matrix::from_rows(2, 3, &[1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let x = Vector::from_slice(&[1.0, 1.0, 1.0]);
        let y = &a * &x;
        assert_eq!(y[0], 6.0);
        assert_eq!(y[1], 15.0);
    }

    #[test]
    fn sub() {
        let a = Matrix::from_rows(2, 2, &[5.0_f64, 6.0, 7.0, 8.0]);
        let b = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let d = &a - &b;
        assert!(d.iter().all(|&x| x == 4.0));
    }
}
