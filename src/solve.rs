//! Square-system solvers: general LU, declared-SPD Cholesky, and triangular
//! back-substitution.

use log::debug;

use crate::error::Error;
use crate::kernel::Lapack;
use crate::matrix::Matrix;
use crate::operand::{Operand, Rhs};

/// Options for [`solve`].
#[derive(Debug, Clone)]
pub struct SolveOptions {
    /// Treat the matrix as symmetric/Hermitian positive-definite and solve
    /// via Cholesky instead of LU. The property is not verified up front;
    /// a failed factorization reports [`Error::Singular`].
    pub assume_spd: bool,
    /// Which triangle holds the data when `assume_spd` is set (the other
    /// triangle is never read).
    pub lower: bool,
    /// Validate inputs for NaN/Inf before factoring. Disabling skips the
    /// scan; non-finite values then produce garbage or kernel faults.
    pub check_finite: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            assume_spd: false,
            lower: false,
            check_finite: true,
        }
    }
}

/// Transposition applied to the coefficient matrix in
/// [`solve_triangular`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transpose {
    /// Solve `A x = b`.
    No,
    /// Solve `Aᵀ x = b`.
    Yes,
    /// Solve `Aᴴ x = b`.
    Conjugate,
}

impl Transpose {
    fn as_byte(self) -> u8 {
        match self {
            Transpose::No => b'N',
            Transpose::Yes => b'T',
            Transpose::Conjugate => b'C',
        }
    }
}

/// Options for [`solve_triangular`].
#[derive(Debug, Clone)]
pub struct TriangularOptions {
    /// Transposition applied to `a` before solving.
    pub transposed: Transpose,
    /// `a` is lower triangular (upper otherwise).
    pub lower: bool,
    /// Assume a unit diagonal; the stored diagonal is never read.
    pub unit_diagonal: bool,
    /// Validate inputs for NaN/Inf.
    pub check_finite: bool,
}

impl Default for TriangularOptions {
    fn default() -> Self {
        Self {
            transposed: Transpose::No,
            lower: false,
            unit_diagonal: false,
            check_finite: true,
        }
    }
}

/// Solve the square system `A x = b`.
///
/// Dispatches on the declared structure: LU with partial pivoting by
/// default, Cholesky when [`assume_spd`](SolveOptions::assume_spd) is set.
/// Passing `a` or `b` by value donates its storage to the factorization;
/// passing by reference leaves the caller's data untouched.
///
/// The solution mirrors the right-hand-side shape: a [`Vector`] yields a
/// `Vector`, a [`Matrix`] (one system per column) yields a `Matrix`.
///
/// # Examples
///
/// ```
/// use densolve::{solve, Matrix, SolveOptions, Vector};
///
/// let a = Matrix::from_rows(3, 3, &[
///     3.0_f64, 2.0, 0.0,
///     1.0, -1.0, 0.0,
///     0.0, 5.0, 1.0,
/// ]);
/// let b = Vector::from_slice(&[2.0, 4.0, -1.0]);
/// let x = solve(&a, &b, &SolveOptions::default()).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] + 2.0).abs() < 1e-12);
/// assert!((x[2] - 9.0).abs() < 1e-12);
/// ```
///
/// [`Vector`]: crate::Vector
pub fn solve<'a, T, B>(
    a: impl Into<Operand<'a, T>>,
    b: B,
    opts: &SolveOptions,
) -> Result<B::Out, Error>
where
    T: Lapack,
    B: Rhs<T>,
{
    let a = a.into();
    let n = a.nrows();
    if !a.matrix().is_square() {
        return Err(Error::shape(format!(
            "expected a square coefficient matrix, got {}x{}",
            a.nrows(),
            a.ncols(),
        )));
    }
    if b.nrows() != n {
        return Err(Error::shape(format!(
            "right-hand side has {} rows, coefficient matrix has {}",
            b.nrows(),
            n,
        )));
    }
    let nrhs = b.ncols();
    let mut aw = a.into_working(opts.check_finite)?;
    let mut bw = b.into_working(opts.check_finite)?;

    if opts.assume_spd {
        let uplo = if opts.lower { b'L' } else { b'U' };
        debug!("solve: cholesky path, n={n}, nrhs={nrhs}, uplo={}", uplo as char);
        let info = T::posv(uplo, n, nrhs, aw.as_mut_slice(), bw.as_mut_slice());
        if info < 0 {
            return Err(Error::InvalidArgument {
                routine: "posv",
                arg: -info as usize,
            });
        }
        if info > 0 {
            return Err(Error::Singular { diagonal: None });
        }
    } else {
        debug!("solve: lu path, n={n}, nrhs={nrhs}");
        let mut ipiv = vec![0_i32; n];
        let info = T::gesv(n, nrhs, aw.as_mut_slice(), &mut ipiv, bw.as_mut_slice());
        if info < 0 {
            return Err(Error::InvalidArgument {
                routine: "gesv",
                arg: -info as usize,
            });
        }
        if info > 0 {
            return Err(Error::Singular {
                diagonal: Some(info as usize - 1),
            });
        }
    }
    Ok(B::assemble(bw))
}

/// Solve the triangular system `op(A) x = b` by back-substitution.
///
/// No factorization takes place, so `a` is only ever read and is taken by
/// reference. The half of `a` outside the declared triangle is never
/// touched; with [`unit_diagonal`](TriangularOptions::unit_diagonal) the
/// stored diagonal is ignored too.
///
/// A zero on the (effective) diagonal is reported as
/// [`Error::Singular`] with the 0-based offending index.
///
/// # Examples
///
/// ```
/// use densolve::{solve_triangular, Matrix, TriangularOptions, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 1.0, 3.0]);
/// let b = Vector::from_slice(&[4.0, 8.0]);
/// let opts = TriangularOptions { lower: true, ..Default::default() };
/// let x = solve_triangular(&a, &b, &opts).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn solve_triangular<T, B>(
    a: &Matrix<T>,
    b: B,
    opts: &TriangularOptions,
) -> Result<B::Out, Error>
where
    T: Lapack,
    B: Rhs<T>,
{
    let n = a.nrows();
    if !a.is_square() {
        return Err(Error::shape(format!(
            "expected a square coefficient matrix, got {}x{}",
            a.nrows(),
            a.ncols(),
        )));
    }
    if b.nrows() != n {
        return Err(Error::shape(format!(
            "right-hand side has {} rows, coefficient matrix has {}",
            b.nrows(),
            n,
        )));
    }
    if opts.check_finite && !a.all_finite() {
        return Err(Error::NonFinite);
    }
    let nrhs = b.ncols();
    let mut bw = b.into_working(opts.check_finite)?;

    let uplo = if opts.lower { b'L' } else { b'U' };
    let diag = if opts.unit_diagonal { b'U' } else { b'N' };
    debug!(
        "solve_triangular: n={n}, nrhs={nrhs}, uplo={}, trans={}, diag={}",
        uplo as char,
        opts.transposed.as_byte() as char,
        diag as char,
    );
    let info = T::trtrs(
        uplo,
        opts.transposed.as_byte(),
        diag,
        n,
        nrhs,
        a.as_slice(),
        bw.as_mut_slice(),
    );
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "trtrs",
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::Singular {
            diagonal: Some(info as usize - 1),
        });
    }
    Ok(B::assemble(bw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Vector;

    const TOL: f64 = 1e-12;

    #[test]
    fn solve_3x3() {
        let a = Matrix::from_rows(
            3,
            3,
            &[3.0_f64, 2.0, 0.0, 1.0, -1.0, 0.0, 0.0, 5.0, 1.0],
        );
        let b = Vector::from_slice(&[2.0, 4.0, -1.0]);
        let x = solve(&a, &b, &SolveOptions::default()).unwrap();
        assert!((x[0] - 2.0).abs() < TOL);
        assert!((x[1] + 2.0).abs() < TOL);
        assert!((x[2] - 9.0).abs() < TOL);
    }

    #[test]
    fn solve_matrix_rhs() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 0.0, 0.0, 4.0]);
        let b = Matrix::from_rows(2, 2, &[2.0_f64, 4.0, 8.0, 12.0]);
        let x = solve(&a, &b, &SolveOptions::default()).unwrap();
        assert!((x[(0, 0)] - 1.0).abs() < TOL);
        assert!((x[(0, 1)] - 2.0).abs() < TOL);
        assert!((x[(1, 0)] - 2.0).abs() < TOL);
        assert!((x[(1, 1)] - 3.0).abs() < TOL);
    }

    #[test]
    fn solve_donated_matches_borrowed() {
        let a = Matrix::from_rows(2, 2, &[4.0_f64, 1.0, 1.0, 3.0]);
        let b = Vector::from_slice(&[1.0, 2.0]);
        let x1 = solve(&a, &b, &SolveOptions::default()).unwrap();
        let x2 = solve(a, b, &SolveOptions::default()).unwrap();
        assert_eq!(x1, x2);
    }

    #[test]
    fn solve_singular() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
        let b = Vector::from_slice(&[1.0, 2.0]);
        let err = solve(&a, &b, &SolveOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Singular { .. }));
    }

    #[test]
    fn solve_spd_matches_general() {
        let a = Matrix::from_rows(
            3,
            3,
            &[4.0_f64, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0],
        );
        let b = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let x_lu = solve(&a, &b, &SolveOptions::default()).unwrap();
        let opts = SolveOptions {
            assume_spd: true,
            ..Default::default()
        };
        let x_chol = solve(&a, &b, &opts).unwrap();
        for i in 0..3 {
            assert!((x_lu[i] - x_chol[i]).abs() < 1e-10);
        }
    }

    #[test]
    fn solve_spd_lower_triangle_only() {
        // upper triangle is junk; lower=true must ignore it
        let a = Matrix::from_rows(
            2,
            2,
            &[4.0_f64, 777.0, 1.0, 3.0],
        );
        let b = Vector::from_slice(&[5.0, 4.0]);
        let opts = SolveOptions {
            assume_spd: true,
            lower: true,
            ..Default::default()
        };
        let x = solve(&a, &b, &opts).unwrap();
        // against the true SPD matrix [[4,1],[1,3]]
        assert!((4.0 * x[0] + x[1] - 5.0).abs() < TOL);
        assert!((x[0] + 3.0 * x[1] - 4.0).abs() < TOL);
    }

    #[test]
    fn solve_spd_not_positive_definite_is_singular() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 1.0]);
        let b = Vector::from_slice(&[1.0, 1.0]);
        let opts = SolveOptions {
            assume_spd: true,
            ..Default::default()
        };
        assert!(matches!(
            solve(&a, &b, &opts).unwrap_err(),
            Error::Singular { .. }
        ));
    }

    #[test]
    fn solve_shape_errors() {
        let a = Matrix::from_rows(2, 3, &[1.0_f64; 6]);
        let b = Vector::from_slice(&[1.0, 2.0]);
        assert!(matches!(
            solve(&a, &b, &SolveOptions::default()).unwrap_err(),
            Error::InvalidShape(_)
        ));
        let a = Matrix::<f64>::eye(3);
        assert!(matches!(
            solve(&a, &b, &SolveOptions::default()).unwrap_err(),
            Error::InvalidShape(_)
        ));
    }

    #[test]
    fn solve_non_finite_rejected() {
        let a = Matrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, f64::NAN]);
        let b = Vector::from_slice(&[1.0, 1.0]);
        assert_eq!(
            solve(&a, &b, &SolveOptions::default()).unwrap_err(),
            Error::NonFinite
        );
    }

    #[test]
    fn triangular_upper() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 3.0]);
        let b = Vector::from_slice(&[5.0, 6.0]);
        let x = solve_triangular(&a, &b, &TriangularOptions::default()).unwrap();
        assert!((x[1] - 2.0).abs() < TOL);
        assert!((x[0] - 1.5).abs() < TOL);
    }

    #[test]
    fn triangular_transposed() {
        // solving Aᵀx = b with upper A equals solving with lower Aᵀ
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 3.0]);
        let b = Vector::from_slice(&[4.0, 8.0]);
        let opts = TriangularOptions {
            transposed: Transpose::Yes,
            ..Default::default()
        };
        let x = solve_triangular(&a, &b, &opts).unwrap();
        let at = a.transpose();
        let lower = TriangularOptions {
            lower: true,
            ..Default::default()
        };
        let y = solve_triangular(&at, &b, &lower).unwrap();
        for i in 0..2 {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn triangular_unit_diagonal_ignores_stored() {
        let a = Matrix::from_rows(2, 2, &[99.0_f64, 2.0, 0.0, 99.0]);
        let b = Vector::from_slice(&[5.0, 3.0]);
        let opts = TriangularOptions {
            unit_diagonal: true,
            ..Default::default()
        };
        let x = solve_triangular(&a, &b, &opts).unwrap();
        // effective matrix is [[1,2],[0,1]]
        assert!((x[1] - 3.0).abs() < TOL);
        assert!((x[0] + 1.0).abs() < TOL);
    }

    #[test]
    fn triangular_zero_diagonal() {
        let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 0.0, 0.0]);
        let b = Vector::from_slice(&[1.0, 1.0]);
        let err = solve_triangular(&a, &b, &TriangularOptions::default()).unwrap_err();
        assert_eq!(err, Error::Singular { diagonal: Some(1) });
    }
}
