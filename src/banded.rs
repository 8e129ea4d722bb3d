//! Banded solvers over compact diagonal-ordered storage.
//!
//! A band matrix with `l` subdiagonals and `u` superdiagonals is stored as an
//! `(l + u + 1) x n` matrix `ab` with `ab[(u + i - j, j)] = a[(i, j)]`, so
//! each storage row is one diagonal. The Hermitian form keeps only one side:
//! `u + 1` rows holding the upper (or lower) triangle's diagonals.

use log::debug;

use crate::error::Error;
use crate::kernel::Lapack;
use crate::operand::{Operand, Rhs};
use crate::traits::LinalgScalar;

/// Options for [`solve_banded`].
#[derive(Debug, Clone)]
pub struct BandedOptions {
    /// Validate inputs for NaN/Inf.
    pub check_finite: bool,
}

impl Default for BandedOptions {
    fn default() -> Self {
        Self { check_finite: true }
    }
}

/// Options for [`solveh_banded`].
#[derive(Debug, Clone)]
pub struct HermitianBandedOptions {
    /// `ab` holds the lower triangle's diagonals (upper otherwise).
    pub lower: bool,
    /// Validate inputs for NaN/Inf.
    pub check_finite: bool,
}

impl Default for HermitianBandedOptions {
    fn default() -> Self {
        Self {
            lower: false,
            check_finite: true,
        }
    }
}

/// Solve `A x = b` for a band matrix in compact storage.
///
/// `bands` is `(l, u)`, the sub- and superdiagonal counts; `ab` must have
/// `l + u + 1` rows. A pure tridiagonal system (`l == u == 1`) takes a
/// dedicated fast path; the general path expands the storage with `l` extra
/// rows of pivoting fill-in headroom before factoring.
///
/// # Examples
///
/// ```
/// use densolve::{solve_banded, BandedOptions, Matrix, Vector};
///
/// // tridiagonal [[2,-1,0],[-1,2,-1],[0,-1,2]]
/// let ab = Matrix::from_rows(3, 3, &[
///     0.0_f64, -1.0, -1.0,
///     2.0, 2.0, 2.0,
///     -1.0, -1.0, 0.0,
/// ]);
/// let b = Vector::from_slice(&[1.0, 0.0, 1.0]);
/// let x = solve_banded((1, 1), &ab, &b, &BandedOptions::default()).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// assert!((x[2] - 1.0).abs() < 1e-12);
/// ```
pub fn solve_banded<'a, T, B>(
    bands: (usize, usize),
    ab: impl Into<Operand<'a, T>>,
    b: B,
    opts: &BandedOptions,
) -> Result<B::Out, Error>
where
    T: Lapack,
    B: Rhs<T>,
{
    let (l, u) = bands;
    let ab = ab.into();
    let n = ab.ncols();
    if ab.nrows() != l + u + 1 {
        return Err(Error::shape(format!(
            "band storage has {} rows, expected l + u + 1 = {}",
            ab.nrows(),
            l + u + 1,
        )));
    }
    if b.nrows() != n {
        return Err(Error::shape(format!(
            "right-hand side has {} rows, band matrix has order {}",
            b.nrows(),
            n,
        )));
    }
    let nrhs = b.ncols();
    let abw = ab.into_working(opts.check_finite)?;
    let mut bw = b.into_working(opts.check_finite)?;

    let (routine, info) = if l == 1 && u == 1 {
        debug!("solve_banded: tridiagonal path, n={n}, nrhs={nrhs}");
        let mut du: Vec<T> = (1..n).map(|j| abw[(0, j)]).collect();
        let mut d: Vec<T> = (0..n).map(|j| abw[(1, j)]).collect();
        let mut dl: Vec<T> = (0..n.saturating_sub(1)).map(|j| abw[(2, j)]).collect();
        (
            "gtsv",
            T::gtsv(n, nrhs, &mut dl, &mut d, &mut du, bw.as_mut_slice()),
        )
    } else {
        debug!("solve_banded: general path, n={n}, l={l}, u={u}, nrhs={nrhs}");
        // factorization needs l extra rows above the stored band
        let ldab = 2 * l + u + 1;
        let mut a2 = vec![T::zero(); ldab * n];
        for j in 0..n {
            for i in 0..(l + u + 1) {
                a2[j * ldab + l + i] = abw[(i, j)];
            }
        }
        let mut ipiv = vec![0_i32; n];
        (
            "gbsv",
            T::gbsv(n, l, u, nrhs, &mut a2, ldab, &mut ipiv, bw.as_mut_slice()),
        )
    };
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine,
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

/// Solve `A x = b` for a Hermitian positive-definite band matrix in
/// one-sided compact storage.
///
/// `ab` has `u + 1` rows covering the declared triangle's diagonals. With a
/// single off-diagonal the dedicated positive-definite tridiagonal kernel is
/// used; wider bands go through banded Cholesky. A failed factorization
/// reports [`Error::NotPositiveDefinite`] with the 1-indexed leading minor,
/// distinct from generic singularity.
pub fn solveh_banded<'a, T, B>(
    ab: impl Into<Operand<'a, T>>,
    b: B,
    opts: &HermitianBandedOptions,
) -> Result<B::Out, Error>
where
    T: Lapack,
    B: Rhs<T>,
{
    let ab = ab.into();
    let n = ab.ncols();
    let rows = ab.nrows();
    if rows == 0 {
        return Err(Error::shape("band storage must have at least one row"));
    }
    if b.nrows() != n {
        return Err(Error::shape(format!(
            "right-hand side has {} rows, band matrix has order {}",
            b.nrows(),
            n,
        )));
    }
    let nrhs = b.ncols();
    let mut abw = ab.into_working(opts.check_finite)?;
    let mut bw = b.into_working(opts.check_finite)?;

    let (routine, info) = if rows == 2 {
        debug!("solveh_banded: tridiagonal path, n={n}, nrhs={nrhs}");
        // main diagonal is real by symmetry
        let (mut d, mut e): (Vec<f64>, Vec<T>) = if opts.lower {
            (
                (0..n).map(|j| abw[(0, j)].re()).collect(),
                (0..n.saturating_sub(1)).map(|j| abw[(1, j)]).collect(),
            )
        } else {
            (
                (0..n).map(|j| abw[(1, j)].re()).collect(),
                (1..n).map(|j| abw[(0, j)].conj()).collect(),
            )
        };
        (
            "ptsv",
            T::ptsv(n, nrhs, &mut d, &mut e, bw.as_mut_slice()),
        )
    } else {
        let kd = rows - 1;
        let uplo = if opts.lower { b'L' } else { b'U' };
        debug!(
            "solveh_banded: cholesky path, n={n}, kd={kd}, nrhs={nrhs}, uplo={}",
            uplo as char,
        );
        (
            "pbsv",
            T::pbsv(uplo, n, kd, nrhs, abw.as_mut_slice(), rows, bw.as_mut_slice()),
        )
    };
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine,
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::NotPositiveDefinite {
            minor: info as usize,
        });
    }
    Ok(B::assemble(bw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Matrix, Vector};
    use crate::solve::{solve, SolveOptions};

    const TOL: f64 = 1e-10;

    /// Expand `(l, u)` compact storage back to the dense matrix.
    fn dense_from_banded(l: usize, u: usize, ab: &Matrix<f64>) -> Matrix<f64> {
        let n = ab.ncols();
        Matrix::from_fn(n, n, |i, j| {
            if i + u >= j && j + l >= i && u + i - j < ab.nrows() {
                ab[(u + i - j, j)]
            } else {
                0.0
            }
        })
    }

    #[test]
    fn tridiagonal_matches_dense() {
        let ab = Matrix::from_rows(
            3,
            4,
            &[
                0.0_f64, 1.0, 0.5, 2.0, //
                4.0, 5.0, 6.0, 7.0, //
                1.0, 2.0, 3.0, 0.0,
            ],
        );
        let b = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let x = solve_banded((1, 1), &ab, &b, &BandedOptions::default()).unwrap();
        let dense = dense_from_banded(1, 1, &ab);
        let y = solve(&dense, &b, &SolveOptions::default()).unwrap();
        for i in 0..4 {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn general_band_matches_dense() {
        // l = 2, u = 1, n = 5
        let ab = Matrix::from_rows(
            4,
            5,
            &[
                0.0_f64, 1.0, -0.5, 2.0, 1.5, //
                5.0, 6.0, 7.0, 8.0, 9.0, //
                2.0, 2.0, 2.0, 2.0, 0.0, //
                1.0, 1.0, 1.0, 0.0, 0.0,
            ],
        );
        let b = Vector::from_slice(&[1.0, -1.0, 2.0, -2.0, 3.0]);
        let x = solve_banded((2, 1), &ab, &b, &BandedOptions::default()).unwrap();
        let dense = dense_from_banded(2, 1, &ab);
        let y = solve(&dense, &b, &SolveOptions::default()).unwrap();
        for i in 0..5 {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn wide_band_through_general_path() {
        // l = u = 2 avoids the tridiagonal fast path even though it is
        // diagonally dominant
        let n = 6;
        let ab = Matrix::from_fn(5, n, |i, j| {
            let row = j as isize + i as isize - 2;
            if i == 2 {
                10.0
            } else if row < 0 || row >= n as isize {
                0.0
            } else {
                1.0
            }
        });
        let b = Vector::from_slice(&[1.0; 6]);
        let x = solve_banded((2, 2), &ab, &b, &BandedOptions::default()).unwrap();
        let dense = dense_from_banded(2, 2, &ab);
        let y = solve(&dense, &b, &SolveOptions::default()).unwrap();
        for i in 0..n {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn band_shape_mismatch() {
        let ab = Matrix::<f64>::zeros(3, 4);
        let b = Vector::from_slice(&[1.0; 4]);
        let err = solve_banded((2, 2), &ab, &b, &BandedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }

    #[test]
    fn hermitian_tridiagonal_matches_spd_solve() {
        // upper one-sided storage of [[2,-1,0],[-1,2,-1],[0,-1,2]]
        let ab = Matrix::from_rows(2, 3, &[0.0_f64, -1.0, -1.0, 2.0, 2.0, 2.0]);
        let b = Vector::from_slice(&[1.0, 0.0, 1.0]);
        let x = solveh_banded(&ab, &b, &HermitianBandedOptions::default()).unwrap();
        let dense = Matrix::from_rows(
            3,
            3,
            &[2.0_f64, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0],
        );
        let opts = SolveOptions {
            assume_spd: true,
            ..Default::default()
        };
        let y = solve(&dense, &b, &opts).unwrap();
        for i in 0..3 {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn hermitian_lower_form_agrees_with_upper() {
        let upper = Matrix::from_rows(2, 3, &[0.0_f64, -1.0, -1.0, 2.0, 2.0, 2.0]);
        let lower = Matrix::from_rows(2, 3, &[2.0_f64, 2.0, 2.0, -1.0, -1.0, 0.0]);
        let b = Vector::from_slice(&[1.0, 2.0, 3.0]);
        let xu = solveh_banded(&upper, &b, &HermitianBandedOptions::default()).unwrap();
        let opts = HermitianBandedOptions {
            lower: true,
            ..Default::default()
        };
        let xl = solveh_banded(&lower, &b, &opts).unwrap();
        for i in 0..3 {
            assert!((xu[i] - xl[i]).abs() < TOL);
        }
    }

    #[test]
    fn hermitian_wide_band_matches_spd_solve() {
        // pentadiagonal SPD: 6 on the diagonal, -1 on the first two
        // superdiagonals; upper storage rows are (second super, first super,
        // main)
        let n = 5;
        let ab = Matrix::from_fn(3, n, |i, j| match i {
            2 => 6.0,
            1 if j >= 1 => -1.0,
            0 if j >= 2 => -1.0,
            _ => 0.0,
        });
        let b = Vector::from_slice(&[1.0; 5]);
        let x = solveh_banded(&ab, &b, &HermitianBandedOptions::default()).unwrap();
        let dense = Matrix::from_fn(n, n, |i, j| {
            let d = i.abs_diff(j);
            match d {
                0 => 6.0,
                1 | 2 => -1.0,
                _ => 0.0,
            }
        });
        let opts = SolveOptions {
            assume_spd: true,
            ..Default::default()
        };
        let y = solve(&dense, &b, &opts).unwrap();
        for i in 0..n {
            assert!((x[i] - y[i]).abs() < TOL);
        }
    }

    #[test]
    fn hermitian_not_positive_definite() {
        // [[1,2],[2,1]] has a negative eigenvalue
        let ab = Matrix::from_rows(2, 2, &[0.0_f64, 2.0, 1.0, 1.0]);
        let b = Vector::from_slice(&[1.0, 1.0]);
        let err = solveh_banded(&ab, &b, &HermitianBandedOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotPositiveDefinite { minor: 2 }));
    }
}
