//! Moore–Penrose pseudoinverses: least-squares, SVD, and Hermitian
//! eigendecomposition paths.
//!
//! All three share one numerical-rank policy: spectrum entries at or below
//! `cutoff * max(spectrum)` are discarded, with the relative `cutoff`
//! defaulting to `1e6 * ε` for double precision. Each returns the
//! pseudoinverse together with the effective rank it kept.

use log::debug;

use crate::error::Error;
use crate::kernel::Lapack;
use crate::lstsq::{lstsq, LstsqDriver, LstsqOptions};
use crate::matrix::Matrix;
use crate::operand::Operand;
use crate::traits::LinalgScalar;

/// Default relative spectrum cutoff for double precision.
const DEFAULT_CUTOFF: f64 = 1e6 * f64::EPSILON;

/// Pseudoinverse via least squares: solve `A X = I`.
///
/// Delegates rank handling to the divide-and-conquer SVD driver of
/// [`lstsq`], so the result matches [`pinv_svd`] up to rounding.
///
/// # Examples
///
/// ```
/// use densolve::{pinv, Matrix};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let (b, rank) = pinv(&a, None, true).unwrap();
/// assert_eq!(rank, 2);
/// let prod = &a * &b;
/// assert!((prod[(0, 0)] - 1.0).abs() < 1e-10);
/// assert!(prod[(0, 1)].abs() < 1e-10);
/// ```
pub fn pinv<'a, T: Lapack>(
    a: impl Into<Operand<'a, T>>,
    cutoff: Option<f64>,
    check_finite: bool,
) -> Result<(Matrix<T>, usize), Error> {
    let a = a.into();
    let m = a.nrows();
    let opts = LstsqOptions {
        cutoff: Some(cutoff.unwrap_or(DEFAULT_CUTOFF)),
        driver: LstsqDriver::DivideAndConquerSvd,
        check_finite,
    };
    let fit = lstsq(a, Matrix::<T>::eye(m), &opts)?;
    Ok((fit.x, fit.rank))
}

/// Pseudoinverse via thin SVD: `B = V_r diag(1/s_r) U_rᴴ` over the singular
/// values above the cutoff.
pub fn pinv_svd<'a, T: Lapack>(
    a: impl Into<Operand<'a, T>>,
    cutoff: Option<f64>,
    check_finite: bool,
) -> Result<(Matrix<T>, usize), Error> {
    let a = a.into();
    let (m, n) = (a.nrows(), a.ncols());
    let k = m.min(n);
    let mut aw = a.into_working(check_finite)?;

    let mut s = vec![0.0_f64; k.max(1)];
    let mut u = vec![T::zero(); (m * k).max(1)];
    let mut vt = vec![T::zero(); (k * n).max(1)];
    let info = T::gesdd_thin(m, n, aw.as_mut_slice(), &mut s, &mut u, &mut vt);
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "gesdd",
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::ConvergenceFailure);
    }

    let cut = cutoff.unwrap_or(DEFAULT_CUTOFF) * s.first().copied().unwrap_or(0.0);
    let rank = s.iter().take(k).filter(|&&v| v > cut).count();
    debug!("pinv_svd: {m}x{n}, rank={rank} of {k}");

    // B[i, j] = sum_t conj(vt[t, i]) / s_t * conj(u[j, t])
    let mut b = Matrix::zeros(n, m);
    for t in 0..rank {
        let inv_s = T::from_real(1.0 / s[t]);
        for j in 0..m {
            let uc = u[t * m + j].conj() * inv_s;
            for i in 0..n {
                b[(i, j)] = b[(i, j)] + vt[i * k + t].conj() * uc;
            }
        }
    }
    Ok((b, rank))
}

/// Pseudoinverse of a Hermitian matrix via eigendecomposition.
///
/// Reads only the declared triangle. Eigenvalues with `|λ|` at or below the
/// cutoff are discarded, so the result is exact on the retained eigenspace
/// even for indefinite matrices.
pub fn pinvh<'a, T: Lapack>(
    a: impl Into<Operand<'a, T>>,
    cutoff: Option<f64>,
    lower: bool,
    check_finite: bool,
) -> Result<(Matrix<T>, usize), Error> {
    let a = a.into();
    if !a.matrix().is_square() {
        return Err(Error::shape(format!(
            "expected a square matrix, got {}x{}",
            a.nrows(),
            a.ncols(),
        )));
    }
    let n = a.nrows();
    let mut aw = a.into_working(check_finite)?;

    let uplo = if lower { b'L' } else { b'U' };
    let mut w = vec![0.0_f64; n.max(1)];
    let info = T::heevd(uplo, n, aw.as_mut_slice(), &mut w);
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "heevd",
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::ConvergenceFailure);
    }

    let max_abs = w.iter().fold(0.0_f64, |acc, &v| acc.max(v.abs()));
    let cut = cutoff.unwrap_or(DEFAULT_CUTOFF) * max_abs;
    let kept: Vec<usize> = (0..n).filter(|&t| w[t].abs() > cut).collect();
    let rank = kept.len();
    debug!("pinvh: n={n}, rank={rank}, uplo={}", uplo as char);

    // B[i, j] = sum_t q[i, t] / λ_t * conj(q[j, t]); aw now holds the
    // eigenvectors column-wise
    let q = aw.as_slice();
    let mut b = Matrix::zeros(n, n);
    for &t in &kept {
        let inv_w = T::from_real(1.0 / w[t]);
        for j in 0..n {
            let qc = q[t * n + j].conj() * inv_w;
            for i in 0..n {
                b[(i, j)] = b[(i, j)] + q[t * n + i] * qc;
            }
        }
    }
    Ok((b, rank))
}
