//! Matrix inverse and determinant via LU factorization.

use log::debug;

use crate::error::Error;
use crate::kernel::{det_from_factors, Lapack};
use crate::matrix::Matrix;
use crate::operand::Operand;

/// Invert a square matrix.
///
/// Factors with partial pivoting, then back-substitutes into the identity.
/// Passing `a` by value lets the factorization consume its storage.
///
/// # Examples
///
/// ```
/// use densolve::{inv, Matrix};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let ai = inv(&a, true).unwrap();
/// assert!((ai[(0, 0)] + 2.0).abs() < 1e-12);
/// assert!((ai[(0, 1)] - 1.0).abs() < 1e-12);
/// assert!((ai[(1, 0)] - 1.5).abs() < 1e-12);
/// assert!((ai[(1, 1)] + 0.5).abs() < 1e-12);
/// ```
pub fn inv<'a, T: Lapack>(
    a: impl Into<Operand<'a, T>>,
    check_finite: bool,
) -> Result<Matrix<T>, Error> {
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

    let mut ipiv = vec![0_i32; n.max(1)];
    let info = T::getrf(n, n, aw.as_mut_slice(), &mut ipiv);
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "getrf",
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::Singular {
            diagonal: Some(info as usize - 1),
        });
    }

    let (lwork, qinfo) = T::getri_lwork(n, aw.as_mut_slice(), &ipiv);
    if qinfo < 0 {
        return Err(Error::InvalidArgument {
            routine: "getri",
            arg: -qinfo as usize,
        });
    }
    // some providers under-report the optimal size; pad by 1%
    let lwork = (lwork as f64 * 1.01) as usize + 1;
    debug!("inv: n={n}, lwork={lwork}");
    let info = T::getri(n, aw.as_mut_slice(), &ipiv, lwork);
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "getri",
            arg: -info as usize,
        });
    }
    if info > 0 {
        return Err(Error::Singular {
            diagonal: Some(info as usize - 1),
        });
    }
    Ok(aw)
}

/// Determinant of a square matrix.
///
/// A singular matrix is not an error here: the factorization leaves an exact
/// zero on the diagonal and the determinant is 0.
///
/// # Examples
///
/// ```
/// use densolve::{det, Matrix};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// assert!((det(&a, true).unwrap() + 2.0).abs() < 1e-12);
/// ```
pub fn det<'a, T: Lapack>(
    a: impl Into<Operand<'a, T>>,
    check_finite: bool,
) -> Result<T, Error> {
    let a = a.into();
    if !a.matrix().is_square() {
        return Err(Error::shape(format!(
            "expected a square matrix, got {}x{}",
            a.nrows(),
            a.ncols(),
        )));
    }
    let n = a.nrows();
    if n == 0 {
        return Ok(T::one());
    }
    let mut aw = a.into_working(check_finite)?;

    let mut ipiv = vec![0_i32; n];
    let info = T::getrf(n, n, aw.as_mut_slice(), &mut ipiv);
    if info < 0 {
        return Err(Error::InvalidArgument {
            routine: "getrf",
            arg: -info as usize,
        });
    }
    // info > 0 means an exact zero pivot: the diagonal product below is 0
    Ok(det_from_factors(&aw, &ipiv))
}
