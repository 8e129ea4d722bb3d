//! Least-squares solver over the three kernel drivers.

use log::debug;

use crate::error::Error;
use crate::kernel::Lapack;
use crate::matrix::Matrix;
use crate::operand::{Operand, Rhs};
use crate::traits::LinalgScalar;

/// Kernel driver used by [`lstsq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LstsqDriver {
    /// SVD, divide-and-conquer (`gelsd`): the fastest SVD driver and the
    /// default.
    DivideAndConquerSvd,
    /// Complete orthogonal factorization with column pivoting (`gelsy`).
    PivotedQr,
    /// Classic SVD (`gelss`); slower than divide-and-conquer, kept for
    /// cross-checking.
    Svd,
}

/// Options for [`lstsq`].
#[derive(Debug, Clone)]
pub struct LstsqOptions {
    /// Relative cutoff for the numerical rank: spectrum entries below
    /// `cutoff * max` are treated as zero. `None` uses the kernel's
    /// machine-precision default.
    pub cutoff: Option<f64>,
    /// Which kernel driver to run.
    pub driver: LstsqDriver,
    /// Validate inputs for NaN/Inf.
    pub check_finite: bool,
}

impl Default for LstsqOptions {
    fn default() -> Self {
        Self {
            cutoff: None,
            driver: LstsqDriver::DivideAndConquerSvd,
            check_finite: true,
        }
    }
}

/// Result of [`lstsq`].
#[derive(Debug, Clone)]
pub struct Lstsq<X> {
    /// Least-squares solution (minimum-norm when the system is
    /// underdetermined or rank-deficient), shaped like the right-hand side.
    pub x: X,
    /// Per-column sums of squared residual magnitudes. Populated only for a
    /// full-rank overdetermined system; empty otherwise, because the
    /// residual is then identically zero or not meaningful.
    pub residuals: Vec<f64>,
    /// Effective numerical rank of the coefficient matrix.
    pub rank: usize,
    /// Singular values, descending.
    pub singular_values: Vec<f64>,
}

/// Solve `min ||A x - b||` for a general `m x n` matrix.
///
/// Every driver reports the solution, the effective rank, and the singular
/// values; the pivoted-QR kernel produces no spectrum of its own, so that
/// path computes the singular values with a separate values-only SVD.
///
/// # Examples
///
/// ```
/// use densolve::{lstsq, LstsqOptions, Matrix, Vector};
///
/// // fit y = c0 + c1 t through (0,1), (1,3), (2,5), (3,7)
/// let a = Matrix::from_rows(4, 2, &[
///     1.0_f64, 0.0,
///     1.0, 1.0,
///     1.0, 2.0,
///     1.0, 3.0,
/// ]);
/// let b = Vector::from_slice(&[1.0, 3.0, 5.0, 7.0]);
/// let fit = lstsq(&a, &b, &LstsqOptions::default()).unwrap();
/// assert_eq!(fit.rank, 2);
/// assert!((fit.x[0] - 1.0).abs() < 1e-10);
/// assert!((fit.x[1] - 2.0).abs() < 1e-10);
/// ```
pub fn lstsq<'a, T, B>(
    a: impl Into<Operand<'a, T>>,
    b: B,
    opts: &LstsqOptions,
) -> Result<Lstsq<B::Out>, Error>
where
    T: Lapack,
    B: Rhs<T>,
{
    let a = a.into();
    let (m, n) = (a.nrows(), a.ncols());
    if b.nrows() != m {
        return Err(Error::shape(format!(
            "right-hand side has {} rows, coefficient matrix has {}",
            b.nrows(),
            m,
        )));
    }
    let nrhs = b.ncols();
    let k = m.min(n);
    let ldb = m.max(n);
    let mut aw = a.into_working(opts.check_finite)?;
    let bw = b.into_working(opts.check_finite)?;

    // the kernel writes the n-row solution over the m-row rhs in place, so
    // the working buffer is always max(m, n) tall
    let mut bpad = Matrix::zeros(ldb, nrhs);
    for j in 0..nrhs {
        for i in 0..m {
            bpad[(i, j)] = bw[(i, j)];
        }
    }

    let rcond = opts.cutoff.unwrap_or(-1.0);
    let mut s = vec![0.0_f64; k.max(1)];
    debug!(
        "lstsq: {m}x{n}, nrhs={nrhs}, driver={:?}, rcond={rcond}",
        opts.driver,
    );
    let (routine, rank, info) = match opts.driver {
        LstsqDriver::DivideAndConquerSvd => {
            let (rank, info) = T::gelsd(
                m,
                n,
                nrhs,
                aw.as_mut_slice(),
                bpad.as_mut_slice(),
                &mut s,
                rcond,
            );
            ("gelsd", rank, info)
        }
        LstsqDriver::Svd => {
            let (rank, info) = T::gelss(
                m,
                n,
                nrhs,
                aw.as_mut_slice(),
                bpad.as_mut_slice(),
                &mut s,
                rcond,
            );
            ("gelss", rank, info)
        }
        LstsqDriver::PivotedQr => {
            // gelsy destroys its input and reports no spectrum
            let mut a_copy = aw.clone();
            let (rank, info) = T::gelsy(
                m,
                n,
                nrhs,
                aw.as_mut_slice(),
                bpad.as_mut_slice(),
                rcond,
            );
            if info == 0 {
                let sinfo = T::gesdd_values(m, n, a_copy.as_mut_slice(), &mut s);
                if sinfo != 0 {
                    return Err(status_error("gesdd", sinfo));
                }
            }
            ("gelsy", rank, info)
        }
    };
    if info != 0 {
        return Err(status_error(routine, info));
    }
    let rank = rank as usize;

    let residuals = if n < m && rank == n {
        (0..nrhs)
            .map(|j| {
                (n..m)
                    .map(|i| {
                        let v = bpad[(i, j)].modulus();
                        v * v
                    })
                    .sum()
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut x = Matrix::zeros(n, nrhs);
    for j in 0..nrhs {
        for i in 0..n {
            x[(i, j)] = bpad[(i, j)];
        }
    }
    Ok(Lstsq {
        x: B::assemble(x),
        residuals,
        rank,
        singular_values: s,
    })
}

fn status_error(routine: &'static str, info: i32) -> Error {
    if info < 0 {
        Error::InvalidArgument {
            routine,
            arg: -info as usize,
        }
    } else {
        Error::ConvergenceFailure
    }
}
