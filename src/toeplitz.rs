//! Toeplitz solver via the Levinson–Durbin recursion.
//!
//! The only solver with no kernel dependency: a Toeplitz system is fully
//! described by its first column `c` and first row `r`, and the recursion
//! solves it in O(n²) by growing forward/backward prediction vectors one
//! order at a time. There is no pivoting and no condition estimate: rounding
//! errors amplify on ill-conditioned generators, and only an exactly
//! singular principal minor is detected.

use log::debug;

use crate::error::Error;
use crate::matrix::Matrix;
use crate::operand::{check_finite_slice, Rhs};
use crate::traits::LinalgScalar;

/// Solve `T x = b` where `T` is the Toeplitz matrix with first column `c`
/// and first row `r`.
///
/// `r` defaults to `conj(c)` (the Hermitian case). `r[0]` is ignored; the
/// diagonal always comes from `c[0]`. Both generators must have the same
/// length as the right-hand side.
///
/// An exactly singular leading principal minor stops the recursion with
/// [`Error::Singular`] carrying the failing order.
///
/// # Examples
///
/// ```
/// use densolve::{solve_toeplitz, Vector};
///
/// // T = [[1,-1],[2,1]]
/// let c = [1.0_f64, 2.0];
/// let r = [1.0, -1.0];
/// let b = Vector::from_slice(&[3.0, 3.0]);
/// let x = solve_toeplitz(&c, Some(&r), &b, true).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-12);
/// assert!((x[1] + 1.0).abs() < 1e-12);
/// ```
pub fn solve_toeplitz<T, B>(
    c: &[T],
    r: Option<&[T]>,
    b: B,
    check_finite: bool,
) -> Result<B::Out, Error>
where
    T: LinalgScalar,
    B: Rhs<T>,
{
    let n = b.nrows();
    if c.len() != n {
        return Err(Error::shape(format!(
            "first column has length {}, right-hand side has {} rows",
            c.len(),
            n,
        )));
    }
    let r_owned: Vec<T>;
    let r: &[T] = match r {
        Some(r) => r,
        None => {
            r_owned = c.iter().map(|&x| x.conj()).collect();
            &r_owned
        }
    };
    if r.len() != n {
        return Err(Error::shape(format!(
            "first row has length {}, expected {}",
            r.len(),
            n,
        )));
    }
    check_finite_slice(c, check_finite)?;
    check_finite_slice(r, check_finite)?;
    let bw = b.into_working(check_finite)?;
    if n == 0 {
        return Ok(B::assemble(bw));
    }

    // diagonal band vals[n-1 + k] = T[i, j] for k = i - j; r[0] unused
    let mut vals: Vec<T> = r[1..].iter().rev().copied().collect();
    vals.extend_from_slice(c);
    let t = |k: isize| vals[(n as isize - 1 + k) as usize];

    debug!("solve_toeplitz: n={n}, nrhs={}", bw.ncols());
    let nrhs = bw.ncols();
    let mut out = Matrix::zeros(n, nrhs);
    for col in 0..nrhs {
        let rhs: Vec<T> = (0..n).map(|i| bw[(i, col)]).collect();
        let x = levinson(&t, &rhs)?;
        for i in 0..n {
            out[(i, col)] = x[i];
        }
    }
    Ok(B::assemble(out))
}

/// One right-hand side of the Levinson–Durbin recursion.
///
/// Maintains the order-`m` forward vector `f` (`T_m f = e_1`), backward
/// vector `g` (`T_m g = e_m`), and partial solution `x`, extending each by
/// one order per step.
fn levinson<T: LinalgScalar>(t: &impl Fn(isize) -> T, b: &[T]) -> Result<Vec<T>, Error> {
    let n = b.len();
    let t0 = t(0);
    if t0 == T::zero() {
        return Err(Error::Singular { diagonal: Some(0) });
    }
    let mut f = vec![T::one() / t0];
    let mut g = f.clone();
    let mut x = vec![b[0] * f[0]];

    for m in 1..n {
        // prediction errors of the order-m vectors against row/column m
        let mut theta_f = T::zero();
        let mut theta_b = T::zero();
        let mut theta_x = T::zero();
        for j in 0..m {
            theta_f = theta_f + t((m - j) as isize) * f[j];
            theta_b = theta_b + t(-(j as isize + 1)) * g[j];
            theta_x = theta_x + t((m - j) as isize) * x[j];
        }
        let denom = T::one() - theta_f * theta_b;
        if denom == T::zero() {
            return Err(Error::Singular { diagonal: Some(m) });
        }
        let scale = T::one() / denom;

        let mut f_next = Vec::with_capacity(m + 1);
        let mut g_next = Vec::with_capacity(m + 1);
        f_next.push(f[0] * scale);
        g_next.push((T::zero() - theta_b * f[0]) * scale);
        for j in 1..m {
            f_next.push((f[j] - theta_f * g[j - 1]) * scale);
            g_next.push((g[j - 1] - theta_b * f[j]) * scale);
        }
        f_next.push((T::zero() - theta_f * g[m - 1]) * scale);
        g_next.push(g[m - 1] * scale);

        let mu = b[m] - theta_x;
        x.push(T::zero());
        for j in 0..=m {
            x[j] = x[j] + mu * g_next[j];
        }
        f = f_next;
        g = g_next;
    }
    Ok(x)
}
