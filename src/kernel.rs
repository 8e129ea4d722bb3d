//! The external kernel contract.
//!
//! Everything below the dispatch layer is LAPACK: this module pins the narrow
//! surface the solvers consume. Column-major buffers in, auxiliary outputs
//! (pivots, singular values, eigenvalues, rank) out, and the raw integer
//! status code returned untouched. `0` is success; `> 0` is a structural
//! failure (singular pivot, failed leading minor, non-convergence) whose
//! value identifies the offending index where applicable; `< 0` flags an
//! illegal value in the argument at position `-status`.
//!
//! The [`Lapack`] trait pairs each contract method with the d/z routine
//! family for its scalar, so the policy layer stays generic over `f64` and
//! `Complex<f64>`. Workspace-size queries (the `lwork = -1` protocol) and the
//! real/complex bookkeeping differences (`rwork` arrays, real-valued
//! tridiagonal data, real spectra) are absorbed here.

use lapack::c64;

use crate::matrix::Matrix;
use crate::traits::LinalgScalar;

/// Kernel routines for one element type.
///
/// Implemented for `f64` (LAPACK `d` routines) and `Complex<f64>` (`z`
/// routines). All matrix slices are column-major with the leading dimension
/// equal to the row count unless a parameter says otherwise.
pub trait Lapack: LinalgScalar<Real = f64> {
    /// General solve via LU with partial pivoting (`gesv`): `a` is `n x n`
    /// and overwritten with the factors, `b` is `n x nrhs` and overwritten
    /// with the solution.
    fn gesv(n: usize, nrhs: usize, a: &mut [Self], ipiv: &mut [i32], b: &mut [Self]) -> i32;

    /// Symmetric/Hermitian positive-definite solve via Cholesky (`posv`) on
    /// the `uplo` triangle (`b'U'` or `b'L'`).
    fn posv(uplo: u8, n: usize, nrhs: usize, a: &mut [Self], b: &mut [Self]) -> i32;

    /// Triangular solve by back-substitution (`trtrs`); `a` is read-only.
    /// `trans` is `b'N'`, `b'T'`, or `b'C'`; `diag` is `b'N'` or `b'U'`
    /// (unit diagonal, never read).
    fn trtrs(
        uplo: u8,
        trans: u8,
        diag: u8,
        n: usize,
        nrhs: usize,
        a: &[Self],
        b: &mut [Self],
    ) -> i32;

    /// Banded solve via banded LU with partial pivoting (`gbsv`). `ab` is
    /// `ldab x n` compact storage with `ldab = 2*kl + ku + 1`; the extra `kl`
    /// rows are fill-in headroom the kernel requires.
    fn gbsv(
        n: usize,
        kl: usize,
        ku: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        ipiv: &mut [i32],
        b: &mut [Self],
    ) -> i32;

    /// General tridiagonal solve (`gtsv`); the three diagonals are
    /// overwritten.
    fn gtsv(
        n: usize,
        nrhs: usize,
        dl: &mut [Self],
        d: &mut [Self],
        du: &mut [Self],
        b: &mut [Self],
    ) -> i32;

    /// Positive-definite tridiagonal solve (`ptsv`); the main diagonal is
    /// real-valued by symmetry.
    fn ptsv(n: usize, nrhs: usize, d: &mut [f64], e: &mut [Self], b: &mut [Self]) -> i32;

    /// Hermitian positive-definite banded solve via Cholesky (`pbsv`); `ab`
    /// is one-sided `(kd + 1) x n` storage.
    fn pbsv(
        uplo: u8,
        n: usize,
        kd: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        b: &mut [Self],
    ) -> i32;

    /// LU factorization with partial pivoting (`getrf`); `ipiv` receives
    /// 1-based pivot indices.
    fn getrf(m: usize, n: usize, a: &mut [Self], ipiv: &mut [i32]) -> i32;

    /// Workspace-size query for [`getri`](Lapack::getri): returns the
    /// optimal `lwork` and the query's status code.
    fn getri_lwork(n: usize, a: &mut [Self], ipiv: &[i32]) -> (usize, i32);

    /// Matrix inversion from LU factors (`getri`).
    fn getri(n: usize, a: &mut [Self], ipiv: &[i32], lwork: usize) -> i32;

    /// Least squares via SVD, divide-and-conquer (`gelsd`). `b` has
    /// `max(m, n)` rows; returns `(rank, status)`. `s` receives the
    /// `min(m, n)` singular values.
    fn gelsd(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32);

    /// Least squares via complete orthogonal factorization with column
    /// pivoting (`gelsy`). Produces a rank but no singular values.
    fn gelsy(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        rcond: f64,
    ) -> (i32, i32);

    /// Least squares via classic SVD (`gelss`).
    fn gelss(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32);

    /// Thin SVD, divide-and-conquer (`gesdd`, job `S`): `u` is
    /// `m x min(m,n)`, `vt` is `min(m,n) x n`, `s` is `min(m,n)` descending.
    fn gesdd_thin(
        m: usize,
        n: usize,
        a: &mut [Self],
        s: &mut [f64],
        u: &mut [Self],
        vt: &mut [Self],
    ) -> i32;

    /// Singular values only (`gesdd`, job `N`).
    fn gesdd_values(m: usize, n: usize, a: &mut [Self], s: &mut [f64]) -> i32;

    /// Hermitian eigendecomposition (`heevd`/`syevd`, job `V`): `a` is
    /// overwritten with the eigenvectors, `w` receives the real eigenvalues
    /// ascending.
    fn heevd(uplo: u8, n: usize, a: &mut [Self], w: &mut [f64]) -> i32;
}

/// Determinant from LU factors: diagonal product times permutation parity.
///
/// Lives on the kernel side of the contract so no sign-tracking logic leaks
/// into the policy layer. `ipiv` is 1-based as returned by
/// [`getrf`](Lapack::getrf).
pub(crate) fn det_from_factors<T: LinalgScalar>(lu: &Matrix<T>, ipiv: &[i32]) -> T {
    let n = lu.nrows();
    let mut d = T::one();
    for i in 0..n {
        d = d * lu[(i, i)];
        if ipiv[i] != i as i32 + 1 {
            d = T::zero() - d;
        }
    }
    d
}

impl Lapack for f64 {
    fn gesv(n: usize, nrhs: usize, a: &mut [Self], ipiv: &mut [i32], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dgesv(
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                ipiv,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn posv(uplo: u8, n: usize, nrhs: usize, a: &mut [Self], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dposv(
                uplo,
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn trtrs(
        uplo: u8,
        trans: u8,
        diag: u8,
        n: usize,
        nrhs: usize,
        a: &[Self],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dtrtrs(
                uplo,
                trans,
                diag,
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gbsv(
        n: usize,
        kl: usize,
        ku: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        ipiv: &mut [i32],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dgbsv(
                n as i32,
                kl as i32,
                ku as i32,
                nrhs as i32,
                ab,
                ldab as i32,
                ipiv,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gtsv(
        n: usize,
        nrhs: usize,
        dl: &mut [Self],
        d: &mut [Self],
        du: &mut [Self],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dgtsv(
                n as i32,
                nrhs as i32,
                dl,
                d,
                du,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn ptsv(n: usize, nrhs: usize, d: &mut [f64], e: &mut [Self], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dptsv(n as i32, nrhs as i32, d, e, b, n.max(1) as i32, &mut info);
        }
        info
    }

    fn pbsv(
        uplo: u8,
        n: usize,
        kd: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dpbsv(
                uplo,
                n as i32,
                kd as i32,
                nrhs as i32,
                ab,
                ldab as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn getrf(m: usize, n: usize, a: &mut [Self], ipiv: &mut [i32]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::dgetrf(m as i32, n as i32, a, m.max(1) as i32, ipiv, &mut info);
        }
        info
    }

    fn getri_lwork(n: usize, a: &mut [Self], ipiv: &[i32]) -> (usize, i32) {
        let mut info = 0;
        let mut work = [0.0];
        unsafe {
            lapack::dgetri(n as i32, a, n.max(1) as i32, ipiv, &mut work, -1, &mut info);
        }
        (work[0] as usize, info)
    }

    fn getri(n: usize, a: &mut [Self], ipiv: &[i32], lwork: usize) -> i32 {
        let mut info = 0;
        let mut work = vec![0.0; lwork.max(1)];
        unsafe {
            lapack::dgetri(
                n as i32,
                a,
                n.max(1) as i32,
                ipiv,
                &mut work,
                lwork.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gelsd(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut rank = 0;
        let mut info = 0;
        // workspace query
        let mut work = [0.0];
        let mut iwork_query = [0];
        unsafe {
            lapack::dgelsd(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut iwork_query,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        let mut iwork = vec![0; (iwork_query[0] as usize).max(1)];
        unsafe {
            lapack::dgelsd(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut iwork,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gelsy(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut jpvt = vec![0; n.max(1)];
        let mut rank = 0;
        let mut info = 0;
        let mut work = [0.0];
        unsafe {
            lapack::dgelsy(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                &mut jpvt,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        unsafe {
            lapack::dgelsy(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                &mut jpvt,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gelss(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut rank = 0;
        let mut info = 0;
        let mut work = [0.0];
        unsafe {
            lapack::dgelss(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        unsafe {
            lapack::dgelss(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gesdd_thin(
        m: usize,
        n: usize,
        a: &mut [Self],
        s: &mut [f64],
        u: &mut [Self],
        vt: &mut [Self],
    ) -> i32 {
        let k = m.min(n);
        let mut info = 0;
        let mut iwork = vec![0; (8 * k).max(1)];
        let mut work = [0.0];
        unsafe {
            lapack::dgesdd(
                b'S',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                u,
                m.max(1) as i32,
                vt,
                k.max(1) as i32,
                &mut work,
                -1,
                &mut iwork,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        unsafe {
            lapack::dgesdd(
                b'S',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                u,
                m.max(1) as i32,
                vt,
                k.max(1) as i32,
                &mut work,
                lwork as i32,
                &mut iwork,
                &mut info,
            );
        }
        info
    }

    fn gesdd_values(m: usize, n: usize, a: &mut [Self], s: &mut [f64]) -> i32 {
        let k = m.min(n);
        let mut info = 0;
        let mut iwork = vec![0; (8 * k).max(1)];
        let mut u = [0.0];
        let mut vt = [0.0];
        let mut work = [0.0];
        unsafe {
            lapack::dgesdd(
                b'N',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                &mut u,
                1,
                &mut vt,
                1,
                &mut work,
                -1,
                &mut iwork,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        unsafe {
            lapack::dgesdd(
                b'N',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                &mut u,
                1,
                &mut vt,
                1,
                &mut work,
                lwork as i32,
                &mut iwork,
                &mut info,
            );
        }
        info
    }

    fn heevd(uplo: u8, n: usize, a: &mut [Self], w: &mut [f64]) -> i32 {
        let mut info = 0;
        let mut work = [0.0];
        let mut iwork_query = [0];
        unsafe {
            lapack::dsyevd(
                b'V',
                uplo,
                n as i32,
                a,
                n.max(1) as i32,
                w,
                &mut work,
                -1,
                &mut iwork_query,
                -1,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0] as usize;
        let liwork = iwork_query[0] as usize;
        let mut work = vec![0.0; lwork.max(1)];
        let mut iwork = vec![0; liwork.max(1)];
        unsafe {
            lapack::dsyevd(
                b'V',
                uplo,
                n as i32,
                a,
                n.max(1) as i32,
                w,
                &mut work,
                lwork as i32,
                &mut iwork,
                liwork as i32,
                &mut info,
            );
        }
        info
    }
}

impl Lapack for c64 {
    fn gesv(n: usize, nrhs: usize, a: &mut [Self], ipiv: &mut [i32], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zgesv(
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                ipiv,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn posv(uplo: u8, n: usize, nrhs: usize, a: &mut [Self], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zposv(
                uplo,
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn trtrs(
        uplo: u8,
        trans: u8,
        diag: u8,
        n: usize,
        nrhs: usize,
        a: &[Self],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::ztrtrs(
                uplo,
                trans,
                diag,
                n as i32,
                nrhs as i32,
                a,
                n.max(1) as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gbsv(
        n: usize,
        kl: usize,
        ku: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        ipiv: &mut [i32],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zgbsv(
                n as i32,
                kl as i32,
                ku as i32,
                nrhs as i32,
                ab,
                ldab as i32,
                ipiv,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gtsv(
        n: usize,
        nrhs: usize,
        dl: &mut [Self],
        d: &mut [Self],
        du: &mut [Self],
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zgtsv(
                n as i32,
                nrhs as i32,
                dl,
                d,
                du,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn ptsv(n: usize, nrhs: usize, d: &mut [f64], e: &mut [Self], b: &mut [Self]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zptsv(n as i32, nrhs as i32, d, e, b, n.max(1) as i32, &mut info);
        }
        info
    }

    fn pbsv(
        uplo: u8,
        n: usize,
        kd: usize,
        nrhs: usize,
        ab: &mut [Self],
        ldab: usize,
        b: &mut [Self],
    ) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zpbsv(
                uplo,
                n as i32,
                kd as i32,
                nrhs as i32,
                ab,
                ldab as i32,
                b,
                n.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn getrf(m: usize, n: usize, a: &mut [Self], ipiv: &mut [i32]) -> i32 {
        let mut info = 0;
        unsafe {
            lapack::zgetrf(m as i32, n as i32, a, m.max(1) as i32, ipiv, &mut info);
        }
        info
    }

    fn getri_lwork(n: usize, a: &mut [Self], ipiv: &[i32]) -> (usize, i32) {
        let mut info = 0;
        let mut work = [c64::new(0.0, 0.0)];
        unsafe {
            lapack::zgetri(n as i32, a, n.max(1) as i32, ipiv, &mut work, -1, &mut info);
        }
        (work[0].re as usize, info)
    }

    fn getri(n: usize, a: &mut [Self], ipiv: &[i32], lwork: usize) -> i32 {
        let mut info = 0;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        unsafe {
            lapack::zgetri(
                n as i32,
                a,
                n.max(1) as i32,
                ipiv,
                &mut work,
                lwork.max(1) as i32,
                &mut info,
            );
        }
        info
    }

    fn gelsd(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut rank = 0;
        let mut info = 0;
        let mut work = [c64::new(0.0, 0.0)];
        let mut rwork_query = [0.0];
        let mut iwork_query = [0];
        unsafe {
            lapack::zgelsd(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut rwork_query,
                &mut iwork_query,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0].re as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        let mut rwork = vec![0.0; (rwork_query[0] as usize).max(1)];
        let mut iwork = vec![0; (iwork_query[0] as usize).max(1)];
        unsafe {
            lapack::zgelsd(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut rwork,
                &mut iwork,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gelsy(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut jpvt = vec![0; n.max(1)];
        let mut rank = 0;
        let mut info = 0;
        let mut rwork = vec![0.0; (2 * n).max(1)];
        let mut work = [c64::new(0.0, 0.0)];
        unsafe {
            lapack::zgelsy(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                &mut jpvt,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut rwork,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0].re as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        unsafe {
            lapack::zgelsy(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                &mut jpvt,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut rwork,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gelss(
        m: usize,
        n: usize,
        nrhs: usize,
        a: &mut [Self],
        b: &mut [Self],
        s: &mut [f64],
        rcond: f64,
    ) -> (i32, i32) {
        let ldb = m.max(n).max(1);
        let mut rank = 0;
        let mut info = 0;
        let mut rwork = vec![0.0; (5 * m.min(n)).max(1)];
        let mut work = [c64::new(0.0, 0.0)];
        unsafe {
            lapack::zgelss(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                -1,
                &mut rwork,
                &mut info,
            );
        }
        if info != 0 {
            return (rank, info);
        }
        let lwork = work[0].re as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        unsafe {
            lapack::zgelss(
                m as i32,
                n as i32,
                nrhs as i32,
                a,
                m.max(1) as i32,
                b,
                ldb as i32,
                s,
                rcond,
                &mut rank,
                &mut work,
                lwork as i32,
                &mut rwork,
                &mut info,
            );
        }
        (rank, info)
    }

    fn gesdd_thin(
        m: usize,
        n: usize,
        a: &mut [Self],
        s: &mut [f64],
        u: &mut [Self],
        vt: &mut [Self],
    ) -> i32 {
        let k = m.min(n);
        let mx = m.max(n);
        let mut info = 0;
        let mut iwork = vec![0; (8 * k).max(1)];
        // rwork for job `S`: max(5k² + 5k, 2·max(m,n)·k + 2k² + k)
        let rwork_len = (5 * k * k + 5 * k).max(2 * mx * k + 2 * k * k + k);
        let mut rwork = vec![0.0; rwork_len.max(1)];
        let mut work = [c64::new(0.0, 0.0)];
        unsafe {
            lapack::zgesdd(
                b'S',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                u,
                m.max(1) as i32,
                vt,
                k.max(1) as i32,
                &mut work,
                -1,
                &mut rwork,
                &mut iwork,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0].re as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        unsafe {
            lapack::zgesdd(
                b'S',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                u,
                m.max(1) as i32,
                vt,
                k.max(1) as i32,
                &mut work,
                lwork as i32,
                &mut rwork,
                &mut iwork,
                &mut info,
            );
        }
        info
    }

    fn gesdd_values(m: usize, n: usize, a: &mut [Self], s: &mut [f64]) -> i32 {
        let k = m.min(n);
        let mut info = 0;
        let mut iwork = vec![0; (8 * k).max(1)];
        let mut rwork = vec![0.0; (7 * k).max(1)];
        let mut u = [c64::new(0.0, 0.0)];
        let mut vt = [c64::new(0.0, 0.0)];
        let mut work = [c64::new(0.0, 0.0)];
        unsafe {
            lapack::zgesdd(
                b'N',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                &mut u,
                1,
                &mut vt,
                1,
                &mut work,
                -1,
                &mut rwork,
                &mut iwork,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0].re as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        unsafe {
            lapack::zgesdd(
                b'N',
                m as i32,
                n as i32,
                a,
                m.max(1) as i32,
                s,
                &mut u,
                1,
                &mut vt,
                1,
                &mut work,
                lwork as i32,
                &mut rwork,
                &mut iwork,
                &mut info,
            );
        }
        info
    }

    fn heevd(uplo: u8, n: usize, a: &mut [Self], w: &mut [f64]) -> i32 {
        let mut info = 0;
        let mut work = [c64::new(0.0, 0.0)];
        let mut rwork_query = [0.0];
        let mut iwork_query = [0];
        unsafe {
            lapack::zheevd(
                b'V',
                uplo,
                n as i32,
                a,
                n.max(1) as i32,
                w,
                &mut work,
                -1,
                &mut rwork_query,
                -1,
                &mut iwork_query,
                -1,
                &mut info,
            );
        }
        if info != 0 {
            return info;
        }
        let lwork = work[0].re as usize;
        let lrwork = rwork_query[0] as usize;
        let liwork = iwork_query[0] as usize;
        let mut work = vec![c64::new(0.0, 0.0); lwork.max(1)];
        let mut rwork = vec![0.0; lrwork.max(1)];
        let mut iwork = vec![0; liwork.max(1)];
        unsafe {
            lapack::zheevd(
                b'V',
                uplo,
                n as i32,
                a,
                n.max(1) as i32,
                w,
                &mut work,
                lwork as i32,
                &mut rwork,
                lrwork as i32,
                &mut iwork,
                liwork as i32,
                &mut info,
            );
        }
        info
    }
}
