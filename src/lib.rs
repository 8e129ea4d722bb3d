//! # densolve
//!
//! Dense and structured linear-system solvers over LAPACK kernels.
//!
//! The crate is a dispatch and numerical-policy layer: given a matrix with a
//! declared structure and a right-hand side, it picks the factorization
//! strategy, lays the data out for the kernel, and interprets the kernel's
//! status code into a typed error. The factorizations themselves (LU,
//! Cholesky, banded and tridiagonal variants, SVD, Hermitian
//! eigendecomposition, least-squares drivers) come from LAPACK through the
//! [`lapack`] crate; the one solver implemented natively is the O(n²)
//! Levinson–Durbin recursion for Toeplitz systems.
//!
//! ## Solvers
//!
//! | Structure | Entry point |
//! |---|---|
//! | General square | [`solve`] |
//! | Symmetric/Hermitian positive-definite | [`solve`] with [`SolveOptions::assume_spd`] |
//! | Triangular | [`solve_triangular`] |
//! | Banded | [`solve_banded`] |
//! | Hermitian positive-definite banded | [`solveh_banded`] |
//! | Toeplitz | [`solve_toeplitz`] |
//! | Rectangular (least squares) | [`lstsq`] |
//!
//! Derived quantities: [`inv`], [`det`], and the pseudoinverse family
//! [`pinv`], [`pinv_svd`], [`pinvh`].
//!
//! ## Ownership as the overwrite contract
//!
//! The kernels factor in place, so every solver needs a buffer it may
//! destroy. Passing a matrix **by value** donates its storage to the call;
//! passing `&m` keeps the caller's data intact behind an internal copy. There
//! is no overwrite flag to get wrong.
//!
//! ## Quick start
//!
//! ```
//! use densolve::{solve, Matrix, SolveOptions, Vector};
//!
//! let a = Matrix::from_rows(3, 3, &[
//!     3.0_f64, 2.0, 0.0,
//!     1.0, -1.0, 0.0,
//!     0.0, 5.0, 1.0,
//! ]);
//! let b = Vector::from_slice(&[2.0, 4.0, -1.0]);
//! let x = solve(&a, &b, &SolveOptions::default()).unwrap();
//! assert!((x[0] - 2.0).abs() < 1e-12);
//! assert!((x[1] + 2.0).abs() < 1e-12);
//! assert!((x[2] - 9.0).abs() < 1e-12);
//! ```
//!
//! Element types are `f64` and `num_complex::Complex<f64>`, the double
//! precision d/z LAPACK families. The LAPACK provider is selected with cargo
//! features (`openblas` by default; `netlib`, `intel-mkl`, `accelerate`).

// lapack-src provides the linked provider; nothing is called from it
// directly
extern crate lapack_src;

pub mod banded;
pub mod error;
pub mod invdet;
pub mod kernel;
pub mod lstsq;
pub mod matrix;
pub mod operand;
pub mod pinv;
pub mod solve;
pub mod toeplitz;
pub mod traits;

pub use banded::{solve_banded, solveh_banded, BandedOptions, HermitianBandedOptions};
pub use error::Error;
pub use invdet::{det, inv};
pub use kernel::Lapack;
pub use lstsq::{lstsq, Lstsq, LstsqDriver, LstsqOptions};
pub use matrix::{Matrix, Vector};
pub use operand::{Operand, Rhs};
pub use pinv::{pinv, pinv_svd, pinvh};
pub use solve::{solve, solve_triangular, SolveOptions, Transpose, TriangularOptions};
pub use toeplitz::solve_toeplitz;
pub use traits::{LinalgScalar, Scalar};
