use thiserror::Error;

/// Errors from the solver layer.
///
/// Shape problems are caught before any kernel call; the remaining variants
/// interpret the kernel's integer status code. No operation retries on
/// failure; every error carries enough context (failing pivot, leading
/// minor, offending argument) to diagnose the call.
///
/// ```
/// use densolve::{solve, Error, Matrix, SolveOptions, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 2.0, 4.0]);
/// let b = Vector::from_slice(&[1.0, 2.0]);
/// let err = solve(&a, &b, &SolveOptions::default()).unwrap_err();
/// assert!(matches!(err, Error::Singular { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Dimension mismatch or malformed shape, detected locally before any
    /// kernel call.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// The kernel reported an illegal value in one of its arguments
    /// (negative status code). With validated inputs this indicates an
    /// internal contract violation, not a data problem.
    #[error("illegal value in argument {arg} of kernel routine {routine}")]
    InvalidArgument {
        /// Kernel routine that rejected the call.
        routine: &'static str,
        /// 1-based position of the offending argument.
        arg: usize,
    },

    /// Matrix is singular (or a principal minor is, for the Toeplitz path).
    ///
    /// `diagonal` is the 0-based index of the first zero pivot when the
    /// kernel identifies one; informational only.
    #[error("singular matrix{}", match .diagonal {
        Some(k) => format!(": zero pivot at diagonal {k}"),
        None => String::new(),
    })]
    Singular {
        /// First zero diagonal/pivot index, when reported.
        diagonal: Option<usize>,
    },

    /// A matrix declared positive-definite is not: the `minor`-th leading
    /// minor (1-indexed) failed during Cholesky factorization.
    #[error("leading minor {minor} is not positive definite")]
    NotPositiveDefinite {
        /// 1-indexed failing leading minor.
        minor: usize,
    },

    /// An iterative kernel (SVD or eigendecomposition) failed to converge.
    #[error("iterative kernel did not converge")]
    ConvergenceFailure,

    /// A non-finite value (NaN or infinity) was found during input
    /// validation (`check_finite`).
    #[error("array must not contain infs or NaNs")]
    NonFinite,
}

impl Error {
    /// Shorthand for an [`Error::InvalidShape`] with a formatted message.
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        Error::InvalidShape(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = Error::Singular { diagonal: Some(2) };
        assert_eq!(e.to_string(), "singular matrix: zero pivot at diagonal 2");
        let e = Error::Singular { diagonal: None };
        assert_eq!(e.to_string(), "singular matrix");
        let e = Error::NotPositiveDefinite { minor: 3 };
        assert_eq!(e.to_string(), "leading minor 3 is not positive definite");
        let e = Error::InvalidArgument {
            routine: "gesv",
            arg: 4,
        };
        assert_eq!(
            e.to_string(),
            "illegal value in argument 4 of kernel routine gesv"
        );
    }
}
