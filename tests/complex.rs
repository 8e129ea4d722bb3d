use num_complex::Complex;

use densolve::{
    det, inv, lstsq, pinvh, solve, solve_toeplitz, solve_triangular, solveh_banded,
    HermitianBandedOptions, LstsqOptions, Matrix, SolveOptions, Transpose, TriangularOptions,
    Vector,
};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

fn assert_residual(a: &Matrix<C>, x: &Vector<C>, b: &Vector<C>) {
    for i in 0..a.nrows() {
        let mut sum = C::default();
        for j in 0..a.ncols() {
            sum += a[(i, j)] * x[j];
        }
        assert_complex_near(sum, b[i], TOL, &format!("row {}", i));
    }
}

// ── General solve ────────────────────────────────────────────────────

#[test]
fn complex_solve() {
    let a = Matrix::from_rows(
        2,
        2,
        &[c(2.0, 1.0), c(1.0, -1.0), c(1.0, 0.0), c(3.0, 2.0)],
    );
    let b = Vector::from_slice(&[c(5.0, 3.0), c(7.0, 4.0)]);
    let x = solve(&a, &b, &SolveOptions::default()).unwrap();
    assert_residual(&a, &x, &b);
}

#[test]
fn complex_solve_hermitian_spd() {
    // A = [[4, 2+i], [2-i, 5]] is Hermitian positive-definite
    let a = Matrix::from_rows(
        2,
        2,
        &[c(4.0, 0.0), c(2.0, 1.0), c(2.0, -1.0), c(5.0, 0.0)],
    );
    let b = Vector::from_slice(&[c(1.0, 1.0), c(2.0, -1.0)]);
    let opts = SolveOptions {
        assume_spd: true,
        ..Default::default()
    };
    let x = solve(&a, &b, &opts).unwrap();
    assert_residual(&a, &x, &b);
}

#[test]
fn complex_triangular_conjugate_transpose() {
    let a = Matrix::from_rows(
        2,
        2,
        &[c(2.0, 1.0), c(1.0, -1.0), c(0.0, 0.0), c(3.0, 0.0)],
    );
    let b = Vector::from_slice(&[c(1.0, 0.0), c(0.0, 1.0)]);
    let opts = TriangularOptions {
        transposed: Transpose::Conjugate,
        ..Default::default()
    };
    let x = solve_triangular(&a, &b, &opts).unwrap();
    let ah = a.conj_transpose();
    assert_residual(&ah, &x, &b);
}

// ── Inverse and determinant ──────────────────────────────────────────

#[test]
fn complex_inverse() {
    let a = Matrix::from_rows(
        2,
        2,
        &[c(2.0, 1.0), c(1.0, -1.0), c(0.0, 1.0), c(3.0, 0.0)],
    );
    let ai = inv(&a, true).unwrap();
    let id = &a * &ai;
    for i in 0..2 {
        for j in 0..2 {
            let expected = if i == j { c(1.0, 0.0) } else { c(0.0, 0.0) };
            assert_complex_near(id[(i, j)], expected, TOL, &format!("id[{},{}]", i, j));
        }
    }
}

#[test]
fn complex_det() {
    // (1+i)(1-i) - (2)(i) = 2 - 2i
    let a = Matrix::from_rows(
        2,
        2,
        &[c(1.0, 1.0), c(2.0, 0.0), c(0.0, 1.0), c(1.0, -1.0)],
    );
    let d = det(&a, true).unwrap();
    assert_complex_near(d, c(2.0, -2.0), TOL, "det");
}

// ── Structured solvers ───────────────────────────────────────────────

#[test]
fn complex_toeplitz_hermitian_default() {
    // r defaults to conj(c): the Toeplitz matrix is Hermitian
    let col = [c(5.0, 0.0), c(1.0, 1.0), c(0.5, -0.5)];
    let b = Vector::from_slice(&[c(1.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
    let x = solve_toeplitz(&col, None, &b, true).unwrap();
    let dense = Matrix::from_fn(3, 3, |i, j| {
        if i >= j {
            col[i - j]
        } else {
            col[j - i].conj()
        }
    });
    assert_residual(&dense, &x, &b);
}

#[test]
fn complex_hermitian_banded_tridiagonal() {
    // tridiagonal Hermitian PD: diag 4, superdiagonal 1+i (upper storage)
    let ab = Matrix::from_rows(
        2,
        3,
        &[
            c(0.0, 0.0),
            c(1.0, 1.0),
            c(1.0, 1.0),
            c(4.0, 0.0),
            c(4.0, 0.0),
            c(4.0, 0.0),
        ],
    );
    let b = Vector::from_slice(&[c(1.0, 0.0), c(0.0, 1.0), c(1.0, -1.0)]);
    let x = solveh_banded(&ab, &b, &HermitianBandedOptions::default()).unwrap();
    let dense = Matrix::from_fn(3, 3, |i, j| match (i, j) {
        _ if i == j => c(4.0, 0.0),
        _ if j == i + 1 => c(1.0, 1.0),
        _ if i == j + 1 => c(1.0, -1.0),
        _ => C::default(),
    });
    assert_residual(&dense, &x, &b);
}

// ── Least squares and pseudoinverse ──────────────────────────────────

#[test]
fn complex_lstsq_overdetermined() {
    let a = Matrix::from_rows(
        3,
        2,
        &[
            c(1.0, 0.0),
            c(0.0, 1.0),
            c(1.0, 1.0),
            c(2.0, 0.0),
            c(0.0, -1.0),
            c(1.0, 0.0),
        ],
    );
    // consistent rhs: b = A * [1+i, 2]
    let target = Vector::from_slice(&[c(1.0, 1.0), c(2.0, 0.0)]);
    let b = &a * &target;
    let fit = lstsq(&a, &b, &LstsqOptions::default()).unwrap();
    assert_eq!(fit.rank, 2);
    assert_complex_near(fit.x[0], target[0], TOL, "x[0]");
    assert_complex_near(fit.x[1], target[1], TOL, "x[1]");
    assert!(fit.residuals[0] < TOL);
}

#[test]
fn complex_pinvh() {
    // Hermitian with one zero eigenvalue is handled exactly
    let a = Matrix::from_rows(
        2,
        2,
        &[c(2.0, 0.0), c(1.0, 1.0), c(1.0, -1.0), c(1.0, 0.0)],
    );
    let (p, rank) = pinvh(&a, None, false, true).unwrap();
    // det = 2 - |1+i|^2 = 0: rank drops to 1
    assert_eq!(rank, 1);
    let apa = &(&a * &p) * &a;
    for i in 0..2 {
        for j in 0..2 {
            assert_complex_near(apa[(i, j)], a[(i, j)], TOL, &format!("apa[{},{}]", i, j));
        }
    }
}
