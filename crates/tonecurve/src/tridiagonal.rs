//! Tridiagonal linear systems solved with the Thomas algorithm.
//!
//! For a system of `m` equations the coefficient matrix is stored as three
//! vectors:
//!
//! ```text
//! | b0 c0             |   | x0   |   | f0   |
//! | a0 b1 c1          |   | x1   |   | f1   |
//! |    a1 b2 c2       | * | x2   | = | f2   |
//! |       ...         |   | ...  |   | ...  |
//! |          a(m-2) b(m-1) | | x(m-1) | | f(m-1) |
//! ```
//!
//! The solver is `O(m)` and allocation is limited to the coefficient and
//! result vectors.

use crate::error::{CurveError, CurveResult};

/// A transient tridiagonal system `A·x = f`.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    sub: Vec<f64>,
    diag: Vec<f64>,
    sup: Vec<f64>,
    rhs: Vec<f64>,
}

impl TridiagonalSystem {
    /// Creates a system, checking that the vector lengths are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DimensionMismatch`] when `diag` is empty or when
    /// `sub`, `sup` and `rhs` do not have lengths `m-1`, `m-1` and `m`.
    pub fn new(sub: Vec<f64>, diag: Vec<f64>, sup: Vec<f64>, rhs: Vec<f64>) -> CurveResult<Self> {
        check_dimensions(&sub, &diag, &sup, &rhs)?;
        Ok(Self {
            sub,
            diag,
            sup,
            rhs,
        })
    }

    /// Number of equations.
    pub fn len(&self) -> usize {
        self.diag.len()
    }

    /// Always false: a system has at least one equation.
    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    /// Solves the system.
    ///
    /// # Errors
    ///
    /// Never fails for a system built with [`TridiagonalSystem::new`]; the
    /// result type is shared with [`solve`].
    pub fn solve(&self) -> CurveResult<Vec<f64>> {
        solve(&self.sub, &self.diag, &self.sup, &self.rhs)
    }
}

fn check_dimensions(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> CurveResult<()> {
    let m = diag.len();
    if m == 0 || sub.len() + 1 != m || sup.len() + 1 != m || rhs.len() != m {
        return Err(CurveError::DimensionMismatch {
            sub: sub.len(),
            diag: m,
            sup: sup.len(),
            rhs: rhs.len(),
        });
    }
    Ok(())
}

/// Solves a tridiagonal system with the Thomas algorithm.
///
/// `sub` and `sup` hold the `m-1` entries below and above the diagonal,
/// `diag` and `rhs` hold `m` entries.
///
/// A zero pivot means the caller built a singular system. This is checked in
/// debug builds only; the spline engine never produces one for separated
/// knots because its matrix is strictly diagonally dominant.
///
/// # Errors
///
/// Returns [`CurveError::DimensionMismatch`] if the vector lengths are
/// inconsistent or the system is empty.
///
/// # Example
///
/// ```
/// use tonecurve::tridiagonal::solve;
///
/// // | 2 1 |   | x0 |   | 3 |
/// // | 1 2 | * | x1 | = | 3 |
/// let x = solve(&[1.0], &[2.0, 2.0], &[1.0], &[3.0, 3.0])?;
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 1.0).abs() < 1e-12);
/// # Ok::<(), tonecurve::CurveError>(())
/// ```
pub fn solve(sub: &[f64], diag: &[f64], sup: &[f64], rhs: &[f64]) -> CurveResult<Vec<f64>> {
    check_dimensions(sub, diag, sup, rhs)?;
    let m = diag.len();

    if m == 1 {
        debug_assert!(diag[0].abs() > 0.0, "singular 1x1 tridiagonal system");
        return Ok(vec![rhs[0] / diag[0]]);
    }

    // alpha[0] and beta[0] are unused so indices match the textbook recurrence.
    let mut alpha = vec![0.0; m];
    let mut beta = vec![0.0; m];

    debug_assert!(diag[0].abs() > 0.0, "zero pivot in row 0");
    alpha[1] = -sup[0] / diag[0];
    beta[1] = rhs[0] / diag[0];

    for i in 1..m - 1 {
        let denominator = sub[i - 1] * alpha[i] + diag[i];
        debug_assert!(denominator.abs() > 0.0, "zero pivot in row {i}");
        alpha[i + 1] = -sup[i] / denominator;
        beta[i + 1] = (rhs[i] - sub[i - 1] * beta[i]) / denominator;
    }

    let mut x = vec![0.0; m];
    let last = m - 1;
    let denominator = diag[last] + sub[last - 1] * alpha[last];
    debug_assert!(denominator.abs() > 0.0, "zero pivot in row {last}");
    x[last] = (rhs[last] - sub[last - 1] * beta[last]) / denominator;

    for i in (0..last).rev() {
        x[i] = alpha[i + 1] * x[i + 1] + beta[i + 1];
    }

    Ok(x)
}
