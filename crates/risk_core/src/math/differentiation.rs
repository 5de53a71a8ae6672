//! Finite-difference differentiation of vector fields.
//!
//! This module provides [`VectorFieldFirstOrderDifferentiator`], which
//! approximates the Jacobian of a function `f: R^n -> R^m` by bumping one
//! input coordinate at a time. Each evaluation of `f` may itself be an
//! expensive revaluation of a pricing pipeline, so the differentiator
//! performs the minimum number of evaluations for the chosen scheme and
//! never adapts the step size internally.

use thiserror::Error;

/// Differencing scheme for finite-difference derivatives.
///
/// For a scalar step `h` and basis vector `e_k`:
///
/// ```text
/// Forward:  J[:,k] ≈ (f(x + h e_k) − f(x)) / h
/// Backward: J[:,k] ≈ (f(x) − f(x − h e_k)) / h
/// Central:  J[:,k] ≈ (f(x + h e_k) − f(x − h e_k)) / (2h)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FiniteDifferenceType {
    /// One-sided forward differencing (one extra evaluation per column).
    Forward,
    /// One-sided backward differencing (one extra evaluation per column).
    Backward,
    /// Symmetric central differencing (two evaluations per column,
    /// second-order accurate).
    Central,
}

/// Errors from finite-difference differentiation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DifferentiationError {
    /// The step size must be strictly positive.
    #[error("Shift must be positive, got {shift}")]
    NonPositiveShift {
        /// The offending shift
        shift: f64,
    },

    /// The evaluation point has no coordinates.
    #[error("Cannot differentiate at an empty point")]
    EmptyPoint,

    /// The function returned vectors of different lengths across
    /// evaluations.
    #[error("Function output length changed between evaluations: {expected} vs {got}")]
    InconsistentOutputLength {
        /// Output length of the first evaluation
        expected: usize,
        /// Output length of a later evaluation
        got: usize,
    },
}

/// Finite-difference Jacobian calculator for vector-valued functions.
///
/// The default instance uses forward differencing with a one-basis-point
/// shift (`1.0e-4`), matching the convention of the cross-gamma
/// calculator built on top of it.
///
/// # Examples
///
/// ```
/// use risk_core::math::differentiation::{
///     FiniteDifferenceType, VectorFieldFirstOrderDifferentiator,
/// };
///
/// // f(x, y) = (x + 2y, 3x)
/// let f = |x: &[f64]| vec![x[0] + 2.0 * x[1], 3.0 * x[0]];
///
/// let fd = VectorFieldFirstOrderDifferentiator::new(
///     FiniteDifferenceType::Central,
///     1e-6,
/// )
/// .unwrap();
///
/// let jac = fd.differentiate(&f, &[1.0, 1.0]).unwrap();
/// assert!((jac[0][0] - 1.0).abs() < 1e-8);
/// assert!((jac[0][1] - 2.0).abs() < 1e-8);
/// assert!((jac[1][0] - 3.0).abs() < 1e-8);
/// assert!((jac[1][1] - 0.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VectorFieldFirstOrderDifferentiator {
    /// Differencing scheme
    fd_type: FiniteDifferenceType,
    /// Scalar step applied to each coordinate in turn
    shift: f64,
}

impl Default for VectorFieldFirstOrderDifferentiator {
    /// Forward differencing with a one-basis-point shift.
    fn default() -> Self {
        Self {
            fd_type: FiniteDifferenceType::Forward,
            shift: 1.0e-4,
        }
    }
}

impl VectorFieldFirstOrderDifferentiator {
    /// Creates a differentiator with the given scheme and step size.
    ///
    /// # Errors
    ///
    /// [`DifferentiationError::NonPositiveShift`] when `shift <= 0` or is
    /// not finite.
    pub fn new(
        fd_type: FiniteDifferenceType,
        shift: f64,
    ) -> Result<Self, DifferentiationError> {
        if !(shift > 0.0) || !shift.is_finite() {
            return Err(DifferentiationError::NonPositiveShift { shift });
        }
        Ok(Self { fd_type, shift })
    }

    /// Returns the differencing scheme.
    #[inline]
    pub fn fd_type(&self) -> FiniteDifferenceType {
        self.fd_type
    }

    /// Returns the step size.
    #[inline]
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// Computes the Jacobian of `f` at `x`.
    ///
    /// Returns an `m × n` matrix as nested vectors with
    /// `jacobian[i][j] = ∂f_i/∂x_j`, where `m` is the output length of
    /// `f` and `n = x.len()`. One-sided schemes evaluate `f` once at the
    /// base point plus once per column; the central scheme evaluates
    /// twice per column and never at the base point.
    ///
    /// # Errors
    ///
    /// * [`DifferentiationError::EmptyPoint`] when `x` is empty
    /// * [`DifferentiationError::InconsistentOutputLength`] when `f`
    ///   returns vectors of different lengths across evaluations
    pub fn differentiate<F>(
        &self,
        f: F,
        x: &[f64],
    ) -> Result<Vec<Vec<f64>>, DifferentiationError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        if x.is_empty() {
            return Err(DifferentiationError::EmptyPoint);
        }

        let n = x.len();
        let h = self.shift;

        match self.fd_type {
            FiniteDifferenceType::Forward => {
                let base = f(x);
                let m = base.len();
                let mut jacobian = vec![vec![0.0; n]; m];
                let mut bumped = x.to_vec();
                for j in 0..n {
                    bumped[j] = x[j] + h;
                    let up = f(&bumped);
                    check_len(m, up.len())?;
                    for i in 0..m {
                        jacobian[i][j] = (up[i] - base[i]) / h;
                    }
                    bumped[j] = x[j];
                }
                Ok(jacobian)
            }
            FiniteDifferenceType::Backward => {
                let base = f(x);
                let m = base.len();
                let mut jacobian = vec![vec![0.0; n]; m];
                let mut bumped = x.to_vec();
                for j in 0..n {
                    bumped[j] = x[j] - h;
                    let down = f(&bumped);
                    check_len(m, down.len())?;
                    for i in 0..m {
                        jacobian[i][j] = (base[i] - down[i]) / h;
                    }
                    bumped[j] = x[j];
                }
                Ok(jacobian)
            }
            FiniteDifferenceType::Central => {
                let mut bumped = x.to_vec();

                // The first column fixes the output length
                bumped[0] = x[0] + h;
                let up0 = f(&bumped);
                bumped[0] = x[0] - h;
                let down0 = f(&bumped);
                bumped[0] = x[0];

                let m = up0.len();
                check_len(m, down0.len())?;
                let mut jacobian = vec![vec![0.0; n]; m];
                for (i, row) in jacobian.iter_mut().enumerate() {
                    row[0] = (up0[i] - down0[i]) / (2.0 * h);
                }

                for j in 1..n {
                    bumped[j] = x[j] + h;
                    let up = f(&bumped);
                    bumped[j] = x[j] - h;
                    let down = f(&bumped);
                    bumped[j] = x[j];

                    check_len(m, up.len())?;
                    check_len(m, down.len())?;
                    for i in 0..m {
                        jacobian[i][j] = (up[i] - down[i]) / (2.0 * h);
                    }
                }
                Ok(jacobian)
            }
        }
    }
}

#[inline]
fn check_len(expected: usize, got: usize) -> Result<(), DifferentiationError> {
    if expected != got {
        return Err(DifferentiationError::InconsistentOutputLength { expected, got });
    }
    Ok(())
}
