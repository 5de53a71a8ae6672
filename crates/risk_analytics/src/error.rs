//! Analytics error types.

use thiserror::Error;

use risk_core::market_data::MarketDataError;
use risk_core::math::differentiation::DifferentiationError;

/// Errors from sensitivity construction and cross-gamma computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A sensitivity vector whose length does not match its labels, or
    /// two combined entries of different lengths.
    #[error("Parameter count mismatch on curve {curve}: expected {expected}, got {got}")]
    ParameterCountMismatch {
        /// Name of the curve
        curve: String,
        /// Expected parameter count
        expected: usize,
        /// Supplied parameter count
        got: usize,
    },

    /// A cross-gamma matrix that is not rectangular or does not match
    /// its labels.
    #[error("Matrix shape mismatch on curve {curve}")]
    MatrixShapeMismatch {
        /// Name of the curve
        curve: String,
    },

    /// Error from the finite-difference differentiator.
    #[error("Differentiation error: {0}")]
    Differentiation(#[from] DifferentiationError),

    /// Error from the curve layer.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_count_mismatch_display() {
        let err = AnalyticsError::ParameterCountMismatch {
            curve: "USD Discount".to_string(),
            expected: 5,
            got: 4,
        };
        assert_eq!(
            format!("{}", err),
            "Parameter count mismatch on curve USD Discount: expected 5, got 4"
        );
    }

    #[test]
    fn test_from_differentiation_error() {
        let err: AnalyticsError = DifferentiationError::EmptyPoint.into();
        assert!(matches!(err, AnalyticsError::Differentiation(_)));
    }
}
