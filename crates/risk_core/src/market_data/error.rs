//! Market data error types.
//!
//! This module provides structured error handling for curve construction,
//! node-value replacement and rates-provider lookups.

use thiserror::Error;

use crate::types::Currency;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use risk_core::market_data::MarketDataError;
///
/// let err = MarketDataError::NodeCountMismatch {
///     curve: "USD Discount".to_string(),
///     expected: 5,
///     got: 4,
/// };
/// assert!(format!("{}", err).contains("USD Discount"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// No discount curve registered for the currency.
    #[error("No discount curve for currency {currency}")]
    DiscountCurveNotFound {
        /// The currency that was looked up
        currency: Currency,
    },

    /// No credit curve registered under the identifier.
    #[error("No credit curve for id {id}")]
    CreditCurveNotFound {
        /// The identifier that was looked up
        id: String,
    },

    /// A replacement value vector did not match the curve's node count.
    #[error("Node count mismatch on curve {curve}: expected {expected}, got {got}")]
    NodeCountMismatch {
        /// Name of the curve being replaced
        curve: String,
        /// Node count of the existing curve
        expected: usize,
        /// Length of the supplied value vector
        got: usize,
    },

    /// Not enough nodes to build a curve.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of nodes provided
        got: usize,
        /// Minimum number of nodes required
        need: usize,
    },

    /// Node tenors are not strictly increasing.
    #[error("Tenors not strictly increasing at index {index}")]
    UnsortedTenors {
        /// Index of the first offending tenor
        index: usize,
    },

    /// Mismatched label/tenor/value lengths at construction.
    #[error("Mismatched node vectors: {labels} labels, {tenors} tenors, {values} values")]
    MismatchedNodeVectors {
        /// Number of labels supplied
        labels: usize,
        /// Number of tenors supplied
        tenors: usize,
        /// Number of values supplied
        values: usize,
    },

    /// Negative time to maturity in a curve query.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_curve_not_found_display() {
        let err = MarketDataError::DiscountCurveNotFound {
            currency: Currency::EUR,
        };
        assert_eq!(format!("{}", err), "No discount curve for currency EUR");
    }

    #[test]
    fn test_node_count_mismatch_display() {
        let err = MarketDataError::NodeCountMismatch {
            curve: "USD Discount".to_string(),
            expected: 5,
            got: 3,
        };
        assert_eq!(
            format!("{}", err),
            "Node count mismatch on curve USD Discount: expected 5, got 3"
        );
    }

    #[test]
    fn test_unsorted_tenors_display() {
        let err = MarketDataError::UnsortedTenors { index: 2 };
        assert_eq!(format!("{}", err), "Tenors not strictly increasing at index 2");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MarketDataError::InvalidMaturity { t: -1.0 };
        let _: &dyn std::error::Error = &err;
    }
}
