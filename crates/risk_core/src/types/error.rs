//! Error types for the foundational value types.
//!
//! This module provides:
//! - `CurrencyError`: Errors from currency parsing and mixed-currency arithmetic
//! - `DateError`: Errors from date construction and parsing

use thiserror::Error;

use super::currency::Currency;

/// Currency-related errors.
///
/// # Examples
///
/// ```
/// use risk_core::types::CurrencyError;
///
/// let err = CurrencyError::UnknownCurrency("XYZ".to_string());
/// assert_eq!(format!("{}", err), "Unknown currency code: XYZ");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// The string did not match any known ISO 4217 code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Arithmetic attempted between amounts in different currencies.
    #[error("Currency mismatch: {left} vs {right}")]
    CurrencyMismatch {
        /// Currency of the left operand
        left: Currency,
        /// Currency of the right operand
        right: Currency,
    },
}

/// Date-related errors.
///
/// # Examples
///
/// ```
/// use risk_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("Cannot parse date: {0}")]
    ParseError(String),
}
