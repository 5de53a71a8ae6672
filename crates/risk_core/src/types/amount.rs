//! Monetary amounts tagged with their currency.
//!
//! This module provides [`CurrencyAmount`], the result type for monetary
//! measures such as present value. Tagging the amount with its currency
//! keeps mixed-currency arithmetic a checked operation rather than a
//! silent bug.

use std::fmt;

use super::currency::Currency;
use super::error::CurrencyError;

/// An amount of money in a specific currency.
///
/// # Examples
///
/// ```
/// use risk_core::types::{Currency, CurrencyAmount};
///
/// let pv = CurrencyAmount::new(1_250.75, Currency::USD);
/// assert_eq!(pv.amount(), 1_250.75);
/// assert_eq!(pv.currency(), Currency::USD);
///
/// // Conversion applies an FX rate supplied by the caller
/// let in_eur = pv.converted_to(Currency::EUR, 0.9);
/// assert_eq!(in_eur.currency(), Currency::EUR);
/// assert!((in_eur.amount() - 1_125.675).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    /// The amount value
    amount: f64,
    /// The currency of the amount
    currency: Currency,
}

impl CurrencyAmount {
    /// Creates a new amount.
    #[inline]
    pub fn new(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the given currency.
    #[inline]
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0.0,
            currency,
        }
    }

    /// Returns the amount value.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Returns the currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns a new amount converted into `target` at the given FX rate.
    ///
    /// The rate expresses how many units of `target` one unit of this
    /// amount's currency buys. Converting into the same currency returns
    /// the amount unchanged regardless of the rate.
    pub fn converted_to(&self, target: Currency, fx_rate: f64) -> Self {
        if target == self.currency {
            return *self;
        }
        Self {
            amount: self.amount * fx_rate,
            currency: target,
        }
    }

    /// Adds another amount in the same currency.
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::CurrencyMismatch`] when the currencies
    /// differ; mixed-currency totals require an explicit conversion first.
    pub fn checked_add(&self, other: CurrencyAmount) -> Result<Self, CurrencyError> {
        if self.currency != other.currency {
            return Err(CurrencyError::CurrencyMismatch {
                left: self.currency,
                right: other.currency,
            });
        }
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    /// Returns the negated amount.
    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }
}

impl fmt::Display for CurrencyAmount {
    /// Formats as `<code> <amount>` with the currency's decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.*}",
            self.currency,
            self.currency.decimal_places() as usize,
            self.amount
        )
    }
}
