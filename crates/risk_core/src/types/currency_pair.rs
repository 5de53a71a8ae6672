//! Currency pair types for FX conversion.
//!
//! This module provides the [`CurrencyPair`] identifier used to key FX
//! rates in scenario market data. The rate itself is market data and is
//! held separately, so the pair is a pure identifier.
//!
//! # Examples
//!
//! ```
//! use risk_core::types::{Currency, CurrencyPair};
//!
//! let pair = CurrencyPair::new(Currency::EUR, Currency::USD);
//! assert_eq!(pair.base(), Currency::EUR);
//! assert_eq!(pair.quote(), Currency::USD);
//! assert_eq!(format!("{}", pair), "EUR/USD");
//! ```

use std::fmt;

use super::currency::Currency;

/// An ordered pair of currencies identifying an FX rate.
///
/// The convention is BASE/QUOTE: a rate for the pair expresses how many
/// units of QUOTE one unit of BASE buys. The pair is `Copy` and hashable
/// so it can key FX-rate maps directly.
///
/// # Examples
///
/// ```
/// use risk_core::types::{Currency, CurrencyPair};
///
/// // EUR/USD: 1 EUR = rate USD
/// let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD);
/// let usdeur = eurusd.inverse();
/// assert_eq!(usdeur.base(), Currency::USD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyPair {
    /// Base currency (the numerator in the exchange rate)
    base: Currency,
    /// Quote currency (the denominator in the exchange rate)
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    #[inline]
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Returns the base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Returns the quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Returns the pair with base and quote swapped.
    ///
    /// A rate `r` for this pair corresponds to `1/r` for the inverse pair.
    #[inline]
    pub fn inverse(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Returns true when base and quote are the same currency.
    ///
    /// Identity pairs always convert at rate 1 and never require a
    /// market-data lookup.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.base == self.quote
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
