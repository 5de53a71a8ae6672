//! Calculation requirements.
//!
//! Before execution, a calculation function declares the market data it
//! needs: a set of single-value keys, a set of time-series keys and the
//! currencies its results are expressed in. Derivation is deterministic
//! from trade content alone; the engine resolves the keys against a feed
//! when assembling scenario market data.

use std::collections::HashSet;

use risk_core::types::Currency;

use crate::market_data::key::MarketDataKey;

/// The market data and output currencies one calculation needs.
///
/// # Examples
///
/// ```
/// use risk_engine::requirements::CalculationRequirements;
/// use risk_engine::market_data::MarketDataKey;
/// use risk_core::types::Currency;
///
/// let requirements = CalculationRequirements::empty()
///     .with_single_value(MarketDataKey::yield_curve(Currency::USD))
///     .with_output_currency(Currency::USD);
///
/// assert_eq!(requirements.single_value_requirements().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CalculationRequirements {
    /// Keys whose current value is required
    single_value_requirements: HashSet<MarketDataKey>,
    /// Keys whose historical series is required
    time_series_requirements: HashSet<MarketDataKey>,
    /// Currencies the calculation's results are expressed in
    output_currencies: HashSet<Currency>,
}

impl CalculationRequirements {
    /// Creates empty requirements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a single-value requirement.
    #[must_use]
    pub fn with_single_value(mut self, key: MarketDataKey) -> Self {
        self.single_value_requirements.insert(key);
        self
    }

    /// Adds several single-value requirements.
    #[must_use]
    pub fn with_single_values(mut self, keys: impl IntoIterator<Item = MarketDataKey>) -> Self {
        self.single_value_requirements.extend(keys);
        self
    }

    /// Adds a time-series requirement.
    #[must_use]
    pub fn with_time_series(mut self, key: MarketDataKey) -> Self {
        self.time_series_requirements.insert(key);
        self
    }

    /// Adds an output currency.
    #[must_use]
    pub fn with_output_currency(mut self, currency: Currency) -> Self {
        self.output_currencies.insert(currency);
        self
    }

    /// Adds several output currencies.
    #[must_use]
    pub fn with_output_currencies(
        mut self,
        currencies: impl IntoIterator<Item = Currency>,
    ) -> Self {
        self.output_currencies.extend(currencies);
        self
    }

    /// Returns the union of two requirement sets.
    #[must_use]
    pub fn union(mut self, other: CalculationRequirements) -> Self {
        self.single_value_requirements
            .extend(other.single_value_requirements);
        self.time_series_requirements
            .extend(other.time_series_requirements);
        self.output_currencies.extend(other.output_currencies);
        self
    }

    /// Returns the single-value keys.
    #[inline]
    pub fn single_value_requirements(&self) -> &HashSet<MarketDataKey> {
        &self.single_value_requirements
    }

    /// Returns the time-series keys.
    #[inline]
    pub fn time_series_requirements(&self) -> &HashSet<MarketDataKey> {
        &self.time_series_requirements
    }

    /// Returns the output currencies.
    #[inline]
    pub fn output_currencies(&self) -> &HashSet<Currency> {
        &self.output_currencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let requirements = CalculationRequirements::empty();
        assert!(requirements.single_value_requirements().is_empty());
        assert!(requirements.time_series_requirements().is_empty());
        assert!(requirements.output_currencies().is_empty());
    }

    #[test]
    fn test_with_single_values_dedupes() {
        let requirements = CalculationRequirements::empty().with_single_values([
            MarketDataKey::yield_curve(Currency::USD),
            MarketDataKey::yield_curve(Currency::USD),
            MarketDataKey::yield_curve(Currency::EUR),
        ]);
        assert_eq!(requirements.single_value_requirements().len(), 2);
    }

    #[test]
    fn test_union() {
        let a = CalculationRequirements::empty()
            .with_single_value(MarketDataKey::yield_curve(Currency::USD))
            .with_output_currency(Currency::USD);
        let b = CalculationRequirements::empty()
            .with_single_value(MarketDataKey::yield_curve(Currency::EUR))
            .with_time_series(MarketDataKey::yield_curve(Currency::EUR))
            .with_output_currency(Currency::EUR);

        let merged = a.union(b);
        assert_eq!(merged.single_value_requirements().len(), 2);
        assert_eq!(merged.time_series_requirements().len(), 1);
        assert_eq!(merged.output_currencies().len(), 2);
    }
}
