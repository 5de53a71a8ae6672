//! The immutable rates provider.
//!
//! This module provides [`RatesProvider`], the per-calculation aggregate
//! mapping currencies to discount curves and credit identifiers to credit
//! curves. Every update operation produces a structurally new provider;
//! curves are held behind `Arc` so unaffected entries are shared, not
//! copied.

use std::collections::HashMap;
use std::sync::Arc;

use num_traits::Float;

use super::curves::{CreditCurve, CreditCurveId, NodalCurve};
use super::error::MarketDataError;
use crate::types::{Currency, Date};

/// Immutable aggregate of discount and credit curves for one valuation.
///
/// The provider is read-only for the lifetime of a calculation: the
/// `with_*` operations return a new provider with one entry replaced and
/// every other curve shared via `Arc`, so concurrent readers of the base
/// provider never observe a mutation.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Examples
///
/// ```
/// use risk_core::market_data::RatesProvider;
/// use risk_core::market_data::curves::{CurveName, NodalCurve};
/// use risk_core::types::{Currency, Date};
///
/// let curve = NodalCurve::new(
///     CurveName::new("USD Discount"),
///     vec!["1Y".into(), "5Y".into()],
///     vec![1.0, 5.0],
///     vec![0.01_f64, 0.015],
/// )
/// .unwrap();
///
/// let provider = RatesProvider::new(Date::from_ymd(2014, 10, 16).unwrap())
///     .with_discount_curve(Currency::USD, curve);
///
/// assert!(provider.discount_curve(Currency::USD).is_some());
/// assert!(provider.discount_curve(Currency::EUR).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RatesProvider<T: Float> {
    /// Valuation date for every curve in the aggregate
    valuation_date: Date,
    /// Discount curves keyed by currency
    discount_curves: HashMap<Currency, Arc<NodalCurve<T>>>,
    /// Credit curves keyed by reference identifier
    credit_curves: HashMap<CreditCurveId, Arc<CreditCurve<T>>>,
}

impl<T: Float> RatesProvider<T> {
    /// Creates an empty provider for the given valuation date.
    pub fn new(valuation_date: Date) -> Self {
        Self {
            valuation_date,
            discount_curves: HashMap::new(),
            credit_curves: HashMap::new(),
        }
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns a new provider with the discount curve for `currency`
    /// replaced (or added).
    ///
    /// The curve maps are cloned at the map level only; every unaffected
    /// curve is shared with the original provider.
    #[must_use]
    pub fn with_discount_curve(&self, currency: Currency, curve: NodalCurve<T>) -> Self {
        let mut discount_curves = self.discount_curves.clone();
        discount_curves.insert(currency, Arc::new(curve));
        Self {
            valuation_date: self.valuation_date,
            discount_curves,
            credit_curves: self.credit_curves.clone(),
        }
    }

    /// Returns a new provider with an already-shared discount curve
    /// substituted for `currency`.
    ///
    /// Used by perturbation loops that hold curves behind `Arc` already.
    #[must_use]
    pub fn with_discount_curve_arc(
        &self,
        currency: Currency,
        curve: Arc<NodalCurve<T>>,
    ) -> Self {
        let mut discount_curves = self.discount_curves.clone();
        discount_curves.insert(currency, curve);
        Self {
            valuation_date: self.valuation_date,
            discount_curves,
            credit_curves: self.credit_curves.clone(),
        }
    }

    /// Returns a new provider with the credit curve for `id` replaced
    /// (or added).
    #[must_use]
    pub fn with_credit_curve(&self, id: CreditCurveId, curve: CreditCurve<T>) -> Self {
        let mut credit_curves = self.credit_curves.clone();
        credit_curves.insert(id, Arc::new(curve));
        Self {
            valuation_date: self.valuation_date,
            discount_curves: self.discount_curves.clone(),
            credit_curves,
        }
    }

    /// Returns the discount curve for `currency`, if present.
    #[inline]
    pub fn discount_curve(&self, currency: Currency) -> Option<&Arc<NodalCurve<T>>> {
        self.discount_curves.get(&currency)
    }

    /// Returns the discount curve for `currency`, or an error.
    pub fn discount_curve_or_err(
        &self,
        currency: Currency,
    ) -> Result<&Arc<NodalCurve<T>>, MarketDataError> {
        self.discount_curves
            .get(&currency)
            .ok_or(MarketDataError::DiscountCurveNotFound { currency })
    }

    /// Returns the credit curve for `id`, if present.
    #[inline]
    pub fn credit_curve(&self, id: &CreditCurveId) -> Option<&Arc<CreditCurve<T>>> {
        self.credit_curves.get(id)
    }

    /// Returns the credit curve for `id`, or an error.
    pub fn credit_curve_or_err(
        &self,
        id: &CreditCurveId,
    ) -> Result<&Arc<CreditCurve<T>>, MarketDataError> {
        self.credit_curves
            .get(id)
            .ok_or_else(|| MarketDataError::CreditCurveNotFound {
                id: id.as_str().to_string(),
            })
    }

    /// Iterates over (currency, discount curve) pairs.
    #[inline]
    pub fn discount_curves(&self) -> impl Iterator<Item = (&Currency, &Arc<NodalCurve<T>>)> {
        self.discount_curves.iter()
    }

    /// Iterates over (identifier, credit curve) pairs.
    #[inline]
    pub fn credit_curves(&self) -> impl Iterator<Item = (&CreditCurveId, &Arc<CreditCurve<T>>)> {
        self.credit_curves.iter()
    }

    /// Returns the number of discount curves.
    #[inline]
    pub fn discount_curve_count(&self) -> usize {
        self.discount_curves.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::CurveName;

    fn curve(name: &str, values: &[f64]) -> NodalCurve<f64> {
        NodalCurve::new(
            CurveName::new(name),
            vec!["1Y".into(), "5Y".into(), "10Y".into()],
            vec![1.0, 5.0, 10.0],
            values.to_vec(),
        )
        .unwrap()
    }

    fn sample_provider() -> RatesProvider<f64> {
        RatesProvider::new(Date::from_ymd(2014, 10, 16).unwrap())
            .with_discount_curve(Currency::USD, curve("USD Discount", &[0.01, 0.015, 0.02]))
            .with_discount_curve(Currency::EUR, curve("EUR Discount", &[0.005, 0.008, 0.011]))
    }

    #[test]
    fn test_lookup_by_currency() {
        let provider = sample_provider();
        assert_eq!(
            provider
                .discount_curve(Currency::USD)
                .unwrap()
                .name()
                .as_str(),
            "USD Discount"
        );
        assert!(provider.discount_curve(Currency::GBP).is_none());
    }

    #[test]
    fn test_lookup_or_err() {
        let provider = sample_provider();
        match provider.discount_curve_or_err(Currency::GBP) {
            Err(MarketDataError::DiscountCurveNotFound { currency }) => {
                assert_eq!(currency, Currency::GBP)
            }
            _ => panic!("Expected DiscountCurveNotFound error"),
        }
    }

    #[test]
    fn test_with_discount_curve_shares_unaffected_curves() {
        let provider = sample_provider();
        let eur_before = Arc::clone(provider.discount_curve(Currency::EUR).unwrap());

        let updated = provider
            .with_discount_curve(Currency::USD, curve("USD Discount", &[0.02, 0.025, 0.03]));

        // EUR curve is the very same allocation, not a copy
        let eur_after = updated.discount_curve(Currency::EUR).unwrap();
        assert!(Arc::ptr_eq(&eur_before, eur_after));

        // USD curve was replaced in the new provider only
        assert_eq!(
            provider.discount_curve(Currency::USD).unwrap().values()[0],
            0.01
        );
        assert_eq!(
            updated.discount_curve(Currency::USD).unwrap().values()[0],
            0.02
        );
    }

    #[test]
    fn test_with_credit_curve() {
        let credit = CreditCurve::new(
            CurveName::new("ACME Corp"),
            vec!["1Y".into(), "5Y".into()],
            vec![1.0, 5.0],
            vec![0.01, 0.012],
        )
        .unwrap();

        let id = CreditCurveId::new("ACME Corp:SENIOR");
        let provider = sample_provider().with_credit_curve(id.clone(), credit);

        assert!(provider.credit_curve(&id).is_some());
        assert!(provider
            .credit_curve(&CreditCurveId::new("OTHER"))
            .is_none());
    }

    #[test]
    fn test_credit_curve_or_err() {
        let provider = sample_provider();
        let id = CreditCurveId::new("MISSING");
        assert!(matches!(
            provider.credit_curve_or_err(&id),
            Err(MarketDataError::CreditCurveNotFound { .. })
        ));
    }

    #[test]
    fn test_discount_curves_iteration() {
        let provider = sample_provider();
        assert_eq!(provider.discount_curve_count(), 2);
        let currencies: Vec<_> = provider.discount_curves().map(|(c, _)| *c).collect();
        assert!(currencies.contains(&Currency::USD));
        assert!(currencies.contains(&Currency::EUR));
    }

    #[test]
    fn test_valuation_date() {
        let provider = sample_provider();
        assert_eq!(
            provider.valuation_date(),
            Date::from_ymd(2014, 10, 16).unwrap()
        );
    }
}
