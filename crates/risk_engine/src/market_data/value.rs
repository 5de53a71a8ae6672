//! Market data values and time series.
//!
//! This module provides [`MarketDataValue`], the closed sum type of
//! values the engine can hold, and [`TimeSeries`], the carrier for
//! historical observations.

use std::sync::Arc;

use risk_core::market_data::curves::{CreditCurve, NodalCurve};
use risk_core::types::Date;

/// One market-data value.
///
/// Curves are held behind `Arc` so that sharing a value across scenarios
/// or handing it to a calculation never copies node data.
#[derive(Debug, Clone)]
pub enum MarketDataValue {
    /// A yield (discount) curve.
    YieldCurve(Arc<NodalCurve<f64>>),
    /// A credit (hazard-rate) curve.
    CreditCurve(Arc<CreditCurve<f64>>),
    /// An FX rate: units of quote currency per unit of base currency.
    FxRate(f64),
}

impl MarketDataValue {
    /// Wraps a yield curve.
    pub fn yield_curve(curve: NodalCurve<f64>) -> Self {
        MarketDataValue::YieldCurve(Arc::new(curve))
    }

    /// Wraps a credit curve.
    pub fn credit_curve(curve: CreditCurve<f64>) -> Self {
        MarketDataValue::CreditCurve(Arc::new(curve))
    }

    /// Wraps an FX rate.
    pub fn fx_rate(rate: f64) -> Self {
        MarketDataValue::FxRate(rate)
    }

    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            MarketDataValue::YieldCurve(_) => "yield curve",
            MarketDataValue::CreditCurve(_) => "credit curve",
            MarketDataValue::FxRate(_) => "FX rate",
        }
    }
}

/// An ordered series of dated observations.
///
/// # Examples
///
/// ```
/// use risk_engine::market_data::TimeSeries;
/// use risk_core::types::Date;
///
/// let series = TimeSeries::new(vec![
///     (Date::from_ymd(2014, 10, 14).unwrap(), 0.0102),
///     (Date::from_ymd(2014, 10, 15).unwrap(), 0.0101),
/// ]);
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.latest().unwrap().1, 0.0101);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries {
    /// Observations in ascending date order
    points: Vec<(Date, f64)>,
}

impl TimeSeries {
    /// Creates a time series, sorting the observations by date.
    pub fn new(mut points: Vec<(Date, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        Self { points }
    }

    /// Returns the number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the series has no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the most recent observation.
    #[inline]
    pub fn latest(&self) -> Option<&(Date, f64)> {
        self.points.last()
    }

    /// Iterates over observations in ascending date order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &(Date, f64)> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::market_data::curves::CurveName;

    #[test]
    fn test_value_kind() {
        let curve = NodalCurve::new(
            CurveName::new("USD Discount"),
            vec!["1Y".into(), "5Y".into()],
            vec![1.0, 5.0],
            vec![0.01, 0.015],
        )
        .unwrap();

        assert_eq!(MarketDataValue::yield_curve(curve).kind(), "yield curve");
        assert_eq!(MarketDataValue::fx_rate(1.1).kind(), "FX rate");
    }

    #[test]
    fn test_time_series_sorts_on_construction() {
        let series = TimeSeries::new(vec![
            (Date::from_ymd(2014, 10, 16).unwrap(), 3.0),
            (Date::from_ymd(2014, 10, 14).unwrap(), 1.0),
            (Date::from_ymd(2014, 10, 15).unwrap(), 2.0),
        ]);

        let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.latest().unwrap().1, 3.0);
    }

    #[test]
    fn test_time_series_empty() {
        let series = TimeSeries::default();
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }
}
