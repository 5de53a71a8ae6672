//! Partial-failure assembly of scenario market data.
//!
//! [`build_scenario_market_data`] attempts to build a value for every
//! requested identifier. Individual failures never abort the build of
//! the other identifiers; each requested identifier ends up in exactly
//! one of three places: the built market data, the single-value failure
//! map or the time-series failure map.

use std::collections::HashMap;

use risk_core::types::Date;

use super::key::{MarketDataFeed, MarketDataId};
use super::scenario::ScenarioMarketData;
use super::source::{BuildFailure, MarketDataSource};
use crate::error::EngineError;
use crate::requirements::CalculationRequirements;

/// The outcome of building scenario market data.
///
/// Holds the successfully built data plus the reasons for every
/// identifier that could not be built, split by channel. The built
/// market data itself also records the failures, so later lookups of a
/// failed identifier surface the original reason instead of a
/// missing-key error.
#[derive(Debug, Clone)]
pub struct ScenarioMarketDataResult {
    /// The market data that was successfully built
    market_data: ScenarioMarketData,
    /// Reasons for identifiers whose single value could not be built
    single_value_failures: HashMap<MarketDataId, BuildFailure>,
    /// Reasons for identifiers whose time series could not be built
    time_series_failures: HashMap<MarketDataId, BuildFailure>,
}

impl ScenarioMarketDataResult {
    /// Returns the built market data.
    #[inline]
    pub fn market_data(&self) -> &ScenarioMarketData {
        &self.market_data
    }

    /// Consumes the result, returning the built market data.
    #[inline]
    pub fn into_market_data(self) -> ScenarioMarketData {
        self.market_data
    }

    /// Returns the single-value build failures by identifier.
    #[inline]
    pub fn single_value_failures(&self) -> &HashMap<MarketDataId, BuildFailure> {
        &self.single_value_failures
    }

    /// Returns the time-series build failures by identifier.
    #[inline]
    pub fn time_series_failures(&self) -> &HashMap<MarketDataId, BuildFailure> {
        &self.time_series_failures
    }

    /// Returns true when any requested identifier failed to build.
    pub fn has_failures(&self) -> bool {
        !self.single_value_failures.is_empty() || !self.time_series_failures.is_empty()
    }
}

/// Builds scenario market data for a set of requirements.
///
/// Every single-value key is resolved against `feed` and requested from
/// `source`; the same happens for time-series keys on the time-series
/// channel. A failure to build one identifier is captured with its
/// reason and the build moves on to the next identifier.
///
/// # Errors
///
/// [`EngineError::Configuration`] when `scenario_count` is zero. Build
/// failures are not errors; they are part of the returned result.
pub fn build_scenario_market_data(
    requirements: &CalculationRequirements,
    feed: &MarketDataFeed,
    source: &dyn MarketDataSource,
    valuation_date: Date,
    scenario_count: usize,
) -> Result<ScenarioMarketDataResult, EngineError> {
    let mut market_data =
        ScenarioMarketData::new(valuation_date, scenario_count, feed.clone())?;
    let mut single_value_failures = HashMap::new();
    let mut time_series_failures = HashMap::new();

    for key in requirements.single_value_requirements() {
        let id = key.to_market_data_id(feed.clone());
        match source.scenario_value(&id, scenario_count) {
            Ok(value) => {
                // Guard against sources that ignore the requested count
                if let Some(count) = value.per_scenario_count() {
                    if count != scenario_count {
                        let failure = BuildFailure::invalid(format!(
                            "{} per-scenario values, expected {}",
                            count, scenario_count
                        ));
                        single_value_failures.insert(id.clone(), failure.clone());
                        market_data = market_data.with_value_failure(id, failure);
                        continue;
                    }
                }
                market_data = market_data.with_value(id, value)?;
            }
            Err(failure) => {
                single_value_failures.insert(id.clone(), failure.clone());
                market_data = market_data.with_value_failure(id, failure);
            }
        }
    }

    for key in requirements.time_series_requirements() {
        let id = key.to_market_data_id(feed.clone());
        match source.time_series(&id) {
            Ok(series) => {
                market_data = market_data.with_time_series(id, series);
            }
            Err(failure) => {
                time_series_failures.insert(id.clone(), failure.clone());
                market_data = market_data.with_time_series_failure(id, failure);
            }
        }
    }

    Ok(ScenarioMarketDataResult {
        market_data,
        single_value_failures,
        time_series_failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::key::MarketDataKey;
    use crate::market_data::source::MapMarketDataSource;
    use crate::market_data::value::{MarketDataValue, TimeSeries};
    use crate::market_data::ScenarioValue;
    use risk_core::market_data::curves::{CurveName, NodalCurve};
    use risk_core::types::Currency;

    fn curve(name: &str) -> NodalCurve<f64> {
        NodalCurve::new(
            CurveName::new(name),
            vec!["1Y".into(), "5Y".into()],
            vec![1.0, 5.0],
            vec![0.01, 0.015],
        )
        .unwrap()
    }

    fn valuation_date() -> Date {
        Date::from_ymd(2014, 10, 16).unwrap()
    }

    #[test]
    fn test_all_identifiers_built() {
        let feed = MarketDataFeed::no_feed();
        let usd_id =
            MarketDataKey::yield_curve(Currency::USD).to_market_data_id(feed.clone());
        let eur_id =
            MarketDataKey::yield_curve(Currency::EUR).to_market_data_id(feed.clone());

        let source = MapMarketDataSource::new()
            .with_value(
                usd_id,
                ScenarioValue::single(MarketDataValue::yield_curve(curve("USD Discount"))),
            )
            .with_value(
                eur_id,
                ScenarioValue::single(MarketDataValue::yield_curve(curve("EUR Discount"))),
            );

        let requirements = CalculationRequirements::empty().with_single_values([
            MarketDataKey::yield_curve(Currency::USD),
            MarketDataKey::yield_curve(Currency::EUR),
        ]);

        let result =
            build_scenario_market_data(&requirements, &feed, &source, valuation_date(), 1)
                .unwrap();

        assert!(!result.has_failures());
        assert_eq!(result.market_data().built_value_ids().count(), 2);
    }

    #[test]
    fn test_partial_failure_does_not_abort() {
        let feed = MarketDataFeed::no_feed();
        let usd_id =
            MarketDataKey::yield_curve(Currency::USD).to_market_data_id(feed.clone());

        // Source only knows USD; EUR will fail
        let source = MapMarketDataSource::new().with_value(
            usd_id,
            ScenarioValue::single(MarketDataValue::yield_curve(curve("USD Discount"))),
        );

        let requirements = CalculationRequirements::empty().with_single_values([
            MarketDataKey::yield_curve(Currency::USD),
            MarketDataKey::yield_curve(Currency::EUR),
        ]);

        let result =
            build_scenario_market_data(&requirements, &feed, &source, valuation_date(), 1)
                .unwrap();

        assert!(result.has_failures());
        assert_eq!(result.single_value_failures().len(), 1);
        assert_eq!(result.market_data().built_value_ids().count(), 1);

        let eur_id =
            MarketDataKey::yield_curve(Currency::EUR).to_market_data_id(feed.clone());
        assert!(result.single_value_failures().contains_key(&eur_id));
    }

    #[test]
    fn test_failed_identifier_lookup_preserves_reason() {
        let feed = MarketDataFeed::no_feed();
        let source = MapMarketDataSource::new();
        let requirements = CalculationRequirements::empty()
            .with_single_value(MarketDataKey::yield_curve(Currency::USD));

        let result =
            build_scenario_market_data(&requirements, &feed, &source, valuation_date(), 1)
                .unwrap();

        let view = result.market_data().scenario(0).unwrap();
        match view.yield_curve(Currency::USD) {
            Err(EngineError::FailedMarketData { failure, .. }) => {
                assert!(failure.message().contains("no market data"));
            }
            other => panic!("Expected FailedMarketData, got {:?}", other),
        }
    }

    #[test]
    fn test_time_series_channel_separated() {
        let feed = MarketDataFeed::no_feed();
        let usd_key = MarketDataKey::yield_curve(Currency::USD);
        let usd_id = usd_key.to_market_data_id(feed.clone());

        // Single value present, time series absent
        let source = MapMarketDataSource::new().with_value(
            usd_id.clone(),
            ScenarioValue::single(MarketDataValue::yield_curve(curve("USD Discount"))),
        );

        let requirements = CalculationRequirements::empty()
            .with_single_value(usd_key.clone())
            .with_time_series(usd_key);

        let result =
            build_scenario_market_data(&requirements, &feed, &source, valuation_date(), 1)
                .unwrap();

        assert!(result.single_value_failures().is_empty());
        assert_eq!(result.time_series_failures().len(), 1);
        assert!(result.time_series_failures().contains_key(&usd_id));

        // The built value is still usable
        let view = result.market_data().scenario(0).unwrap();
        assert!(view.yield_curve(Currency::USD).is_ok());
    }

    #[test]
    fn test_time_series_built() {
        let feed = MarketDataFeed::no_feed();
        let usd_key = MarketDataKey::yield_curve(Currency::USD);
        let usd_id = usd_key.to_market_data_id(feed.clone());

        let series = TimeSeries::new(vec![(valuation_date(), 0.01)]);
        let source = MapMarketDataSource::new().with_time_series(usd_id, series);

        let requirements = CalculationRequirements::empty().with_time_series(usd_key.clone());
        let result =
            build_scenario_market_data(&requirements, &feed, &source, valuation_date(), 1)
                .unwrap();

        assert!(!result.has_failures());
        let view = result.market_data().scenario(0).unwrap();
        assert_eq!(view.time_series(&usd_key).unwrap().len(), 1);
    }

    mod partition_property {
        use super::*;
        use proptest::prelude::*;

        // A source that fails exactly the currencies in `failing`
        fn subset_source(
            feed: &MarketDataFeed,
            all: &[Currency],
            failing: &[Currency],
        ) -> MapMarketDataSource {
            let mut source = MapMarketDataSource::new();
            for ccy in all {
                if !failing.contains(ccy) {
                    let id =
                        MarketDataKey::yield_curve(*ccy).to_market_data_id(feed.clone());
                    source = source.with_value(
                        id,
                        ScenarioValue::single(MarketDataValue::yield_curve(curve(
                            &format!("{} Discount", ccy),
                        ))),
                    );
                }
            }
            source
        }

        proptest! {
            #[test]
            fn built_and_failed_partition_the_requested_set(
                failing_mask in proptest::collection::vec(any::<bool>(), 5)
            ) {
                let all = [
                    Currency::USD,
                    Currency::EUR,
                    Currency::GBP,
                    Currency::JPY,
                    Currency::CHF,
                ];
                let failing: Vec<Currency> = all
                    .iter()
                    .zip(&failing_mask)
                    .filter(|(_, &fail)| fail)
                    .map(|(ccy, _)| *ccy)
                    .collect();

                let feed = MarketDataFeed::no_feed();
                let source = subset_source(&feed, &all, &failing);
                let requirements = CalculationRequirements::empty()
                    .with_single_values(all.iter().map(|c| MarketDataKey::yield_curve(*c)));

                let result = build_scenario_market_data(
                    &requirements,
                    &feed,
                    &source,
                    valuation_date(),
                    1,
                )
                .unwrap();

                let built: std::collections::HashSet<_> =
                    result.market_data().built_value_ids().cloned().collect();
                let failed: std::collections::HashSet<_> =
                    result.single_value_failures().keys().cloned().collect();

                // Pairwise disjoint
                prop_assert!(built.is_disjoint(&failed));

                // Union equals the requested set
                let requested: std::collections::HashSet<_> = all
                    .iter()
                    .map(|c| MarketDataKey::yield_curve(*c).to_market_data_id(feed.clone()))
                    .collect();
                let union: std::collections::HashSet<_> =
                    built.union(&failed).cloned().collect();
                prop_assert_eq!(union, requested);

                // Failure count matches the failing subset
                prop_assert_eq!(failed.len(), failing.len());
            }
        }
    }
}
