//! Scenario market data and the single-scenario view.
//!
//! [`ScenarioMarketData`] holds N parallel market-data scenarios. A value
//! is either shared across all scenarios or supplied per scenario; a
//! [`SingleScenarioMarketData`] view binds a fixed index so that code
//! written against single-scenario semantics works unchanged.
//!
//! Lookups preserve the failure model: asking for an identifier whose
//! build failed yields the original [`BuildFailure`] wrapped in a typed
//! error, and asking for an identifier that was never requested is
//! reported as misuse rather than as a data gap.

use std::collections::HashMap;
use std::sync::Arc;

use risk_core::market_data::curves::{CreditCurve, NodalCurve};
use risk_core::types::{Currency, CurrencyPair, Date};

use super::key::{MarketDataFeed, MarketDataId, MarketDataKey};
use super::source::BuildFailure;
use super::value::{MarketDataValue, TimeSeries};
use crate::credit::reference::ReferenceInformation;
use crate::error::EngineError;

/// A value shaped for N scenarios: shared or per-scenario.
#[derive(Debug, Clone)]
pub enum ScenarioValue {
    /// One value shared by every scenario.
    Single(MarketDataValue),
    /// One value per scenario, indexed by scenario index.
    PerScenario(Vec<MarketDataValue>),
}

impl ScenarioValue {
    /// Creates a value shared by every scenario.
    #[inline]
    pub fn single(value: MarketDataValue) -> Self {
        ScenarioValue::Single(value)
    }

    /// Creates a per-scenario value vector.
    #[inline]
    pub fn per_scenario(values: Vec<MarketDataValue>) -> Self {
        ScenarioValue::PerScenario(values)
    }

    /// Returns the vector length for per-scenario values, `None` for
    /// shared values (which fit any scenario count).
    #[inline]
    pub fn per_scenario_count(&self) -> Option<usize> {
        match self {
            ScenarioValue::Single(_) => None,
            ScenarioValue::PerScenario(values) => Some(values.len()),
        }
    }

    /// Returns the value seen by scenario `index`.
    ///
    /// The index must already be validated against the scenario count;
    /// shared values ignore it.
    fn value_at(&self, index: usize) -> &MarketDataValue {
        match self {
            ScenarioValue::Single(value) => value,
            ScenarioValue::PerScenario(values) => &values[index],
        }
    }
}

/// An indexed collection of N parallel market-data scenarios.
///
/// Immutable once built; assembled by
/// [`build_scenario_market_data`](super::result::build_scenario_market_data)
/// or directly through the `with_*` builder operations in tests and demos.
#[derive(Debug, Clone)]
pub struct ScenarioMarketData {
    /// Valuation date shared by all scenarios
    valuation_date: Date,
    /// Number of scenarios, at least 1
    scenario_count: usize,
    /// Feed the identifiers were resolved against
    feed: MarketDataFeed,
    /// Built values keyed by identifier
    values: HashMap<MarketDataId, ScenarioValue>,
    /// Built time series keyed by identifier
    time_series: HashMap<MarketDataId, TimeSeries>,
    /// Identifiers whose single-value build failed, with reasons
    value_failures: HashMap<MarketDataId, BuildFailure>,
    /// Identifiers whose time-series build failed, with reasons
    time_series_failures: HashMap<MarketDataId, BuildFailure>,
}

impl ScenarioMarketData {
    /// Creates empty scenario market data.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] when `scenario_count` is zero.
    pub fn new(
        valuation_date: Date,
        scenario_count: usize,
        feed: MarketDataFeed,
    ) -> Result<Self, EngineError> {
        if scenario_count == 0 {
            return Err(EngineError::Configuration(
                "scenario count must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            valuation_date,
            scenario_count,
            feed,
            values: HashMap::new(),
            time_series: HashMap::new(),
            value_failures: HashMap::new(),
            time_series_failures: HashMap::new(),
        })
    }

    /// Returns the number of scenarios.
    #[inline]
    pub fn scenario_count(&self) -> usize {
        self.scenario_count
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the feed identifiers are resolved against.
    #[inline]
    pub fn feed(&self) -> &MarketDataFeed {
        &self.feed
    }

    /// Adds a built value.
    ///
    /// # Errors
    ///
    /// [`EngineError::ScenarioCountMismatch`] when a per-scenario vector
    /// does not match the scenario count.
    #[must_use = "with_value returns a new ScenarioMarketData"]
    pub fn with_value(
        mut self,
        id: MarketDataId,
        value: ScenarioValue,
    ) -> Result<Self, EngineError> {
        if let Some(count) = value.per_scenario_count() {
            if count != self.scenario_count {
                return Err(EngineError::ScenarioCountMismatch {
                    id,
                    expected: self.scenario_count,
                    got: count,
                });
            }
        }
        self.values.insert(id, value);
        Ok(self)
    }

    /// Adds a built time series.
    #[must_use]
    pub fn with_time_series(mut self, id: MarketDataId, series: TimeSeries) -> Self {
        self.time_series.insert(id, series);
        self
    }

    /// Records a single-value build failure for later lookups.
    #[must_use]
    pub fn with_value_failure(mut self, id: MarketDataId, failure: BuildFailure) -> Self {
        self.value_failures.insert(id, failure);
        self
    }

    /// Records a time-series build failure for later lookups.
    #[must_use]
    pub fn with_time_series_failure(mut self, id: MarketDataId, failure: BuildFailure) -> Self {
        self.time_series_failures.insert(id, failure);
        self
    }

    /// Returns the identifiers of successfully built values.
    pub fn built_value_ids(&self) -> impl Iterator<Item = &MarketDataId> {
        self.values.keys()
    }

    /// Looks up the value for `id` as seen by scenario `index`.
    ///
    /// # Errors
    ///
    /// * [`EngineError::ScenarioIndexOutOfBounds`] for a bad index
    /// * [`EngineError::FailedMarketData`] when the build failed, with
    ///   the original reason
    /// * [`EngineError::NotRequested`] when the identifier was never part
    ///   of the requested set
    pub fn value_by_id(
        &self,
        id: &MarketDataId,
        index: usize,
    ) -> Result<&MarketDataValue, EngineError> {
        if index >= self.scenario_count {
            return Err(EngineError::ScenarioIndexOutOfBounds {
                index,
                count: self.scenario_count,
            });
        }
        if let Some(failure) = self.value_failures.get(id) {
            return Err(EngineError::FailedMarketData {
                id: id.clone(),
                failure: failure.clone(),
            });
        }
        match self.values.get(id) {
            Some(value) => Ok(value.value_at(index)),
            None => Err(EngineError::NotRequested { id: id.clone() }),
        }
    }

    /// Looks up the time series for `id`.
    ///
    /// Errors follow [`ScenarioMarketData::value_by_id`], using the
    /// time-series failure channel.
    pub fn time_series_by_id(&self, id: &MarketDataId) -> Result<&TimeSeries, EngineError> {
        if let Some(failure) = self.time_series_failures.get(id) {
            return Err(EngineError::FailedMarketData {
                id: id.clone(),
                failure: failure.clone(),
            });
        }
        match self.time_series.get(id) {
            Some(series) => Ok(series),
            None => Err(EngineError::NotRequested { id: id.clone() }),
        }
    }

    /// Returns the single-scenario view bound to `index`.
    ///
    /// # Errors
    ///
    /// [`EngineError::ScenarioIndexOutOfBounds`] for a bad index.
    pub fn scenario(&self, index: usize) -> Result<SingleScenarioMarketData<'_>, EngineError> {
        if index >= self.scenario_count {
            return Err(EngineError::ScenarioIndexOutOfBounds {
                index,
                count: self.scenario_count,
            });
        }
        Ok(SingleScenarioMarketData { data: self, index })
    }
}

/// A view of one scenario's market data under single-value semantics.
///
/// All lookups resolve keys against the underlying data's feed and bind
/// the fixed scenario index, so per-product code never sees scenario
/// indexing.
#[derive(Debug, Clone, Copy)]
pub struct SingleScenarioMarketData<'a> {
    /// The underlying scenario market data
    data: &'a ScenarioMarketData,
    /// The bound scenario index
    index: usize,
}

impl<'a> SingleScenarioMarketData<'a> {
    /// Returns the bound scenario index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.data.valuation_date()
    }

    /// Looks up the value for a key.
    pub fn value(&self, key: &MarketDataKey) -> Result<&'a MarketDataValue, EngineError> {
        let id = key.to_market_data_id(self.data.feed().clone());
        self.data.value_by_id(&id, self.index)
    }

    /// Looks up the time series for a key.
    pub fn time_series(&self, key: &MarketDataKey) -> Result<&'a TimeSeries, EngineError> {
        let id = key.to_market_data_id(self.data.feed().clone());
        self.data.time_series_by_id(&id)
    }

    /// Looks up the yield curve of a currency.
    ///
    /// # Errors
    ///
    /// [`EngineError::WrongDataType`] when the identifier resolves to a
    /// value that is not a yield curve.
    pub fn yield_curve(&self, currency: Currency) -> Result<Arc<NodalCurve<f64>>, EngineError> {
        let key = MarketDataKey::yield_curve(currency);
        match self.value(&key)? {
            MarketDataValue::YieldCurve(curve) => Ok(Arc::clone(curve)),
            _ => Err(EngineError::WrongDataType {
                id: key.to_market_data_id(self.data.feed().clone()),
                expected: "yield curve",
            }),
        }
    }

    /// Looks up the credit curve implied by reference information.
    ///
    /// Dispatches exhaustively on the reference category.
    pub fn credit_curve(
        &self,
        reference: &ReferenceInformation,
    ) -> Result<Arc<CreditCurve<f64>>, EngineError> {
        let key = match reference {
            ReferenceInformation::SingleName(r) => {
                MarketDataKey::single_name_credit_curve(r.clone())
            }
            ReferenceInformation::Index(r) => MarketDataKey::index_credit_curve(r.clone()),
        };
        match self.value(&key)? {
            MarketDataValue::CreditCurve(curve) => Ok(Arc::clone(curve)),
            _ => Err(EngineError::WrongDataType {
                id: key.to_market_data_id(self.data.feed().clone()),
                expected: "credit curve",
            }),
        }
    }

    /// Looks up the FX rate converting `pair.base()` into `pair.quote()`.
    ///
    /// Identity pairs convert at 1 without a lookup; when only the
    /// inverse pair is held, its reciprocal is used.
    pub fn fx_rate(&self, pair: CurrencyPair) -> Result<f64, EngineError> {
        if pair.is_identity() {
            return Ok(1.0);
        }
        match self.value(&MarketDataKey::fx_rate(pair)) {
            Ok(MarketDataValue::FxRate(rate)) => return Ok(*rate),
            Ok(_) => {
                return Err(EngineError::WrongDataType {
                    id: MarketDataKey::fx_rate(pair)
                        .to_market_data_id(self.data.feed().clone()),
                    expected: "FX rate",
                })
            }
            Err(EngineError::NotRequested { .. }) => {}
            Err(err) => return Err(err),
        }
        match self.value(&MarketDataKey::fx_rate(pair.inverse())) {
            Ok(MarketDataValue::FxRate(rate)) if *rate != 0.0 => Ok(1.0 / rate),
            Ok(_) => Err(EngineError::MissingFxRate { pair }),
            Err(EngineError::NotRequested { .. }) => {
                Err(EngineError::MissingFxRate { pair })
            }
            Err(err) => Err(err),
        }
    }
}
