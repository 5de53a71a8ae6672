//! The market-data source boundary and build failures.
//!
//! A [`MarketDataSource`] is asked to produce one value (or time series)
//! per resolved identifier. Failure to produce an individual value is an
//! expected outcome, not an error: it is captured as a [`BuildFailure`]
//! and never aborts the assembly of the other identifiers.

use std::collections::HashMap;
use std::fmt;

use super::key::MarketDataId;
use super::scenario::ScenarioValue;
use super::value::TimeSeries;

/// Classification of a build failure, paired with free text for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// No data available for the identifier (e.g., no quote).
    MissingData,
    /// The data exists but calibration/derivation did not converge.
    CalibrationFailed,
    /// The data exists but is unusable (wrong shape, stale, negative...).
    Invalid,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::MissingData => "missing data",
            FailureKind::CalibrationFailed => "calibration failed",
            FailureKind::Invalid => "invalid data",
        };
        write!(f, "{}", name)
    }
}

/// The reason one identifier's value could not be built.
///
/// # Examples
///
/// ```
/// use risk_engine::market_data::BuildFailure;
///
/// let failure = BuildFailure::missing_data("no quote available");
/// assert_eq!(format!("{}", failure), "missing data: no quote available");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildFailure {
    /// Failure classification
    kind: FailureKind,
    /// Human-readable reason
    message: String,
}

impl BuildFailure {
    /// Creates a failure with the given kind and message.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a missing-data failure.
    pub fn missing_data(message: impl Into<String>) -> Self {
        Self::new(FailureKind::MissingData, message)
    }

    /// Creates a calibration failure.
    pub fn calibration_failed(message: impl Into<String>) -> Self {
        Self::new(FailureKind::CalibrationFailed, message)
    }

    /// Creates an invalid-data failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Invalid, message)
    }

    /// Returns the failure classification.
    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the human-readable reason.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// The boundary to whatever supplies raw market data.
///
/// Implementations return a [`ScenarioValue`] per identifier (either one
/// value shared across all scenarios or one value per scenario) and
/// report inability to do so as a [`BuildFailure`] rather than panicking
/// or returning defaults.
pub trait MarketDataSource {
    /// Produces the value for `id`, shaped for `scenario_count` scenarios.
    fn scenario_value(
        &self,
        id: &MarketDataId,
        scenario_count: usize,
    ) -> Result<ScenarioValue, BuildFailure>;

    /// Produces the historical time series for `id`.
    fn time_series(&self, id: &MarketDataId) -> Result<TimeSeries, BuildFailure>;
}

/// In-memory market data source backed by maps.
///
/// # Examples
///
/// ```
/// use risk_engine::market_data::{
///     MapMarketDataSource, MarketDataFeed, MarketDataKey, MarketDataSource,
///     MarketDataValue, ScenarioValue,
/// };
/// use risk_core::market_data::curves::{CurveName, NodalCurve};
/// use risk_core::types::Currency;
///
/// let curve = NodalCurve::new(
///     CurveName::new("USD Discount"),
///     vec!["1Y".into(), "5Y".into()],
///     vec![1.0, 5.0],
///     vec![0.01, 0.015],
/// )
/// .unwrap();
///
/// let id = MarketDataKey::yield_curve(Currency::USD)
///     .to_market_data_id(MarketDataFeed::no_feed());
/// let source = MapMarketDataSource::new()
///     .with_value(id.clone(), ScenarioValue::single(MarketDataValue::yield_curve(curve)));
///
/// assert!(source.scenario_value(&id, 1).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapMarketDataSource {
    /// Values keyed by identifier
    values: HashMap<MarketDataId, ScenarioValue>,
    /// Time series keyed by identifier
    time_series: HashMap<MarketDataId, TimeSeries>,
}

impl MapMarketDataSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value for an identifier.
    #[must_use]
    pub fn with_value(mut self, id: MarketDataId, value: ScenarioValue) -> Self {
        self.values.insert(id, value);
        self
    }

    /// Adds a time series for an identifier.
    #[must_use]
    pub fn with_time_series(mut self, id: MarketDataId, series: TimeSeries) -> Self {
        self.time_series.insert(id, series);
        self
    }
}

impl MarketDataSource for MapMarketDataSource {
    fn scenario_value(
        &self,
        id: &MarketDataId,
        scenario_count: usize,
    ) -> Result<ScenarioValue, BuildFailure> {
        let value = self
            .values
            .get(id)
            .cloned()
            .ok_or_else(|| BuildFailure::missing_data(format!("no market data for {}", id)))?;

        if let Some(count) = value.per_scenario_count() {
            if count != scenario_count {
                return Err(BuildFailure::invalid(format!(
                    "{} has {} per-scenario values, expected {}",
                    id, count, scenario_count
                )));
            }
        }
        Ok(value)
    }

    fn time_series(&self, id: &MarketDataId) -> Result<TimeSeries, BuildFailure> {
        self.time_series
            .get(id)
            .cloned()
            .ok_or_else(|| BuildFailure::missing_data(format!("no time series for {}", id)))
    }
}
