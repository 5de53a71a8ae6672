//! The calculation-function contract.
//!
//! A calculation function declares its market data via `requirements`
//! and is executed once per scenario against a single-scenario view.
//! This module provides:
//! - [`CalculationFunction`]: The polymorphic contract
//! - [`CalculationResult`]: Per-scenario result values with optional
//!   currency-conversion support
//! - [`ScenarioResults`]: The ordered per-scenario result collection
//! - [`execute_per_scenario`]: The default N-way fan-out, parallelised
//!   through rayon above a configurable threshold

use rayon::prelude::*;

use risk_core::types::{Currency, CurrencyAmount, CurrencyPair};

use crate::error::EngineError;
use crate::market_data::scenario::{ScenarioMarketData, SingleScenarioMarketData};
use crate::requirements::CalculationRequirements;

/// A per-scenario result value.
///
/// The single operation expresses optional automatic currency
/// conversion: the default implementation passes the value through
/// unchanged (the type does not support conversion), while monetary
/// types override it to convert using the scenario's FX rates.
pub trait CalculationResult: Sized {
    /// Converts this result into the reporting currency, when supported.
    ///
    /// The default implementation returns the value unconverted.
    fn into_reporting_currency(
        self,
        _reporting: Currency,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<Self, EngineError> {
        Ok(self)
    }
}

impl CalculationResult for f64 {}
impl CalculationResult for Vec<f64> {}
impl CalculationResult for Vec<(String, f64)> {}

impl CalculationResult for CurrencyAmount {
    /// Converts the amount using the scenario's FX rate for
    /// `(amount currency, reporting)`.
    fn into_reporting_currency(
        self,
        reporting: Currency,
        market: &SingleScenarioMarketData<'_>,
    ) -> Result<Self, EngineError> {
        if self.currency() == reporting {
            return Ok(self);
        }
        let pair = CurrencyPair::new(self.currency(), reporting);
        let rate = market.fx_rate(pair)?;
        Ok(CurrencyAmount::new(self.amount() * rate, reporting))
    }
}

/// Ordered per-scenario results, one entry per scenario index.
///
/// # Examples
///
/// ```
/// use risk_engine::function::ScenarioResults;
///
/// let results = ScenarioResults::of(vec![1.0, 2.0, 3.0]);
/// assert_eq!(results.scenario_count(), 3);
/// assert_eq!(results.get(1), Some(&2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResults<R> {
    /// Results in scenario-index order
    results: Vec<R>,
}

impl<R> ScenarioResults<R> {
    /// Wraps results already in scenario-index order.
    #[inline]
    pub fn of(results: Vec<R>) -> Self {
        Self { results }
    }

    /// Returns the number of scenarios.
    #[inline]
    pub fn scenario_count(&self) -> usize {
        self.results.len()
    }

    /// Returns the result for scenario `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.results.get(index)
    }

    /// Iterates results in scenario-index order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.results.iter()
    }

    /// Maps every per-scenario result, preserving order.
    pub fn map<S>(self, f: impl FnMut(R) -> S) -> ScenarioResults<S> {
        ScenarioResults {
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

impl<R> IntoIterator for ScenarioResults<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// The contract every calculation function implements.
///
/// `requirements` is pure; `execute` produces one result per scenario
/// index, in index order.
pub trait CalculationFunction {
    /// The trade or position type this function calculates for.
    type Target;
    /// The per-scenario result type.
    type Result: CalculationResult;

    /// Derives the market data this calculation needs from trade content.
    fn requirements(&self, target: &Self::Target)
        -> Result<CalculationRequirements, EngineError>;

    /// Executes the calculation once per scenario, in index order.
    fn execute(
        &self,
        target: &Self::Target,
        market: &ScenarioMarketData,
    ) -> Result<ScenarioResults<Self::Result>, EngineError>;

    /// The currency results are reported in by default, when the trade
    /// implies one.
    fn default_reporting_currency(&self, _target: &Self::Target) -> Option<Currency> {
        None
    }
}

/// Configuration for the scenario fan-out.
#[derive(Clone, Copy, Debug)]
pub struct ParallelConfig {
    /// Minimum scenario count before using rayon
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 64,
        }
    }
}

impl ParallelConfig {
    /// Returns whether to use parallel execution for `n_items` tasks.
    #[inline]
    pub fn should_parallelise(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// Runs `per_scenario` once for every scenario index, in index order.
///
/// Each invocation receives the immutable single-scenario view bound to
/// its index; no task shares mutable state with another, so the fan-out
/// runs through rayon when the scenario count passes the configured
/// threshold. The first error aborts the whole execution.
pub fn execute_per_scenario<R, F>(
    market: &ScenarioMarketData,
    config: ParallelConfig,
    per_scenario: F,
) -> Result<ScenarioResults<R>, EngineError>
where
    R: Send,
    F: Fn(&SingleScenarioMarketData<'_>) -> Result<R, EngineError> + Sync,
{
    let n = market.scenario_count();
    let run = |index: usize| -> Result<R, EngineError> {
        let view = market.scenario(index)?;
        per_scenario(&view)
    };

    let results: Result<Vec<R>, EngineError> = if config.should_parallelise(n) {
        (0..n).into_par_iter().map(run).collect()
    } else {
        (0..n).map(run).collect()
    };
    Ok(ScenarioResults::of(results?))
}
