//! Engine error types.
//!
//! This module provides [`EngineError`], the error type for scenario
//! market data lookups, calculation-function execution and currency
//! conversion. Expected market-data build failures are *not* errors at
//! assembly time (they are captured per identifier in the build result);
//! they only surface as [`EngineError::FailedMarketData`] when a consumer
//! later asks for the failed value.

use thiserror::Error;

use risk_core::market_data::MarketDataError;
use risk_core::types::{CurrencyError, CurrencyPair};

use crate::market_data::key::MarketDataId;
use crate::market_data::source::BuildFailure;

/// Errors raised by the scenario calculation engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The identifier was requested but its value could not be built;
    /// the original build reason is preserved.
    #[error("Market data for {id} failed to build: {failure}")]
    FailedMarketData {
        /// The identifier whose build failed
        id: MarketDataId,
        /// The captured build failure
        failure: BuildFailure,
    },

    /// The identifier was never part of the requested set. Signals
    /// programming-level misuse rather than a data gap.
    #[error("Market data for {id} was never requested")]
    NotRequested {
        /// The identifier that was looked up
        id: MarketDataId,
    },

    /// A value exists under the identifier but has a different type than
    /// the lookup expected.
    #[error("Market data for {id} is not a {expected}")]
    WrongDataType {
        /// The identifier that was looked up
        id: MarketDataId,
        /// Short name of the expected value type
        expected: &'static str,
    },

    /// A scenario index outside `[0, scenario_count)`.
    #[error("Scenario index {index} out of bounds for {count} scenarios")]
    ScenarioIndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The scenario count of the market data
        count: usize,
    },

    /// A per-scenario value vector whose length differs from the
    /// scenario count.
    #[error("Per-scenario value for {id} has {got} entries, expected {expected}")]
    ScenarioCountMismatch {
        /// The offending identifier
        id: MarketDataId,
        /// The market data's scenario count
        expected: usize,
        /// The supplied vector length
        got: usize,
    },

    /// No FX rate available for the pair (in either direction).
    #[error("No FX rate for {pair}")]
    MissingFxRate {
        /// The currency pair that was looked up
        pair: CurrencyPair,
    },

    /// A programming or configuration mismatch; fatal for the affected
    /// trade, never retried.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from the curve layer.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Error from currency arithmetic.
    #[error("Currency error: {0}")]
    Currency(#[from] CurrencyError),
}
