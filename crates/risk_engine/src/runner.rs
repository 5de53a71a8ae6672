//! Per-trade measure orchestration.
//!
//! [`run_measures`] computes a set of measures for a set of trades
//! against assembled scenario market data. Failures are isolated per
//! trade and per measure: a configuration error or market-data gap on
//! one trade's measure is recorded in the report row and logged with the
//! trade identity and cause, and processing moves on. Nothing is ever
//! silently substituted with zero.

use tracing::{debug, warn};

use crate::credit::measures::{
    BucketedCs01Pricer, BucketedIr01Pricer, ParallelCs01Pricer, ParallelIr01Pricer,
    PresentValuePricer,
};
use crate::credit::{CdsFunction, CdsTrade, TradeId};
use crate::error::EngineError;
use crate::function::{CalculationFunction, ScenarioResults};
use crate::market_data::scenario::ScenarioMarketData;
use crate::measures::{Measure, MeasureValue};

/// One trade's computed measures, with per-measure outcomes.
#[derive(Debug)]
pub struct TradeMeasureReport {
    /// The trade the row reports on
    trade_id: TradeId,
    /// Outcome per requested measure, in request order
    measures: Vec<(Measure, Result<ScenarioResults<MeasureValue>, EngineError>)>,
}

impl TradeMeasureReport {
    /// Returns the trade identifier.
    #[inline]
    pub fn trade_id(&self) -> &TradeId {
        &self.trade_id
    }

    /// Returns the per-measure outcomes in request order.
    #[inline]
    pub fn measures(&self) -> &[(Measure, Result<ScenarioResults<MeasureValue>, EngineError>)] {
        &self.measures
    }

    /// Returns the outcome for one measure, if it was requested.
    pub fn measure(
        &self,
        measure: Measure,
    ) -> Option<&Result<ScenarioResults<MeasureValue>, EngineError>> {
        self.measures
            .iter()
            .find(|(m, _)| *m == measure)
            .map(|(_, outcome)| outcome)
    }

    /// Returns true when every requested measure computed successfully.
    pub fn is_complete(&self) -> bool {
        self.measures.iter().all(|(_, outcome)| outcome.is_ok())
    }
}

/// Computes one measure for one trade across all scenarios.
pub fn compute_measure(
    measure: Measure,
    trade: &CdsTrade,
    market: &ScenarioMarketData,
) -> Result<ScenarioResults<MeasureValue>, EngineError> {
    match measure {
        Measure::PresentValue => CdsFunction::new(PresentValuePricer)
            .execute(trade, market)
            .map(|results| results.map(MeasureValue::Amount)),
        Measure::Ir01ParallelPar => CdsFunction::new(ParallelIr01Pricer)
            .execute(trade, market)
            .map(|results| results.map(MeasureValue::Scalar)),
        Measure::Ir01BucketedPar => CdsFunction::new(BucketedIr01Pricer)
            .execute(trade, market)
            .map(|results| results.map(MeasureValue::Vector)),
        Measure::Cs01ParallelPar => CdsFunction::new(ParallelCs01Pricer)
            .execute(trade, market)
            .map(|results| results.map(MeasureValue::Scalar)),
        Measure::Cs01BucketedPar => CdsFunction::new(BucketedCs01Pricer)
            .execute(trade, market)
            .map(|results| results.map(MeasureValue::Labelled)),
    }
}

/// Computes `measures` for every trade, isolating failures per trade and
/// per measure.
///
/// Each failure is logged with the trade identity and cause and recorded
/// in the report row; it never aborts the other trades or measures.
pub fn run_measures(
    trades: &[CdsTrade],
    measures: &[Measure],
    market: &ScenarioMarketData,
) -> Vec<TradeMeasureReport> {
    trades
        .iter()
        .map(|trade| {
            let outcomes = measures
                .iter()
                .map(|&measure| {
                    let outcome = compute_measure(measure, trade, market);
                    match &outcome {
                        Ok(results) => debug!(
                            trade = %trade.id(),
                            measure = %measure,
                            scenarios = results.scenario_count(),
                            "measure computed"
                        ),
                        Err(cause) => warn!(
                            trade = %trade.id(),
                            measure = %measure,
                            %cause,
                            "measure failed"
                        ),
                    }
                    (measure, outcome)
                })
                .collect();
            TradeMeasureReport {
                trade_id: trade.id().clone(),
                measures: outcomes,
            }
        })
        .collect()
}
