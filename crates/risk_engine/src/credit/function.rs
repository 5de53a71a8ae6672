//! The CDS calculation function.
//!
//! [`CdsFunction`] implements the calculation-function contract for CDS
//! trades: it derives market-data requirements from the trade's legs and
//! reference-entity classification, fans execution out across scenario
//! indices and delegates the actual valuation to a [`CdsPricer`]
//! strategy. Currency conversion, when enabled, is applied to each
//! per-scenario result as it is collected.

use risk_core::market_data::curves::{CreditCurve, NodalCurve};
use risk_core::types::Currency;

use super::reference::ReferenceInformation;
use super::trade::{CdsTrade, ExpandedCds};
use crate::error::EngineError;
use crate::function::{
    execute_per_scenario, CalculationFunction, CalculationResult, ParallelConfig,
    ScenarioResults,
};
use crate::market_data::key::MarketDataKey;
use crate::market_data::scenario::{ScenarioMarketData, SingleScenarioMarketData};
use crate::requirements::CalculationRequirements;

/// The per-product valuation strategy supplied to a [`CdsFunction`].
///
/// Implementations are the pricing model itself; the function only fixes
/// the signature: the expanded product, the resolved yield and credit
/// curves and the single-scenario market data go in, one typed result
/// comes out.
pub trait CdsPricer {
    /// The per-scenario result type this pricer produces.
    type Output: CalculationResult + Send;

    /// Values one expanded CDS against resolved curve data.
    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        market: &SingleScenarioMarketData<'_>,
    ) -> Result<Self::Output, EngineError>;
}

/// Calculates one result per scenario for a CDS trade.
///
/// # Examples
///
/// ```no_run
/// use risk_engine::credit::{CdsFunction, CdsTrade};
/// use risk_engine::credit::measures::PresentValuePricer;
/// use risk_engine::function::CalculationFunction;
/// # fn demo(trade: &CdsTrade, market: &risk_engine::market_data::ScenarioMarketData) {
/// let function = CdsFunction::new(PresentValuePricer);
/// let requirements = function.requirements(trade).unwrap();
/// let results = function.execute(trade, market).unwrap();
/// assert_eq!(results.scenario_count(), market.scenario_count());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CdsFunction<P> {
    /// The valuation strategy
    pricer: P,
    /// Whether to convert results into the reporting currency
    convert_currencies: bool,
    /// Scenario fan-out configuration
    parallel: ParallelConfig,
}

impl<P> CdsFunction<P> {
    /// Creates a function whose results support automatic currency
    /// conversion when the underlying result type does.
    pub fn new(pricer: P) -> Self {
        Self {
            pricer,
            convert_currencies: true,
            parallel: ParallelConfig::default(),
        }
    }

    /// Sets whether results are converted into the reporting currency.
    #[must_use]
    pub fn with_currency_conversion(mut self, convert_currencies: bool) -> Self {
        self.convert_currencies = convert_currencies;
        self
    }

    /// Sets the scenario fan-out configuration.
    #[must_use]
    pub fn with_parallel_config(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }
}

impl<P: CdsPricer + Sync> CdsFunction<P> {
    // Per-scenario execution: resolve the two curves, expand, price.
    fn execute_single(
        &self,
        trade: &CdsTrade,
        view: &SingleScenarioMarketData<'_>,
    ) -> Result<P::Output, EngineError> {
        let notional_currency = trade.product().fee_leg().notional().currency();
        let yield_curve = view.yield_curve(notional_currency)?;
        let credit_curve = view.credit_curve(trade.product().reference())?;
        let expanded = trade.product().expand(view.valuation_date())?;
        self.pricer
            .price(&expanded, &yield_curve, &credit_curve, view)
    }
}

impl<P: CdsPricer + Sync> CalculationFunction for CdsFunction<P> {
    type Target = CdsTrade;
    type Result = P::Output;

    /// Derives requirements from trade content alone.
    ///
    /// One yield-curve key per distinct currency referenced by the
    /// notional and upfront-fee legs, plus the credit-curve key implied
    /// by the reference type; output currencies are exactly the leg
    /// currencies.
    fn requirements(&self, trade: &CdsTrade) -> Result<CalculationRequirements, EngineError> {
        let notional_currency = trade.product().fee_leg().notional().currency();
        let fee_currency = trade.product().fee_leg().upfront_fee().currency();

        let credit_key = match trade.product().reference() {
            ReferenceInformation::SingleName(r) => {
                MarketDataKey::single_name_credit_curve(r.clone())
            }
            ReferenceInformation::Index(r) => MarketDataKey::index_credit_curve(r.clone()),
        };

        Ok(CalculationRequirements::empty()
            .with_single_values([
                MarketDataKey::yield_curve(notional_currency),
                MarketDataKey::yield_curve(fee_currency),
            ])
            .with_single_value(credit_key)
            .with_output_currencies([notional_currency, fee_currency]))
    }

    fn execute(
        &self,
        trade: &CdsTrade,
        market: &ScenarioMarketData,
    ) -> Result<ScenarioResults<P::Output>, EngineError> {
        let reporting = self.default_reporting_currency(trade);
        execute_per_scenario(market, self.parallel, |view| {
            let result = self.execute_single(trade, view)?;
            match (self.convert_currencies, reporting) {
                (true, Some(currency)) => result.into_reporting_currency(currency, view),
                _ => Ok(result),
            }
        })
    }

    /// The currency implied by the trade's notional leg.
    fn default_reporting_currency(&self, trade: &CdsTrade) -> Option<Currency> {
        Some(trade.product().fee_leg().notional().currency())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::measures::PresentValuePricer;
    use crate::credit::reference::{IndexReference, Seniority, SingleNameReference};
    use crate::credit::trade::{Cds, FeeLeg, TradeId};
    use risk_core::types::{CurrencyAmount, Date};

    fn trade(notional_ccy: Currency, fee_ccy: Currency) -> CdsTrade {
        CdsTrade::new(
            TradeId::new("T-001"),
            Cds::new(
                FeeLeg::new(
                    CurrencyAmount::new(10_000_000.0, notional_ccy),
                    CurrencyAmount::new(50_000.0, fee_ccy),
                ),
                0.01,
                Date::from_ymd(2019, 12, 20).unwrap(),
                0.4,
                ReferenceInformation::SingleName(SingleNameReference::new(
                    "ACME Corp",
                    Seniority::Senior,
                    Currency::USD,
                )),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_requirements_single_currency_legs() {
        let function = CdsFunction::new(PresentValuePricer);
        let requirements = function.requirements(&trade(Currency::USD, Currency::USD)).unwrap();

        // One yield curve (legs share a currency) plus one credit curve
        assert_eq!(requirements.single_value_requirements().len(), 2);
        assert_eq!(requirements.output_currencies().len(), 1);
        assert!(requirements
            .single_value_requirements()
            .contains(&MarketDataKey::yield_curve(Currency::USD)));
    }

    #[test]
    fn test_requirements_mixed_currency_legs() {
        let function = CdsFunction::new(PresentValuePricer);
        let requirements = function.requirements(&trade(Currency::USD, Currency::EUR)).unwrap();

        // Two yield curves plus one credit curve
        assert_eq!(requirements.single_value_requirements().len(), 3);
        assert_eq!(requirements.output_currencies().len(), 2);
        assert!(requirements
            .single_value_requirements()
            .contains(&MarketDataKey::yield_curve(Currency::EUR)));
    }

    #[test]
    fn test_requirements_index_reference() {
        let function = CdsFunction::new(PresentValuePricer);
        let index_trade = CdsTrade::new(
            TradeId::new("T-002"),
            Cds::new(
                FeeLeg::new(
                    CurrencyAmount::new(5_000_000.0, Currency::USD),
                    CurrencyAmount::zero(Currency::USD),
                ),
                0.005,
                Date::from_ymd(2019, 12, 20).unwrap(),
                0.3,
                ReferenceInformation::Index(IndexReference::new("CDX.NA.IG", 23, 1)),
            )
            .unwrap(),
        );

        let requirements = function.requirements(&index_trade).unwrap();
        let reference = IndexReference::new("CDX.NA.IG", 23, 1);
        assert!(requirements
            .single_value_requirements()
            .contains(&MarketDataKey::index_credit_curve(reference)));
    }

    #[test]
    fn test_default_reporting_currency_is_notional_currency() {
        let function = CdsFunction::new(PresentValuePricer);
        assert_eq!(
            function.default_reporting_currency(&trade(Currency::EUR, Currency::USD)),
            Some(Currency::EUR)
        );
    }
}
