//! CDS measure pricers.
//!
//! Reduced-form valuation of an expanded CDS and the bump-and-revalue
//! sensitivity pricers built on it:
//! - [`PresentValuePricer`]: PV as a currency amount
//! - [`ParallelIr01Pricer`] / [`ParallelCs01Pricer`]: First-order scalar
//!   sensitivities to a uniform one-basis-point shift of all curve nodes
//! - [`BucketedIr01Pricer`]: Per-node sensitivity vector
//! - [`BucketedCs01Pricer`]: Per-node sensitivities as a labelled list
//!
//! The valuation discounts the quarterly premium leg by survival-weighted
//! discount factors and the protection leg by the default increments
//! between payment dates. It is deliberately a compact model: the
//! calculation engine only requires that the routine is deterministic in
//! its curve inputs.

use risk_core::market_data::curves::{CreditCurve, NodalCurve};
use risk_core::types::CurrencyAmount;

use super::function::CdsPricer;
use super::trade::ExpandedCds;
use crate::error::EngineError;
use crate::market_data::scenario::SingleScenarioMarketData;

/// The standard bump applied by the sensitivity pricers.
pub const ONE_BASIS_POINT: f64 = 1.0e-4;

/// Values an expanded CDS from the protection buyer's side.
///
/// Premium leg: `coupon · Σ Δᵢ · df(tᵢ) · S(tᵢ) · notional`.
/// Protection leg: `(1 − R) · notional · Σ df(t̄ᵢ) · (S(tᵢ₋₁) − S(tᵢ))`
/// with `t̄ᵢ` the segment midpoint. PV = protection − premium.
pub fn present_value(
    product: &ExpandedCds,
    yield_curve: &NodalCurve<f64>,
    credit_curve: &CreditCurve<f64>,
) -> Result<f64, EngineError> {
    let mut premium = 0.0;
    let mut protection = 0.0;
    let mut previous_time = 0.0;
    let mut previous_survival = 1.0;

    for &t in product.payment_times() {
        let discount = yield_curve.discount_factor(t)?;
        let survival = credit_curve.survival_probability(t)?;
        let accrual = t - previous_time;

        premium += accrual * discount * survival;

        let midpoint_discount = yield_curve.discount_factor(0.5 * (previous_time + t))?;
        protection += midpoint_discount * (previous_survival - survival);

        previous_time = t;
        previous_survival = survival;
    }

    let notional = product.notional();
    let pv = notional
        * ((1.0 - product.recovery_rate()) * protection - product.coupon() * premium);
    Ok(pv)
}

// Uniform shift of every node value.
fn bump_all(values: &[f64], shift: f64) -> Vec<f64> {
    values.iter().map(|v| v + shift).collect()
}

// Shift of a single node value.
fn bump_node(values: &[f64], node: usize, shift: f64) -> Vec<f64> {
    let mut bumped = values.to_vec();
    bumped[node] += shift;
    bumped
}

/// Prices the present value of a CDS as a currency amount.
///
/// The amount is tagged with the notional currency, so it supports
/// automatic conversion into the reporting currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentValuePricer;

impl CdsPricer for PresentValuePricer {
    type Output = CurrencyAmount;

    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<CurrencyAmount, EngineError> {
        let pv = present_value(product, yield_curve, credit_curve)?;
        Ok(CurrencyAmount::new(pv, product.currency()))
    }
}

/// Parallel IR01: PV change for a uniform +1bp shift of every yield
/// curve node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelIr01Pricer;

impl CdsPricer for ParallelIr01Pricer {
    type Output = f64;

    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<f64, EngineError> {
        let base = present_value(product, yield_curve, credit_curve)?;
        let bumped_curve =
            yield_curve.with_values(&bump_all(yield_curve.values(), ONE_BASIS_POINT))?;
        let bumped = present_value(product, &bumped_curve, credit_curve)?;
        Ok(bumped - base)
    }
}

/// Bucketed IR01: PV change per yield curve node for a +1bp shift of
/// that node alone, as a vector aligned to the curve's nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketedIr01Pricer;

impl CdsPricer for BucketedIr01Pricer {
    type Output = Vec<f64>;

    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<Vec<f64>, EngineError> {
        let base = present_value(product, yield_curve, credit_curve)?;
        let values = yield_curve.values();
        let mut sensitivities = Vec::with_capacity(values.len());
        for node in 0..values.len() {
            let bumped_curve =
                yield_curve.with_values(&bump_node(values, node, ONE_BASIS_POINT))?;
            let bumped = present_value(product, &bumped_curve, credit_curve)?;
            sensitivities.push(bumped - base);
        }
        Ok(sensitivities)
    }
}

/// Parallel CS01: PV change for a uniform +1bp shift of every credit
/// curve node.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelCs01Pricer;

impl CdsPricer for ParallelCs01Pricer {
    type Output = f64;

    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<f64, EngineError> {
        let base = present_value(product, yield_curve, credit_curve)?;
        let bumped_curve =
            credit_curve.with_values(&bump_all(credit_curve.values(), ONE_BASIS_POINT))?;
        let bumped = present_value(product, yield_curve, &bumped_curve)?;
        Ok(bumped - base)
    }
}

/// Bucketed CS01: PV change per credit curve node for a +1bp shift of
/// that node alone, as a `(node label, value)` list.
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketedCs01Pricer;

impl CdsPricer for BucketedCs01Pricer {
    type Output = Vec<(String, f64)>;

    fn price(
        &self,
        product: &ExpandedCds,
        yield_curve: &NodalCurve<f64>,
        credit_curve: &CreditCurve<f64>,
        _market: &SingleScenarioMarketData<'_>,
    ) -> Result<Vec<(String, f64)>, EngineError> {
        let base = present_value(product, yield_curve, credit_curve)?;
        let values = credit_curve.values();
        let mut sensitivities = Vec::with_capacity(values.len());
        for node in 0..values.len() {
            let bumped_curve =
                credit_curve.with_values(&bump_node(values, node, ONE_BASIS_POINT))?;
            let bumped = present_value(product, yield_curve, &bumped_curve)?;
            sensitivities.push((credit_curve.labels()[node].clone(), bumped - base));
        }
        Ok(sensitivities)
    }
}
