//! Finite-difference cross-gamma calculator.
//!
//! Computes, for every discount curve of a rates provider, the matrix of
//! second derivatives of that curve's own first-order sensitivity with
//! respect to its own node values (intra-curve cross-gamma). The first
//! order sensitivity function is supplied by the caller; each evaluation
//! may itself be a full revaluation of a pricing pipeline.
//!
//! Results are not scaled: they are bare second-order derivatives. The
//! inter-curve generalisation (differentiating one curve's sensitivity
//! with respect to another curve's nodes) is a planned extension of this
//! module and deliberately not part of the current entry point.

use rayon::prelude::*;

use risk_core::market_data::curves::NodalCurve;
use risk_core::market_data::RatesProvider;
use risk_core::math::differentiation::{
    FiniteDifferenceType, VectorFieldFirstOrderDifferentiator,
};
use risk_core::types::Currency;

use crate::error::AnalyticsError;
use crate::sensitivity::{
    CrossGammaParameterSensitivities, CrossGammaParameterSensitivity,
    CurrencyParameterSensitivities,
};

/// Cross-gamma calculator built on finite differencing of a supplied
/// first-order sensitivity function.
///
/// The default instance uses forward differencing with a one-basis-point
/// shift.
///
/// # Examples
///
/// ```no_run
/// use risk_analytics::cross_gamma::CrossGammaCalculator;
/// use risk_analytics::sensitivity::CurrencyParameterSensitivities;
/// use risk_core::market_data::RatesProvider;
///
/// # fn sensitivities(p: &RatesProvider<f64>) -> CurrencyParameterSensitivities {
/// #     CurrencyParameterSensitivities::empty()
/// # }
/// # fn demo(provider: &RatesProvider<f64>) {
/// let calculator = CrossGammaCalculator::default();
/// let gammas = calculator
///     .calculate_cross_gamma_intra_curve(provider, sensitivities)
///     .unwrap();
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CrossGammaCalculator {
    /// The first-order finite-difference calculator
    fd: VectorFieldFirstOrderDifferentiator,
}

impl Default for CrossGammaCalculator {
    /// Forward differencing with a one-basis-point shift.
    fn default() -> Self {
        Self {
            fd: VectorFieldFirstOrderDifferentiator::default(),
        }
    }
}

impl CrossGammaCalculator {
    /// Creates a calculator using forward differencing at `shift`.
    pub fn of_forward_difference(shift: f64) -> Result<Self, AnalyticsError> {
        Ok(Self {
            fd: VectorFieldFirstOrderDifferentiator::new(FiniteDifferenceType::Forward, shift)?,
        })
    }

    /// Creates a calculator using central differencing at `shift`.
    pub fn of_central_difference(shift: f64) -> Result<Self, AnalyticsError> {
        Ok(Self {
            fd: VectorFieldFirstOrderDifferentiator::new(FiniteDifferenceType::Central, shift)?,
        })
    }

    /// Creates a calculator using backward differencing at `shift`.
    pub fn of_backward_difference(shift: f64) -> Result<Self, AnalyticsError> {
        Ok(Self {
            fd: VectorFieldFirstOrderDifferentiator::new(FiniteDifferenceType::Backward, shift)?,
        })
    }

    /// Computes each discount curve's own cross-gamma matrix.
    ///
    /// For every discount curve in `provider`: the curve's node values
    /// are perturbed, the perturbed curve is substituted into a fresh
    /// provider (the base provider is never mutated), `sensitivities_fn`
    /// is invoked against the new provider and the entry matching the
    /// curve's name and currency is differentiated. A perturbation under
    /// which the entry disappears contributes a zero vector of the
    /// entry's original length, keeping the differentiation well-defined.
    ///
    /// Curves are independent, so they are processed in parallel when
    /// there is more than one.
    pub fn calculate_cross_gamma_intra_curve<S>(
        &self,
        provider: &RatesProvider<f64>,
        sensitivities_fn: S,
    ) -> Result<CrossGammaParameterSensitivities, AnalyticsError>
    where
        S: Fn(&RatesProvider<f64>) -> CurrencyParameterSensitivities + Sync,
    {
        let curves: Vec<(Currency, &NodalCurve<f64>)> = provider
            .discount_curves()
            .map(|(currency, curve)| (*currency, curve.as_ref()))
            .collect();

        // Base sensitivities fix the output length for curves whose
        // entry vanishes under perturbation
        let base = sensitivities_fn(provider);

        let compute = |&(currency, curve): &(Currency, &NodalCurve<f64>)| {
            self.intra_curve_entry(provider, &base, currency, curve, &sensitivities_fn)
        };

        let entries: Result<Vec<CrossGammaParameterSensitivity>, AnalyticsError> =
            if curves.len() > 1 {
                curves.par_iter().map(compute).collect()
            } else {
                curves.iter().map(compute).collect()
            };

        let mut result = CrossGammaParameterSensitivities::empty();
        for entry in entries? {
            result = result.combined_with(CrossGammaParameterSensitivities::of(entry))?;
        }
        Ok(result)
    }

    // One curve's self-gamma: differentiate the curve's own sensitivity
    // vector with respect to its own node values.
    fn intra_curve_entry<S>(
        &self,
        provider: &RatesProvider<f64>,
        base: &CurrencyParameterSensitivities,
        currency: Currency,
        curve: &NodalCurve<f64>,
        sensitivities_fn: &S,
    ) -> Result<CrossGammaParameterSensitivity, AnalyticsError>
    where
        S: Fn(&RatesProvider<f64>) -> CurrencyParameterSensitivities + Sync,
    {
        let parameters: Vec<f64> = curve.values().to_vec();
        let output_len = base
            .find_sensitivity(curve.name(), currency)
            .map(|entry| entry.parameter_count())
            .unwrap_or_else(|| curve.node_count());

        let g = |values: &[f64]| -> Vec<f64> {
            // Replacement vectors come from the curve's own values, so
            // the node count always matches
            let perturbed = match curve.with_values(values) {
                Ok(perturbed) => perturbed,
                Err(_) => return vec![0.0; output_len],
            };
            let perturbed_provider = provider.with_discount_curve(currency, perturbed);
            let sensitivities = sensitivities_fn(&perturbed_provider);
            match sensitivities.find_sensitivity(curve.name(), currency) {
                Some(entry) => entry.sensitivity().to_vec(),
                None => vec![0.0; output_len],
            }
        };

        let matrix = self.fd.differentiate(g, &parameters)?;
        CrossGammaParameterSensitivity::new(
            curve.name().clone(),
            curve.labels().to_vec(),
            currency,
            matrix,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use risk_core::market_data::curves::{CurveName, NodalCurve};
    use risk_core::types::Date;
    use risk_core::types::Currency;
    use crate::sensitivity::CurrencyParameterSensitivity;

    fn curve(name: &str, values: &[f64]) -> NodalCurve<f64> {
        let labels = (0..values.len()).map(|i| format!("{}Y", i + 1)).collect();
        let tenors = (0..values.len()).map(|i| (i + 1) as f64).collect();
        NodalCurve::new(CurveName::new(name), labels, tenors, values.to_vec()).unwrap()
    }

    fn provider() -> RatesProvider<f64> {
        RatesProvider::new(Date::from_ymd(2014, 10, 16).unwrap())
            .with_discount_curve(Currency::USD, curve("USD Discount", &[0.01, 0.012, 0.015]))
            .with_discount_curve(Currency::EUR, curve("EUR Discount", &[0.005, 0.007]))
    }

    // Sensitivity of curve k: s(x) = 0.5 · xᵀ A x gradient = A·x with a
    // symmetric per-currency matrix, so the exact cross-gamma is A.
    fn matrix_for(currency: Currency) -> Vec<Vec<f64>> {
        match currency {
            Currency::USD => vec![
                vec![2.0, 1.0, 0.0],
                vec![1.0, 3.0, 0.5],
                vec![0.0, 0.5, 4.0],
            ],
            _ => vec![vec![1.5, -0.5], vec![-0.5, 2.5]],
        }
    }

    fn quadratic_sensitivities(p: &RatesProvider<f64>) -> CurrencyParameterSensitivities {
        let mut result = CurrencyParameterSensitivities::empty();
        for (currency, curve) in p.discount_curves() {
            let a = matrix_for(*currency);
            let x = curve.values();
            let gradient: Vec<f64> = a
                .iter()
                .map(|row| row.iter().zip(x).map(|(aij, xj)| aij * xj).sum())
                .collect();
            let entry = CurrencyParameterSensitivity::new(
                curve.name().clone(),
                curve.labels().to_vec(),
                *currency,
                gradient,
            )
            .unwrap();
            result = result
                .combined_with(CurrencyParameterSensitivities::of(entry))
                .unwrap();
        }
        result
    }

    #[test]
    fn test_linear_gradient_recovers_matrix() {
        let provider = provider();
        let calculator = CrossGammaCalculator::of_central_difference(1e-6).unwrap();
        let gammas = calculator
            .calculate_cross_gamma_intra_curve(&provider, quadratic_sensitivities)
            .unwrap();

        assert_eq!(gammas.len(), 2);

        let usd = gammas
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::USD)
            .unwrap();
        let expected = matrix_for(Currency::USD);
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(
                    usd.sensitivity()[i][j],
                    expected[i][j],
                    epsilon = 1e-6
                );
            }
        }

        let eur = gammas
            .find_sensitivity(&CurveName::new("EUR Discount"), Currency::EUR)
            .unwrap();
        assert_eq!(eur.shape(), (2, 2));
        assert_relative_eq!(eur.sensitivity()[0][1], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_gamma_of_gradient_is_symmetric() {
        let provider = provider();
        let calculator = CrossGammaCalculator::default();
        let gammas = calculator
            .calculate_cross_gamma_intra_curve(&provider, quadratic_sensitivities)
            .unwrap();

        let usd = gammas
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::USD)
            .unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(
                    usd.sensitivity()[i][j],
                    usd.sensitivity()[j][i],
                    epsilon = 1e-6
                );
            }
        }
    }

    #[test]
    fn test_missing_entry_yields_zero_matrix() {
        let provider = provider();
        let calculator = CrossGammaCalculator::default();

        // The sensitivity function only ever reports the USD curve
        let usd_only = |p: &RatesProvider<f64>| -> CurrencyParameterSensitivities {
            let mut result = CurrencyParameterSensitivities::empty();
            for (currency, curve) in p.discount_curves() {
                if *currency != Currency::USD {
                    continue;
                }
                let entry = CurrencyParameterSensitivity::new(
                    curve.name().clone(),
                    curve.labels().to_vec(),
                    *currency,
                    curve.values().to_vec(),
                )
                .unwrap();
                result = result
                    .combined_with(CurrencyParameterSensitivities::of(entry))
                    .unwrap();
            }
            result
        };

        let gammas = calculator
            .calculate_cross_gamma_intra_curve(&provider, usd_only)
            .unwrap();

        // EUR entry exists with zero content rather than failing
        let eur = gammas
            .find_sensitivity(&CurveName::new("EUR Discount"), Currency::EUR)
            .unwrap();
        assert_eq!(eur.shape(), (2, 2));
        for row in eur.sensitivity() {
            for &value in row {
                assert_relative_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn test_base_provider_never_mutated() {
        let provider = provider();
        let before: Vec<f64> = provider
            .discount_curve(Currency::USD)
            .unwrap()
            .values()
            .to_vec();

        let _ = CrossGammaCalculator::default()
            .calculate_cross_gamma_intra_curve(&provider, quadratic_sensitivities)
            .unwrap();

        let after = provider.discount_curve(Currency::USD).unwrap().values();
        assert_eq!(before, after);
    }

    #[test]
    fn test_entry_carries_labels_and_currency() {
        let provider = provider();
        let gammas = CrossGammaCalculator::default()
            .calculate_cross_gamma_intra_curve(&provider, quadratic_sensitivities)
            .unwrap();

        let usd = gammas
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::USD)
            .unwrap();
        assert_eq!(usd.parameter_labels(), &["1Y", "2Y", "3Y"]);
        assert_eq!(usd.currency(), Currency::USD);
    }
}
