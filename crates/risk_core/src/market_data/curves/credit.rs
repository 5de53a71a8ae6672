//! Credit curve implementation.
//!
//! A credit curve is a nodal hazard-rate curve: the node values are
//! instantaneous default intensities. Survival probabilities follow from
//! piecewise-constant hazard integration between nodes.

use num_traits::Float;

use super::nodal::NodalCurve;
use super::CurveName;
use crate::market_data::error::MarketDataError;

/// An immutable hazard-rate curve over the nodal representation.
///
/// The curve wraps a [`NodalCurve`] whose values are hazard rates λ.
/// The hazard rate is taken as constant on each inter-node segment (at
/// the segment's right node value, with the first node's value applying
/// from time zero), which makes the survival integral exact.
///
/// # Contract
///
/// - `hazard_rate(t)` returns the piecewise-constant hazard λ(t)
/// - `survival_probability(t)` returns `P(τ > t) = exp(-∫₀ᵗ λ(s) ds)`
/// - `P(τ > 0) = 1` and survival is non-increasing in `t`
///
/// # Examples
///
/// ```
/// use risk_core::market_data::curves::{CreditCurve, CurveName};
///
/// let curve = CreditCurve::new(
///     CurveName::new("ACME Corp"),
///     vec!["1Y".into(), "3Y".into(), "5Y".into()],
///     vec![1.0, 3.0, 5.0],
///     vec![0.010_f64, 0.012, 0.015],
/// )
/// .unwrap();
///
/// let surv = curve.survival_probability(1.0).unwrap();
/// assert!(surv > 0.98 && surv < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreditCurve<T: Float> {
    /// Underlying nodal curve of hazard rates
    curve: NodalCurve<T>,
}

impl<T: Float> CreditCurve<T> {
    /// Constructs a credit curve from aligned node vectors of hazard rates.
    ///
    /// Validation rules are those of [`NodalCurve::new`].
    pub fn new(
        name: CurveName,
        labels: Vec<String>,
        tenors: Vec<T>,
        hazard_rates: Vec<T>,
    ) -> Result<Self, MarketDataError> {
        Ok(Self {
            curve: NodalCurve::new(name, labels, tenors, hazard_rates)?,
        })
    }

    /// Wraps an existing nodal curve of hazard rates.
    #[inline]
    pub fn from_nodal(curve: NodalCurve<T>) -> Self {
        Self { curve }
    }

    /// Returns the curve name.
    #[inline]
    pub fn name(&self) -> &CurveName {
        self.curve.name()
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.curve.node_count()
    }

    /// Returns the node labels.
    #[inline]
    pub fn labels(&self) -> &[String] {
        self.curve.labels()
    }

    /// Returns the node tenors in years.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        self.curve.tenors()
    }

    /// Returns the node hazard rates.
    #[inline]
    pub fn values(&self) -> &[T] {
        self.curve.values()
    }

    /// Returns a new credit curve with every node hazard rate replaced.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::NodeCountMismatch`] when the lengths differ.
    pub fn with_values(&self, hazard_rates: &[T]) -> Result<Self, MarketDataError> {
        Ok(Self {
            curve: self.curve.with_values(hazard_rates)?,
        })
    }

    /// Returns the piecewise-constant hazard rate at time `t`.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidMaturity`] when `t` is negative.
    pub fn hazard_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        let tenors = self.curve.tenors();
        let values = self.curve.values();
        for (i, &tenor) in tenors.iter().enumerate() {
            if t <= tenor {
                return Ok(values[i]);
            }
        }
        Ok(values[values.len() - 1])
    }

    /// Returns the survival probability `P(τ > t)`.
    ///
    /// Computed as `exp(-∫₀ᵗ λ(s) ds)` with the hazard constant on each
    /// segment, so the integral is a sum of rectangle areas.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidMaturity`] when `t` is negative.
    pub fn survival_probability(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        let tenors = self.curve.tenors();
        let values = self.curve.values();

        let mut integral = T::zero();
        let mut prev = T::zero();
        for (i, &tenor) in tenors.iter().enumerate() {
            if t <= tenor {
                integral = integral + values[i] * (t - prev);
                return Ok((-integral).exp());
            }
            integral = integral + values[i] * (tenor - prev);
            prev = tenor;
        }
        // Beyond the last node the hazard stays at the final value
        integral = integral + values[values.len() - 1] * (t - prev);
        Ok((-integral).exp())
    }

    /// Returns the default probability `P(τ ≤ t) = 1 - P(τ > t)`.
    pub fn default_probability(&self, t: T) -> Result<T, MarketDataError> {
        Ok(T::one() - self.survival_probability(t)?)
    }
}
