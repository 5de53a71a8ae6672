//! Nodal zero curve implementation.
//!
//! A nodal curve is an ordered sequence of labelled (tenor, value) nodes.
//! Sensitivity analytics perturb the value half of every node while the
//! labels and tenors stay fixed, so value replacement is the central
//! operation of this type.

use num_traits::Float;

use super::CurveName;
use crate::market_data::error::MarketDataError;

/// An immutable zero curve defined by ordered node points.
///
/// Each node carries a human-readable label (e.g., `"5Y"`), a tenor in
/// years and a value (zero rate). Values between nodes are linearly
/// interpolated; queries beyond the first or last node extrapolate flat.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Invariants
///
/// - At least two nodes
/// - Tenors strictly increasing
/// - Labels, tenors and values have equal length
///
/// # Examples
///
/// ```
/// use risk_core::market_data::curves::{CurveName, NodalCurve};
///
/// let curve = NodalCurve::new(
///     CurveName::new("USD Discount"),
///     vec!["1Y".into(), "2Y".into(), "5Y".into()],
///     vec![1.0, 2.0, 5.0],
///     vec![0.01_f64, 0.012, 0.016],
/// )
/// .unwrap();
///
/// // Interpolate at 1.5 years
/// let rate = curve.zero_rate(1.5).unwrap();
/// assert!((rate - 0.011).abs() < 1e-12);
///
/// // Replace all node values, keeping labels and tenors
/// let bumped = curve.with_values(&[0.0101, 0.0121, 0.0161]).unwrap();
/// assert_eq!(bumped.node_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodalCurve<T: Float> {
    /// Curve name
    name: CurveName,
    /// Node labels, aligned with tenors and values
    labels: Vec<String>,
    /// Node tenors in years, strictly increasing
    tenors: Vec<T>,
    /// Node values (zero rates)
    values: Vec<T>,
}

impl<T: Float> NodalCurve<T> {
    /// Constructs a nodal curve from aligned node vectors.
    ///
    /// # Arguments
    ///
    /// * `name` - The curve name
    /// * `labels` - Node labels (e.g., "6M", "1Y")
    /// * `tenors` - Node tenors in years, strictly increasing
    /// * `values` - Node values (zero rates)
    ///
    /// # Errors
    ///
    /// * [`MarketDataError::InsufficientData`] - fewer than two nodes
    /// * [`MarketDataError::MismatchedNodeVectors`] - unequal vector lengths
    /// * [`MarketDataError::UnsortedTenors`] - tenors not strictly increasing
    pub fn new(
        name: CurveName,
        labels: Vec<String>,
        tenors: Vec<T>,
        values: Vec<T>,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if labels.len() != tenors.len() || values.len() != tenors.len() {
            return Err(MarketDataError::MismatchedNodeVectors {
                labels: labels.len(),
                tenors: tenors.len(),
                values: values.len(),
            });
        }
        for i in 1..tenors.len() {
            if tenors[i] <= tenors[i - 1] {
                return Err(MarketDataError::UnsortedTenors { index: i });
            }
        }
        Ok(Self {
            name,
            labels,
            tenors,
            values,
        })
    }

    /// Returns the curve name.
    #[inline]
    pub fn name(&self) -> &CurveName {
        &self.name
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tenors.len()
    }

    /// Returns the node labels.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the node tenors in years.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        &self.tenors
    }

    /// Returns the node values.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Returns a new curve with every node value replaced.
    ///
    /// Labels, tenors and the name are shared with the original; only the
    /// value half of each node changes. The replacement vector must match
    /// the node count exactly.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::NodeCountMismatch`] when the lengths differ.
    pub fn with_values(&self, values: &[T]) -> Result<Self, MarketDataError> {
        if values.len() != self.values.len() {
            return Err(MarketDataError::NodeCountMismatch {
                curve: self.name.as_str().to_string(),
                expected: self.values.len(),
                got: values.len(),
            });
        }
        Ok(Self {
            name: self.name.clone(),
            labels: self.labels.clone(),
            tenors: self.tenors.clone(),
            values: values.to_vec(),
        })
    }

    /// Returns the zero rate at time `t`.
    ///
    /// Linear interpolation between nodes, flat extrapolation beyond the
    /// first and last node.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidMaturity`] when `t` is negative.
    pub fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(self.interpolate(t))
    }

    /// Returns the discount factor `exp(-r(t) * t)` at time `t`.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidMaturity`] when `t` is negative.
    pub fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        let rate = self.zero_rate(t)?;
        Ok((-rate * t).exp())
    }

    // Linear interpolation with flat extrapolation; `t` assumed non-negative.
    fn interpolate(&self, t: T) -> T {
        let n = self.tenors.len();
        if t <= self.tenors[0] {
            return self.values[0];
        }
        if t >= self.tenors[n - 1] {
            return self.values[n - 1];
        }
        let mut i = 1;
        while self.tenors[i] < t {
            i += 1;
        }
        let (t0, t1) = (self.tenors[i - 1], self.tenors[i]);
        let (v0, v1) = (self.values[i - 1], self.values[i]);
        let w = (t - t0) / (t1 - t0);
        v0 + w * (v1 - v0)
    }
}
