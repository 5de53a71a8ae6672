//! Second-order (cross-gamma) parameter sensitivities.

use risk_core::market_data::curves::CurveName;
use risk_core::types::Currency;

use crate::error::AnalyticsError;

/// One curve's matrix of second derivatives, tagged with a currency.
///
/// The matrix has one column per perturbed node (aligned with the
/// parameter labels) and one row per sensitivity output; for intra-curve
/// cross-gamma both dimensions are the curve's node count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossGammaParameterSensitivity {
    /// Name of the curve the derivatives are taken against
    curve_name: CurveName,
    /// Per-node parameter labels, aligned with the matrix columns
    parameter_labels: Vec<String>,
    /// Currency of the sensitivity values
    currency: Currency,
    /// Second derivatives, row-major: `sensitivity[i][j] = ∂²/∂xⱼ` of
    /// output `i`
    sensitivity: Vec<Vec<f64>>,
}

impl CrossGammaParameterSensitivity {
    /// Creates a cross-gamma entry.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::MatrixShapeMismatch`] when the matrix is empty,
    /// not rectangular, or its column count differs from the label count.
    pub fn new(
        curve_name: CurveName,
        parameter_labels: Vec<String>,
        currency: Currency,
        sensitivity: Vec<Vec<f64>>,
    ) -> Result<Self, AnalyticsError> {
        let columns = parameter_labels.len();
        if sensitivity.is_empty() || sensitivity.iter().any(|row| row.len() != columns) {
            return Err(AnalyticsError::MatrixShapeMismatch {
                curve: curve_name.as_str().to_string(),
            });
        }
        Ok(Self {
            curve_name,
            parameter_labels,
            currency,
            sensitivity,
        })
    }

    /// Returns the curve name.
    #[inline]
    pub fn curve_name(&self) -> &CurveName {
        &self.curve_name
    }

    /// Returns the per-node parameter labels.
    #[inline]
    pub fn parameter_labels(&self) -> &[String] {
        &self.parameter_labels
    }

    /// Returns the currency of the values.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the matrix of second derivatives.
    #[inline]
    pub fn sensitivity(&self) -> &[Vec<f64>] {
        &self.sensitivity
    }

    /// Returns (rows, columns) of the matrix.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.sensitivity.len(), self.parameter_labels.len())
    }

    /// Returns the matrix diagonal (own-node gammas).
    pub fn diagonal(&self) -> Vec<f64> {
        self.sensitivity
            .iter()
            .enumerate()
            .take(self.parameter_labels.len())
            .map(|(i, row)| row[i])
            .collect()
    }

    /// Returns the sum of every matrix element (the parallel gamma).
    pub fn total(&self) -> f64 {
        self.sensitivity.iter().flatten().sum()
    }

    // Element-wise matrix sum with another entry of the same key.
    fn plus(&self, other: &CrossGammaParameterSensitivity) -> Result<Self, AnalyticsError> {
        if self.shape() != other.shape() {
            return Err(AnalyticsError::MatrixShapeMismatch {
                curve: self.curve_name.as_str().to_string(),
            });
        }
        let summed = self
            .sensitivity
            .iter()
            .zip(&other.sensitivity)
            .map(|(row_a, row_b)| row_a.iter().zip(row_b).map(|(a, b)| a + b).collect())
            .collect();
        Ok(Self {
            curve_name: self.curve_name.clone(),
            parameter_labels: self.parameter_labels.clone(),
            currency: self.currency,
            sensitivity: summed,
        })
    }
}

/// A set of cross-gamma entries keyed by (curve name, currency), in
/// insertion order.
///
/// Combining is matrix-wise: overlapping keys sum element-wise,
/// non-overlapping keys form the additive union. Combination is
/// associative and commutative up to entry order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CrossGammaParameterSensitivities {
    /// Entries with pairwise distinct (curve name, currency) keys
    entries: Vec<CrossGammaParameterSensitivity>,
}

impl CrossGammaParameterSensitivities {
    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a collection holding one entry.
    pub fn of(entry: CrossGammaParameterSensitivity) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the collection has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &CrossGammaParameterSensitivity> {
        self.entries.iter()
    }

    /// Finds the entry for a curve name and currency.
    pub fn find_sensitivity(
        &self,
        curve_name: &CurveName,
        currency: Currency,
    ) -> Option<&CrossGammaParameterSensitivity> {
        self.entries
            .iter()
            .find(|e| e.curve_name() == curve_name && e.currency() == currency)
    }

    /// Merges another collection into this one.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::MatrixShapeMismatch`] when overlapping entries
    /// have different shapes.
    pub fn combined_with(
        mut self,
        other: CrossGammaParameterSensitivities,
    ) -> Result<Self, AnalyticsError> {
        for entry in other.entries {
            match self.entries.iter_mut().find(|e| {
                e.curve_name() == entry.curve_name() && e.currency() == entry.currency()
            }) {
                Some(existing) => *existing = existing.plus(&entry)?,
                None => self.entries.push(entry),
            }
        }
        Ok(self)
    }
}
