//! First-order parameter sensitivities.

use risk_core::market_data::curves::CurveName;
use risk_core::types::Currency;

use crate::error::AnalyticsError;

/// One curve's per-node first-derivative vector, tagged with a currency.
///
/// # Examples
///
/// ```
/// use risk_analytics::sensitivity::CurrencyParameterSensitivity;
/// use risk_core::market_data::curves::CurveName;
/// use risk_core::types::Currency;
///
/// let sensitivity = CurrencyParameterSensitivity::new(
///     CurveName::new("USD Discount"),
///     vec!["1Y".into(), "5Y".into()],
///     Currency::USD,
///     vec![120.5, -35.0],
/// )
/// .unwrap();
/// assert_eq!(sensitivity.parameter_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyParameterSensitivity {
    /// Name of the curve the derivatives are taken against
    curve_name: CurveName,
    /// Per-node parameter labels, aligned with the sensitivity vector
    parameter_labels: Vec<String>,
    /// Currency of the sensitivity values
    currency: Currency,
    /// First derivative per node
    sensitivity: Vec<f64>,
}

impl CurrencyParameterSensitivity {
    /// Creates a sensitivity entry.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::ParameterCountMismatch`] when labels and values
    /// have different lengths.
    pub fn new(
        curve_name: CurveName,
        parameter_labels: Vec<String>,
        currency: Currency,
        sensitivity: Vec<f64>,
    ) -> Result<Self, AnalyticsError> {
        if parameter_labels.len() != sensitivity.len() {
            return Err(AnalyticsError::ParameterCountMismatch {
                curve: curve_name.as_str().to_string(),
                expected: parameter_labels.len(),
                got: sensitivity.len(),
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

    /// Returns the first-derivative vector.
    #[inline]
    pub fn sensitivity(&self) -> &[f64] {
        &self.sensitivity
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn parameter_count(&self) -> usize {
        self.sensitivity.len()
    }

    /// Returns the sum over all nodes (the parallel aggregate).
    pub fn total(&self) -> f64 {
        self.sensitivity.iter().sum()
    }

    // Element-wise sum with another entry of the same key.
    fn plus(&self, other: &CurrencyParameterSensitivity) -> Result<Self, AnalyticsError> {
        if self.sensitivity.len() != other.sensitivity.len() {
            return Err(AnalyticsError::ParameterCountMismatch {
                curve: self.curve_name.as_str().to_string(),
                expected: self.sensitivity.len(),
                got: other.sensitivity.len(),
            });
        }
        let summed = self
            .sensitivity
            .iter()
            .zip(&other.sensitivity)
            .map(|(a, b)| a + b)
            .collect();
        Ok(Self {
            curve_name: self.curve_name.clone(),
            parameter_labels: self.parameter_labels.clone(),
            currency: self.currency,
            sensitivity: summed,
        })
    }
}

/// A set of first-order sensitivity entries keyed by (curve name,
/// currency), in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyParameterSensitivities {
    /// Entries with pairwise distinct (curve name, currency) keys
    entries: Vec<CurrencyParameterSensitivity>,
}

impl CurrencyParameterSensitivities {
    /// Creates an empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a collection holding one entry.
    pub fn of(entry: CurrencyParameterSensitivity) -> Self {
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
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyParameterSensitivity> {
        self.entries.iter()
    }

    /// Finds the entry for a curve name and currency.
    pub fn find_sensitivity(
        &self,
        curve_name: &CurveName,
        currency: Currency,
    ) -> Option<&CurrencyParameterSensitivity> {
        self.entries
            .iter()
            .find(|e| e.curve_name() == curve_name && e.currency() == currency)
    }

    /// Merges another collection into this one.
    ///
    /// Entries sharing a (curve name, currency) key are summed
    /// element-wise; the rest are appended in their order.
    ///
    /// # Errors
    ///
    /// [`AnalyticsError::ParameterCountMismatch`] when overlapping
    /// entries have different parameter counts.
    pub fn combined_with(
        mut self,
        other: CurrencyParameterSensitivities,
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn entry(name: &str, currency: Currency, values: &[f64]) -> CurrencyParameterSensitivity {
        let labels = (0..values.len()).map(|i| format!("{}Y", i + 1)).collect();
        CurrencyParameterSensitivity::new(
            CurveName::new(name),
            labels,
            currency,
            values.to_vec(),
        )
        .unwrap()
    }

    #[test]
    fn test_label_value_length_checked() {
        let result = CurrencyParameterSensitivity::new(
            CurveName::new("X"),
            vec!["1Y".into()],
            Currency::USD,
            vec![1.0, 2.0],
        );
        assert!(matches!(
            result,
            Err(AnalyticsError::ParameterCountMismatch { .. })
        ));
    }

    #[test]
    fn test_total() {
        let e = entry("USD Discount", Currency::USD, &[1.0, 2.0, 3.0]);
        assert_relative_eq!(e.total(), 6.0);
    }

    #[test]
    fn test_find_sensitivity_keyed_by_name_and_currency() {
        let collection = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[1.0, 2.0],
        ));

        assert!(collection
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::USD)
            .is_some());
        assert!(collection
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::EUR)
            .is_none());
        assert!(collection
            .find_sensitivity(&CurveName::new("EUR Discount"), Currency::USD)
            .is_none());
    }

    #[test]
    fn test_combined_with_sums_overlap() {
        let a = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[1.0, 2.0],
        ));
        let b = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[0.5, -1.0],
        ));

        let combined = a.combined_with(b).unwrap();
        assert_eq!(combined.len(), 1);
        let merged = combined
            .find_sensitivity(&CurveName::new("USD Discount"), Currency::USD)
            .unwrap();
        assert_eq!(merged.sensitivity(), &[1.5, 1.0]);
    }

    #[test]
    fn test_combined_with_appends_disjoint() {
        let a = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[1.0],
        ));
        let b = CurrencyParameterSensitivities::of(entry(
            "EUR Discount",
            Currency::EUR,
            &[2.0],
        ));

        let combined = a.combined_with(b).unwrap();
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_combined_with_rejects_length_mismatch() {
        let a = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[1.0, 2.0],
        ));
        let b = CurrencyParameterSensitivities::of(entry(
            "USD Discount",
            Currency::USD,
            &[1.0],
        ));

        assert!(matches!(
            a.combined_with(b),
            Err(AnalyticsError::ParameterCountMismatch { .. })
        ));
    }

    mod combine_property {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn overlap_sum_is_commutative(
                left in proptest::collection::vec(-1e6f64..1e6, 3),
                right in proptest::collection::vec(-1e6f64..1e6, 3)
            ) {
                let a = || CurrencyParameterSensitivities::of(entry(
                    "USD Discount",
                    Currency::USD,
                    &left,
                ));
                let b = || CurrencyParameterSensitivities::of(entry(
                    "USD Discount",
                    Currency::USD,
                    &right,
                ));

                let ab = a().combined_with(b()).unwrap();
                let ba = b().combined_with(a()).unwrap();

                let key = (CurveName::new("USD Discount"), Currency::USD);
                let ab_entry = ab.find_sensitivity(&key.0, key.1).unwrap();
                let ba_entry = ba.find_sensitivity(&key.0, key.1).unwrap();
                for (x, y) in ab_entry.sensitivity().iter().zip(ba_entry.sensitivity()) {
                    prop_assert!((x - y).abs() < 1e-9);
                }
            }
        }
    }
}
