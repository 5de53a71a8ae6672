//! Curve value objects.
//!
//! This module provides:
//! - [`CurveName`]: Identifier naming a curve
//! - [`CreditCurveId`]: Identifier keying credit curves in the provider
//! - [`NodalCurve`]: An immutable zero curve defined by ordered nodes
//! - [`CreditCurve`]: An immutable hazard-rate curve over the same node
//!   representation

pub mod credit;
pub mod nodal;

pub use credit::CreditCurve;
pub use nodal::NodalCurve;

use std::fmt;

/// The name of a curve.
///
/// Curve names identify sensitivity entries and report rows; two curves
/// with the same name are treated as the same risk factor.
///
/// # Examples
///
/// ```
/// use risk_core::market_data::curves::CurveName;
///
/// let name = CurveName::new("USD Discount");
/// assert_eq!(name.as_str(), "USD Discount");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CurveName(String);

impl CurveName {
    /// Creates a new curve name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CurveName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier keying a credit curve in the rates provider.
///
/// Derived from reference-entity data by the layer booking the curve;
/// the provider treats it as an opaque key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CreditCurveId(String);

impl CreditCurveId {
    /// Creates a new credit curve identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreditCurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_name_display() {
        let name = CurveName::new("EUR Discount");
        assert_eq!(format!("{}", name), "EUR Discount");
    }

    #[test]
    fn test_curve_name_equality() {
        assert_eq!(CurveName::new("A"), CurveName::from("A"));
        assert_ne!(CurveName::new("A"), CurveName::new("B"));
    }

    #[test]
    fn test_credit_curve_id_as_map_key() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(CreditCurveId::new("ACME Corp:SENIOR"), 1);
        assert_eq!(map.get(&CreditCurveId::new("ACME Corp:SENIOR")), Some(&1));
        assert_eq!(map.get(&CreditCurveId::new("ACME Corp:SUB")), None);
    }
}
