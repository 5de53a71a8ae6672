//! Measures and their reported value shapes.
//!
//! The reporting boundary consumes three shapes: scalars, vectors and
//! labelled lists (plus currency amounts for monetary measures). A
//! [`MeasureValue`] carries one computed value in its documented shape;
//! the typed accessors return `None` rather than coercing across shapes.

use std::fmt;

use risk_core::types::CurrencyAmount;

/// The measures the CDS function knows how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Measure {
    /// Present value (currency amount).
    PresentValue,
    /// Parallel IR01: PV change for +1bp on all yield curve nodes (scalar).
    Ir01ParallelPar,
    /// Bucketed IR01: PV change per yield curve node (vector).
    Ir01BucketedPar,
    /// Parallel CS01: PV change for +1bp on all credit curve nodes (scalar).
    Cs01ParallelPar,
    /// Bucketed CS01: PV change per credit curve node (labelled list).
    Cs01BucketedPar,
}

impl Measure {
    /// All measures, in reporting order.
    pub fn all() -> [Measure; 5] {
        [
            Measure::PresentValue,
            Measure::Ir01ParallelPar,
            Measure::Cs01ParallelPar,
            Measure::Ir01BucketedPar,
            Measure::Cs01BucketedPar,
        ]
    }

    /// Returns the measure's report name.
    pub fn name(&self) -> &'static str {
        match self {
            Measure::PresentValue => "PresentValue",
            Measure::Ir01ParallelPar => "IR01ParallelPar",
            Measure::Ir01BucketedPar => "IR01BucketedPar",
            Measure::Cs01ParallelPar => "CS01ParallelPar",
            Measure::Cs01BucketedPar => "CS01BucketedPar",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One computed measure value in its documented shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureValue {
    /// A monetary amount (present value).
    Amount(CurrencyAmount),
    /// A bare scalar (parallel sensitivities).
    Scalar(f64),
    /// An ordered vector aligned to curve nodes.
    Vector(Vec<f64>),
    /// An ordered `(label, value)` list aligned to curve nodes.
    Labelled(Vec<(String, f64)>),
}

impl MeasureValue {
    /// Returns the monetary amount, if this value is one.
    pub fn as_amount(&self) -> Option<CurrencyAmount> {
        match self {
            MeasureValue::Amount(amount) => Some(*amount),
            _ => None,
        }
    }

    /// Returns the scalar, if this value is one. Monetary amounts also
    /// answer with their numeric value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MeasureValue::Scalar(value) => Some(*value),
            MeasureValue::Amount(amount) => Some(amount.amount()),
            _ => None,
        }
    }

    /// Returns the vector, if this value is one.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            MeasureValue::Vector(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the labelled list, if this value is one.
    pub fn as_labelled(&self) -> Option<&[(String, f64)]> {
        match self {
            MeasureValue::Labelled(pairs) => Some(pairs),
            _ => None,
        }
    }
}

impl fmt::Display for MeasureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureValue::Amount(amount) => write!(f, "{}", amount),
            MeasureValue::Scalar(value) => write!(f, "{:.6}", value),
            MeasureValue::Vector(values) => {
                let joined: Vec<String> =
                    values.iter().map(|v| format!("{:.6}", v)).collect();
                write!(f, "[{}]", joined.join(", "))
            }
            MeasureValue::Labelled(pairs) => {
                let joined: Vec<String> = pairs
                    .iter()
                    .map(|(label, value)| format!("{} -> {:.6}", label, value))
                    .collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::types::Currency;

    #[test]
    fn test_measure_names() {
        assert_eq!(Measure::PresentValue.name(), "PresentValue");
        assert_eq!(format!("{}", Measure::Cs01BucketedPar), "CS01BucketedPar");
        assert_eq!(Measure::all().len(), 5);
    }

    #[test]
    fn test_accessors_do_not_coerce() {
        let vector = MeasureValue::Vector(vec![1.0, 2.0]);
        assert!(vector.as_scalar().is_none());
        assert!(vector.as_labelled().is_none());
        assert_eq!(vector.as_vector().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_amount_answers_as_scalar() {
        let amount = MeasureValue::Amount(CurrencyAmount::new(12.5, Currency::USD));
        assert_eq!(amount.as_scalar(), Some(12.5));
        assert_eq!(amount.as_amount().unwrap().currency(), Currency::USD);
    }

    #[test]
    fn test_labelled_display() {
        let value = MeasureValue::Labelled(vec![("1Y".to_string(), 0.5)]);
        assert_eq!(format!("{}", value), "[1Y -> 0.500000]");
    }
}
