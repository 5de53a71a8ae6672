//! CDS trade value objects.
//!
//! The engine reads only a thin slice of the trade: the currencies of the
//! notional and upfront-fee legs, the reference-entity classification and
//! the expansion to computation form. Everything else is carried opaquely
//! to the pricing routine.

use std::fmt;

use risk_core::types::{Currency, CurrencyAmount, Date};

use super::reference::ReferenceInformation;
use crate::error::EngineError;

/// Identifier of a trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TradeId(String);

impl TradeId {
    /// Creates a trade identifier.
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

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fee leg of a CDS: periodic premium notional plus upfront fee.
///
/// The two amounts may be in different currencies; requirements
/// derivation declares a yield curve for each distinct currency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeeLeg {
    /// Notional of the periodic premium payments
    notional: CurrencyAmount,
    /// Upfront fee exchanged at trade inception
    upfront_fee: CurrencyAmount,
}

impl FeeLeg {
    /// Creates a fee leg.
    #[inline]
    pub fn new(notional: CurrencyAmount, upfront_fee: CurrencyAmount) -> Self {
        Self {
            notional,
            upfront_fee,
        }
    }

    /// Returns the periodic premium notional.
    #[inline]
    pub fn notional(&self) -> CurrencyAmount {
        self.notional
    }

    /// Returns the upfront fee.
    #[inline]
    pub fn upfront_fee(&self) -> CurrencyAmount {
        self.upfront_fee
    }
}

/// A credit default swap product.
///
/// # Examples
///
/// ```
/// use risk_engine::credit::{Cds, FeeLeg, ReferenceInformation, Seniority, SingleNameReference};
/// use risk_core::types::{Currency, CurrencyAmount, Date};
///
/// let cds = Cds::new(
///     FeeLeg::new(
///         CurrencyAmount::new(10_000_000.0, Currency::USD),
///         CurrencyAmount::new(50_000.0, Currency::USD),
///     ),
///     0.01,
///     Date::from_ymd(2019, 12, 20).unwrap(),
///     0.4,
///     ReferenceInformation::SingleName(SingleNameReference::new(
///         "ACME Corp",
///         Seniority::Senior,
///         Currency::USD,
///     )),
/// )
/// .unwrap();
/// assert_eq!(cds.coupon(), 0.01);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cds {
    /// Fee leg (premium notional and upfront fee)
    fee_leg: FeeLeg,
    /// Annual premium rate (e.g., 0.01 for 100bp)
    coupon: f64,
    /// Scheduled termination date
    maturity: Date,
    /// Assumed recovery rate in [0, 1)
    recovery_rate: f64,
    /// What the protection references
    reference: ReferenceInformation,
}

impl Cds {
    /// Premium payment frequency: quarterly, per standard contracts.
    pub const PAYMENT_INTERVAL_YEARS: f64 = 0.25;

    /// Creates a CDS product.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] when the coupon is negative or the
    /// recovery rate lies outside `[0, 1)`.
    pub fn new(
        fee_leg: FeeLeg,
        coupon: f64,
        maturity: Date,
        recovery_rate: f64,
        reference: ReferenceInformation,
    ) -> Result<Self, EngineError> {
        if coupon < 0.0 {
            return Err(EngineError::Configuration(format!(
                "coupon must be non-negative, got {}",
                coupon
            )));
        }
        if !(0.0..1.0).contains(&recovery_rate) {
            return Err(EngineError::Configuration(format!(
                "recovery rate must be in [0, 1), got {}",
                recovery_rate
            )));
        }
        Ok(Self {
            fee_leg,
            coupon,
            maturity,
            recovery_rate,
            reference,
        })
    }

    /// Returns the fee leg.
    #[inline]
    pub fn fee_leg(&self) -> &FeeLeg {
        &self.fee_leg
    }

    /// Returns the annual premium rate.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the scheduled termination date.
    #[inline]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the assumed recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Returns the reference-entity classification.
    #[inline]
    pub fn reference(&self) -> &ReferenceInformation {
        &self.reference
    }

    /// Expands the product into its fully resolved computation form for
    /// the given valuation date.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] when the product has already
    /// matured at the valuation date.
    pub fn expand(&self, valuation_date: Date) -> Result<ExpandedCds, EngineError> {
        let maturity_years = valuation_date.year_fraction_to(self.maturity);
        if maturity_years <= 0.0 {
            return Err(EngineError::Configuration(format!(
                "trade matured on {}, valuation date {}",
                self.maturity, valuation_date
            )));
        }

        // Quarterly grid up to and including maturity (final stub allowed)
        let mut payment_times = Vec::new();
        let mut t = Self::PAYMENT_INTERVAL_YEARS;
        while t < maturity_years {
            payment_times.push(t);
            t += Self::PAYMENT_INTERVAL_YEARS;
        }
        payment_times.push(maturity_years);

        Ok(ExpandedCds {
            notional: self.fee_leg.notional().amount(),
            currency: self.fee_leg.notional().currency(),
            coupon: self.coupon,
            recovery_rate: self.recovery_rate,
            payment_times,
        })
    }
}

/// A CDS trade: a product with an identifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsTrade {
    /// Trade identifier
    id: TradeId,
    /// The traded product
    product: Cds,
}

impl CdsTrade {
    /// Creates a trade.
    #[inline]
    pub fn new(id: TradeId, product: Cds) -> Self {
        Self { id, product }
    }

    /// Returns the trade identifier.
    #[inline]
    pub fn id(&self) -> &TradeId {
        &self.id
    }

    /// Returns the product.
    #[inline]
    pub fn product(&self) -> &Cds {
        &self.product
    }
}

/// The fully resolved computation form of a CDS.
///
/// Dates are resolved to year fractions from the valuation date and the
/// premium payment grid is materialised; this is what the pricing
/// routine consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedCds {
    /// Premium notional amount
    notional: f64,
    /// Currency of the notional
    currency: Currency,
    /// Annual premium rate
    coupon: f64,
    /// Assumed recovery rate
    recovery_rate: f64,
    /// Premium payment times in years from valuation, ascending; the
    /// last entry is the maturity
    payment_times: Vec<f64>,
}

impl ExpandedCds {
    /// Returns the premium notional amount.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the currency of the notional.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the annual premium rate.
    #[inline]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the assumed recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> f64 {
        self.recovery_rate
    }

    /// Returns the premium payment times in years from valuation.
    #[inline]
    pub fn payment_times(&self) -> &[f64] {
        &self.payment_times
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity_years(&self) -> f64 {
        *self.payment_times.last().unwrap_or(&0.0)
    }
}
