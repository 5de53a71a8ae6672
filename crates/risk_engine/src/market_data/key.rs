//! Market data keys, feeds and identifiers.
//!
//! A [`MarketDataKey`] names a market-data series in business terms (the
//! USD yield curve, the credit curve of an entity). A [`MarketDataFeed`]
//! names the provider the data comes from. Resolving a key against a feed
//! yields a [`MarketDataId`], the fully-qualified identifier used to
//! request, build and look up values. Resolution is a pure function of
//! key and feed.

use std::fmt;

use risk_core::types::{Currency, CurrencyPair};

use crate::credit::reference::{IndexReference, SingleNameReference};

/// Identifier of a market data feed.
///
/// # Examples
///
/// ```
/// use risk_engine::market_data::MarketDataFeed;
///
/// let feed = MarketDataFeed::new("VENDOR-A");
/// assert_eq!(feed.name(), "VENDOR-A");
///
/// // The placeholder feed for feed-independent data
/// assert_eq!(MarketDataFeed::no_feed().name(), "None");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MarketDataFeed(String);

impl MarketDataFeed {
    /// Creates a feed identifier.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The placeholder feed used when data is not feed-specific.
    pub fn no_feed() -> Self {
        Self("None".to_string())
    }

    /// Returns the feed name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketDataFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed key naming a market-data series.
///
/// A closed sum type with one variant per series kind. Keys are what
/// calculation functions declare in their requirements; the engine
/// resolves them against the feed in use.
///
/// # Examples
///
/// ```
/// use risk_engine::market_data::{MarketDataFeed, MarketDataKey};
/// use risk_core::types::Currency;
///
/// let key = MarketDataKey::yield_curve(Currency::USD);
/// let id = key.to_market_data_id(MarketDataFeed::no_feed());
/// assert_eq!(format!("{}", id), "YieldCurve:USD@None");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketDataKey {
    /// The yield (discount) curve of a currency.
    YieldCurve(Currency),
    /// The credit curve of a single reference entity.
    SingleNameCreditCurve(SingleNameReference),
    /// The credit curve of a credit index.
    IndexCreditCurve(IndexReference),
    /// The FX rate for a currency pair.
    FxRate(CurrencyPair),
}

impl MarketDataKey {
    /// Creates a yield-curve key for a currency.
    #[inline]
    pub fn yield_curve(currency: Currency) -> Self {
        MarketDataKey::YieldCurve(currency)
    }

    /// Creates a credit-curve key for a single reference entity.
    #[inline]
    pub fn single_name_credit_curve(reference: SingleNameReference) -> Self {
        MarketDataKey::SingleNameCreditCurve(reference)
    }

    /// Creates a credit-curve key for a credit index.
    #[inline]
    pub fn index_credit_curve(reference: IndexReference) -> Self {
        MarketDataKey::IndexCreditCurve(reference)
    }

    /// Creates an FX-rate key for a currency pair.
    #[inline]
    pub fn fx_rate(pair: CurrencyPair) -> Self {
        MarketDataKey::FxRate(pair)
    }

    /// Resolves this key against a feed, yielding the identifier used to
    /// build and look up the value.
    ///
    /// Pure: the same key and feed always produce the same identifier.
    pub fn to_market_data_id(&self, feed: MarketDataFeed) -> MarketDataId {
        MarketDataId {
            key: self.clone(),
            feed,
        }
    }
}

impl fmt::Display for MarketDataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataKey::YieldCurve(ccy) => write!(f, "YieldCurve:{}", ccy),
            MarketDataKey::SingleNameCreditCurve(r) => {
                write!(f, "CreditCurve:{}", r.credit_curve_id())
            }
            MarketDataKey::IndexCreditCurve(r) => {
                write!(f, "CreditCurve:{}", r.credit_curve_id())
            }
            MarketDataKey::FxRate(pair) => write!(f, "FxRate:{}", pair),
        }
    }
}

/// A key resolved against a feed: the fully-qualified identifier of one
/// market-data series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketDataId {
    /// The business key
    key: MarketDataKey,
    /// The feed the data comes from
    feed: MarketDataFeed,
}

impl MarketDataId {
    /// Returns the business key.
    #[inline]
    pub fn key(&self) -> &MarketDataKey {
        &self.key
    }

    /// Returns the feed.
    #[inline]
    pub fn feed(&self) -> &MarketDataFeed {
        &self.feed
    }
}

impl fmt::Display for MarketDataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.key, self.feed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credit::reference::Seniority;

    #[test]
    fn test_yield_curve_key_display() {
        let key = MarketDataKey::yield_curve(Currency::EUR);
        assert_eq!(format!("{}", key), "YieldCurve:EUR");
    }

    #[test]
    fn test_single_name_key_display() {
        let key = MarketDataKey::single_name_credit_curve(SingleNameReference::new(
            "ACME Corp",
            Seniority::Senior,
            Currency::USD,
        ));
        assert_eq!(format!("{}", key), "CreditCurve:ACME Corp:SNRFOR:USD");
    }

    #[test]
    fn test_resolution_is_pure() {
        let key = MarketDataKey::yield_curve(Currency::USD);
        let id1 = key.to_market_data_id(MarketDataFeed::new("VENDOR-A"));
        let id2 = key.to_market_data_id(MarketDataFeed::new("VENDOR-A"));
        assert_eq!(id1, id2);

        let id3 = key.to_market_data_id(MarketDataFeed::new("VENDOR-B"));
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_id_accessors() {
        let key = MarketDataKey::yield_curve(Currency::GBP);
        let id = key.to_market_data_id(MarketDataFeed::no_feed());
        assert_eq!(id.key(), &key);
        assert_eq!(id.feed().name(), "None");
    }

    #[test]
    fn test_keys_distinguish_variants() {
        use std::collections::HashSet;

        let reference =
            SingleNameReference::new("ACME Corp", Seniority::Senior, Currency::USD);
        let mut set = HashSet::new();
        set.insert(MarketDataKey::yield_curve(Currency::USD));
        set.insert(MarketDataKey::single_name_credit_curve(reference.clone()));
        set.insert(MarketDataKey::single_name_credit_curve(reference));
        assert_eq!(set.len(), 2);
    }
}
