//! Scenario market data.
//!
//! This module provides:
//! - [`key`]: Typed keys, feeds and resolved identifiers for market data
//! - [`value`]: The market-data value sum type and time series
//! - [`source`]: The source boundary and per-identifier build failures
//! - [`scenario`]: The N-scenario container and its single-scenario view
//! - [`result`]: Partial-failure assembly of scenario market data

pub mod key;
pub mod result;
pub mod scenario;
pub mod source;
pub mod value;

pub use key::{MarketDataFeed, MarketDataId, MarketDataKey};
pub use result::{build_scenario_market_data, ScenarioMarketDataResult};
pub use scenario::{ScenarioMarketData, ScenarioValue, SingleScenarioMarketData};
pub use source::{BuildFailure, FailureKind, MapMarketDataSource, MarketDataSource};
pub use value::{MarketDataValue, TimeSeries};
