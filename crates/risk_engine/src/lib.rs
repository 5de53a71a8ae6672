//! # risk_engine: Scenario Calculation Engine of the Credion Risk Engine
//!
//! ## Layer 2 (Engine) Role
//!
//! risk_engine sits on top of `risk_core` and provides:
//! - Market-data keys, feeds and identifiers (`market_data::key`)
//! - Scenario market data with a per-scenario view (`market_data::scenario`)
//! - Partial-failure assembly of scenario market data
//!   (`market_data::result`)
//! - The calculation-function contract with N-way scenario fan-out and
//!   optional automatic currency conversion (`function`)
//! - The CDS calculation function, its measure pricers and a portfolio
//!   runner (`credit`, `measures`, `runner`)
//!
//! ## Execution model
//!
//! A calculation function declares the market data it needs via
//! [`requirements::CalculationRequirements`]; the engine assembles
//! scenario market data from a [`market_data::MarketDataSource`],
//! tolerating individual build failures; the function is then invoked
//! once per scenario index against an immutable single-scenario view.
//! Scenario indices are independent, so the fan-out runs through rayon
//! once the scenario count passes a configurable threshold.
//!
//! ## Failure model
//!
//! Building market data never aborts on a single failed identifier: each
//! requested identifier ends up either built, in the single-value failure
//! map or in the time-series failure map, with the original reason
//! preserved for any later lookup. Configuration errors (a calculation
//! invoked against data of the wrong type, an expired trade) are fatal
//! for the offending trade only and are reported with trade identity by
//! the runner.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for keys, trades and measure values

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod credit;
pub mod error;
pub mod function;
pub mod market_data;
pub mod measures;
pub mod requirements;
pub mod runner;


pub use error::EngineError;
