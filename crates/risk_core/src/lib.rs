//! # risk_core: Foundation Layer of the Credion Risk Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! risk_core serves as the bottom layer of the workspace, providing:
//! - Currency types: `Currency`, `CurrencyPair`, `CurrencyAmount` (`types`)
//! - Date type: `Date` (`types::time`)
//! - Nodal yield and credit curves plus the immutable rates provider
//!   (`market_data`)
//! - Finite-difference differentiation (`math::differentiation`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other risk_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Immutability
//!
//! Every market-data value object in this crate is immutable once built.
//! Transformations such as [`market_data::curves::NodalCurve::with_values`]
//! and [`market_data::RatesProvider::with_discount_curve`] return new
//! instances and share unaffected substructure, so concurrent readers
//! never require synchronisation.
//!
//! ## Usage Examples
//!
//! ```rust
//! use risk_core::types::{Currency, Date};
//! use risk_core::market_data::curves::{CurveName, NodalCurve};
//!
//! // Date operations
//! let valuation_date = Date::from_ymd(2014, 10, 16).unwrap();
//! assert_eq!(valuation_date.year(), 2014);
//!
//! // Currency information
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//!
//! // A nodal zero curve
//! let curve = NodalCurve::new(
//!     CurveName::new("USD Discount"),
//!     vec!["1Y".to_string(), "5Y".to_string(), "10Y".to_string()],
//!     vec![1.0, 5.0, 10.0],
//!     vec![0.01_f64, 0.015, 0.02],
//! )
//! .unwrap();
//! assert_eq!(curve.node_count(), 3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for currencies, dates and curves

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
