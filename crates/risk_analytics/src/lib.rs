//! # risk_analytics: Sensitivity Analytics of the Credion Risk Engine
//!
//! ## Layer 3 (Analytics) Role
//!
//! risk_analytics sits on top of `risk_core` and provides:
//! - Currency parameter sensitivities: per-node first-derivative vectors
//!   keyed by curve name and currency (`sensitivity`)
//! - Cross-gamma parameter sensitivities: per-node second-derivative
//!   matrices under the same keying (`sensitivity`)
//! - The finite-difference cross-gamma calculator (`cross_gamma`)
//!
//! ## Computation model
//!
//! The cross-gamma calculator takes a base rates provider and a caller
//! supplied first-order sensitivity function. For every discount curve
//! it perturbs the curve's node values, substitutes the perturbed curve
//! into a fresh provider (the base is never mutated) and differentiates
//! the resulting sensitivity vector numerically. Curves are independent,
//! so they are processed in parallel through rayon.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for sensitivity entries

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cross_gamma;
pub mod error;
pub mod sensitivity;

pub use cross_gamma::CrossGammaCalculator;
pub use error::AnalyticsError;
pub use sensitivity::{
    CrossGammaParameterSensitivities, CrossGammaParameterSensitivity,
    CurrencyParameterSensitivities, CurrencyParameterSensitivity,
};
