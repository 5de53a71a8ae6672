//! Parameter sensitivity containers.
//!
//! This module provides:
//! - [`CurrencyParameterSensitivity`] / [`CurrencyParameterSensitivities`]:
//!   Per-node first-derivative vectors keyed by (curve name, currency)
//! - [`CrossGammaParameterSensitivity`] / [`CrossGammaParameterSensitivities`]:
//!   Per-node second-derivative matrices under the same keying
//!
//! Collections never hold two entries with the same key: combining sums
//! overlapping entries and appends the rest, so accumulation starts from
//! `empty()` and folds with `combined_with`.

pub mod cross_gamma_param;
pub mod currency_param;

pub use cross_gamma_param::{CrossGammaParameterSensitivities, CrossGammaParameterSensitivity};
pub use currency_param::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
