//! Numerical routines.
//!
//! This module provides:
//! - [`differentiation`]: Finite-difference Jacobians of vector fields

pub mod differentiation;

pub use differentiation::{
    DifferentiationError, FiniteDifferenceType, VectorFieldFirstOrderDifferentiator,
};
