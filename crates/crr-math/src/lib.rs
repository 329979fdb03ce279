//! # crr-math
//!
//! Small numerical utilities: rounding conventions used when displaying
//! lattices, and tolerant floating-point comparisons.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Rounding conventions.
pub mod rounding;

/// Floating-point comparison helpers.
pub mod comparison;

pub use comparison::close_enough;
pub use rounding::{round, Rounding};
