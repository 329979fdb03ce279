//! # crr
//!
//! Prices American options on a single underlying with the
//! Cox-Ross-Rubinstein binomial lattice, returning the time-zero value and
//! the option value at every node.
//!
//! This crate is a **façade** that re-exports the public items of the
//! workspace crates.
//!
//! ## Quick start
//!
//! ```rust
//! use crr::instruments::AmericanOption;
//! use crr::methods::{BinomialModel, BinomialParams};
//!
//! let model = BinomialModel::new(BinomialParams::new(1.1, 0.9, 0.05, 100.0, 1))?;
//! let results = AmericanOption::call(100.0).price(&model)?;
//! approx::assert_relative_eq!(results.npv(), 0.75 * 10.0 / 1.05, epsilon = 1e-12);
//! # Ok::<(), crr::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use crr_core as core;

/// Rounding and comparison utilities.
pub use crr_math as math;

/// Lattice storage, the CRR model, and backward induction.
pub use crr_methods as methods;

/// Payoffs and the American option.
pub use crr_instruments as instruments;
