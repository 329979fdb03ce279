//! # crr-instruments
//!
//! Option payoffs and the American option priced by optimal stopping on a
//! binomial lattice.
//!
//! A payoff is anything implementing [`Payoff`]: the plain vanilla call and
//! put, or any closure `Fn(Real) -> Real` of the current asset price.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Markovian payoffs (call, put, closures).
pub mod payoff;

/// American option priced by backward induction.
pub mod american_option;

pub use american_option::{AmericanOption, OptionResults};
pub use payoff::{OptionType, Payoff, PlainVanillaPayoff};
