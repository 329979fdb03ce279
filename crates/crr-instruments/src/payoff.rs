//! Option payoffs.
//!
//! A payoff maps the current asset price to the amount received on
//! exercise.  Only Markovian payoffs are supported: the value depends on
//! the price at the exercise node and nothing else.

use std::fmt;
use std::str::FromStr;

use crr_core::{Error, Real};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            other => Err(Error::Parse(format!(
                "unknown option type '{other}', expected call or put"
            ))),
        }
    }
}

/// The single capability a payoff provides: evaluate at an asset price.
///
/// Implemented by [`PlainVanillaPayoff`] and by every closure
/// `Fn(Real) -> Real`, so custom Markovian payoffs need no new type.
pub trait Payoff {
    /// Payoff received when exercising with the asset at `price`.
    fn value(&self, price: Real) -> Real;

    /// Human-readable description.
    fn description(&self) -> String {
        "custom payoff".to_string()
    }
}

impl<F> Payoff for F
where
    F: Fn(Real) -> Real,
{
    fn value(&self, price: Real) -> Real {
        self(price)
    }
}

/// Standard "plain vanilla" payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// `max(S − K, 0)`.
    pub fn call(strike: Real) -> Self {
        Self::new(OptionType::Call, strike)
    }

    /// `max(K − S, 0)`.
    pub fn put(strike: Real) -> Self {
        Self::new(OptionType::Put, strike)
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }

    fn description(&self) -> String {
        format!("vanilla {} @ {}", self.option_type, self.strike)
    }
}
