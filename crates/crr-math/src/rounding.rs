//! Rounding utilities.
//!
//! Lattices are rendered with a caller-chosen number of decimals; the
//! arithmetic itself never rounds.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use crr_core::Error;

/// Rounding convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// No rounding: return the value unchanged.
    None,
    /// Round up (ceiling towards positive infinity).
    Up,
    /// Round down (floor towards negative infinity).
    Down,
    /// Round to nearest, ties away from zero.
    #[default]
    Closest,
    /// Round towards zero (truncation).
    Floor,
    /// Round away from zero.
    Ceiling,
}

impl Rounding {
    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Rounding::None => "none",
            Rounding::Up => "up",
            Rounding::Down => "down",
            Rounding::Closest => "closest",
            Rounding::Floor => "floor",
            Rounding::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rounding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Rounding::None),
            "up" => Ok(Rounding::Up),
            "down" => Ok(Rounding::Down),
            "closest" | "nearest" => Ok(Rounding::Closest),
            "floor" | "truncate" => Ok(Rounding::Floor),
            "ceiling" => Ok(Rounding::Ceiling),
            other => Err(Error::Parse(format!(
                "unknown rounding convention {other:?}; expected none, up, down, closest, floor or ceiling"
            ))),
        }
    }
}

/// Round `value` to `precision` decimal places using the given convention.
pub fn round<F: Float>(value: F, precision: i32, convention: Rounding) -> F {
    if matches!(convention, Rounding::None) || !value.is_finite() {
        return value;
    }
    let Some(ten) = F::from(10) else {
        return value;
    };
    let mult = ten.powi(precision);
    let scaled = value * mult;
    let rounded = match convention {
        Rounding::None => scaled,
        Rounding::Up => scaled.ceil(),
        Rounding::Down => scaled.floor(),
        Rounding::Closest => scaled.round(),
        Rounding::Floor => scaled.trunc(),
        Rounding::Ceiling => {
            if scaled < F::zero() {
                scaled.floor()
            } else {
                scaled.ceil()
            }
        }
    };
    rounded / mult
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn closest_rounding() {
        assert_abs_diff_eq!(round(1.2345, 2, Rounding::Closest), 1.23, epsilon = 1e-10);
        assert_abs_diff_eq!(round(7.142857, 1, Rounding::Closest), 7.1, epsilon = 1e-10);
        assert_abs_diff_eq!(round(-2.5, 0, Rounding::Closest), -3.0, epsilon = 1e-10);
    }

    #[test]
    fn directional_rounding() {
        assert_abs_diff_eq!(round(1.2301, 2, Rounding::Up), 1.24, epsilon = 1e-10);
        assert_abs_diff_eq!(round(-1.2301, 2, Rounding::Down), -1.24, epsilon = 1e-10);
        assert_abs_diff_eq!(round(-1.239, 2, Rounding::Floor), -1.23, epsilon = 1e-10);
        assert_abs_diff_eq!(round(-1.231, 2, Rounding::Ceiling), -1.24, epsilon = 1e-10);
    }

    #[test]
    fn none_is_identity() {
        assert_eq!(round(1.23456789, 2, Rounding::None), 1.23456789);
    }

    #[test]
    fn parses_convention_names() {
        assert_eq!("closest".parse::<Rounding>(), Ok(Rounding::Closest));
        assert_eq!(" Ceiling ".parse::<Rounding>(), Ok(Rounding::Ceiling));
        assert_eq!("truncate".parse::<Rounding>(), Ok(Rounding::Floor));
        for convention in [Rounding::None, Rounding::Up, Rounding::Down] {
            assert_eq!(convention.to_string().parse::<Rounding>(), Ok(convention));
        }
        assert!(matches!("bankers".parse::<Rounding>(), Err(Error::Parse(_))));
    }

    #[test]
    fn works_for_f32() {
        assert_abs_diff_eq!(round(3.14159_f32, 2, Rounding::Closest), 3.14, epsilon = 1e-6);
    }
}
