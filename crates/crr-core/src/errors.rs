//! Error types for the crr workspace.
//!
//! Every failure mode of lattice construction and pricing maps to a variant
//! of the single `thiserror`-derived [`Error`] enum.  Precondition checks go
//! through the [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A lattice node outside `0 <= index <= step <= steps` was accessed.
    #[error("node ({step}, {index}) out of range for a lattice with {steps} steps")]
    NodeOutOfRange {
        /// Time step of the offending access.
        step: usize,
        /// State index of the offending access.
        index: usize,
        /// Number of steps the lattice was allocated with.
        steps: usize,
    },

    /// A lattice node was read before being set.
    #[error("node ({step}, {index}) read before it was set")]
    UnsetNode {
        /// Time step of the offending read.
        step: usize,
        /// State index of the offending read.
        index: usize,
    },

    /// Textual parameters could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use crr_core::{ensure, errors::Error};
/// fn positive(x: f64) -> crr_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use crr_core::{fail, errors::Error};
/// fn always_err() -> crr_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_out_of_range_message() {
        let err = Error::NodeOutOfRange {
            step: 3,
            index: 4,
            steps: 2,
        };
        assert_eq!(
            err.to_string(),
            "node (3, 4) out of range for a lattice with 2 steps"
        );
    }

    #[test]
    fn ensure_produces_precondition() {
        fn check(u: f64, d: f64) -> Result<()> {
            crate::ensure!(u > d, "up factor ({u}) must exceed down factor ({d})");
            Ok(())
        }
        assert!(check(1.1, 0.9).is_ok());
        assert!(matches!(check(0.9, 1.1), Err(Error::Precondition(_))));
    }
}
