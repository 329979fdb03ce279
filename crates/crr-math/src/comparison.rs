//! Tolerant floating-point comparison.

use crr_core::Real;

/// `true` when `a` and `b` differ by at most `n` units of machine epsilon
/// scaled by the larger magnitude.
///
/// Backward induction compares immediate exercise against continuation
/// with this, so values equal up to rounding noise count as a tie.
#[inline]
pub fn close_enough(a: Real, b: Real, n: u32) -> bool {
    if a == b {
        return true;
    }
    let tolerance = a.abs().max(b.abs()) * Real::EPSILON * Real::from(n);
    (a - b).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_values_are_close() {
        assert!(close_enough(0.0, 0.0, 0));
        assert!(close_enough(7.25, 7.25, 1));
    }

    #[test]
    fn rounding_noise_is_absorbed() {
        // 0.1 + 0.2 != 0.3 in binary floating point
        assert!(close_enough(0.1 + 0.2, 0.3, 10));
        assert!(close_enough(1.0, 1.0 + Real::EPSILON * 5.0, 10));
    }

    #[test]
    fn real_differences_are_not_close() {
        assert!(!close_enough(1.0, 1.0001, 100));
        assert!(!close_enough(3.0, 3.0 + 1e-10, 100));
    }
}
