//! Data formatting helpers.

use crate::{Rate, Real};

/// Format a real number with the given number of decimal places.
pub fn format_real(value: Real, decimals: usize) -> String {
    format!("{:.prec$}", value, prec = decimals)
}

/// Format a per-period rate as a percentage string (e.g. `0.05` → `"5.00 %"`).
pub fn format_rate(r: Rate) -> String {
    format!("{:.2} %", r * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(7.142857, 1), "7.1");
        assert_eq!(format_real(7.142857, 4), "7.1429");
        assert_eq!(format_real(10.0, 0), "10");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(0.05), "5.00 %");
    }
}
