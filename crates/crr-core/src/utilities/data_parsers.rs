//! Data parsing helpers.
//!
//! Turns user-supplied text into model parameters.  Input is split into
//! numeric fields and each field is parsed on its own; nothing is ever
//! evaluated as an expression.

use crate::errors::{Error, Result};
use crate::{Real, Size};

/// Parse a single finite real number, e.g. `"100"`, `" 1.05 "`, `"-2e-3"`.
///
/// # Errors
/// Returns [`Error::Parse`] if the field is empty, not a number, or not finite.
pub fn parse_real(s: &str) -> Result<Real> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Parse("expected a number, got an empty field".into()));
    }
    let value: Real = s
        .parse()
        .map_err(|_| Error::Parse(format!("'{s}' is not a number")))?;
    if !value.is_finite() {
        return Err(Error::Parse(format!("'{s}' is not a finite number")));
    }
    Ok(value)
}

/// Parse a non-negative step count, e.g. `"3"`.
///
/// # Errors
/// Returns [`Error::Parse`] if the field is not a non-negative integer.
pub fn parse_steps(s: &str) -> Result<Size> {
    let s = s.trim();
    s.parse()
        .map_err(|_| Error::Parse(format!("'{s}' is not a non-negative integer step count")))
}

/// Split a parameter list on commas and/or whitespace.
///
/// A single pair of surrounding parentheses is tolerated, so both
/// `"1.1, 0.9, 0.05, 100, 3"` and `"(1.1 0.9 0.05 100 3)"` are accepted.
fn split_fields(s: &str) -> Vec<&str> {
    let s = s.trim();
    let s = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Parse the five binomial model parameters `U, D, R, S0, N`.
///
/// Returns `(u, d, r, s0, steps)` on success.  Only the syntax is checked
/// here; financial validity is the model constructor's job.
///
/// # Errors
/// Returns [`Error::Parse`] if the field count is not five or any field
/// fails to parse.
pub fn parse_model_params(s: &str) -> Result<(Real, Real, Real, Real, Size)> {
    let fields = split_fields(s);
    if fields.len() != 5 {
        return Err(Error::Parse(format!(
            "expected 5 values (U, D, R, S0, N), got {}",
            fields.len()
        )));
    }
    let u = parse_real(fields[0])?;
    let d = parse_real(fields[1])?;
    let r = parse_real(fields[2])?;
    let s0 = parse_real(fields[3])?;
    let steps = parse_steps(fields[4])?;
    Ok((u, d, r, s0, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real() {
        assert_eq!(parse_real("100"), Ok(100.0));
        assert_eq!(parse_real(" 1.05 "), Ok(1.05));
        assert!(parse_real("").is_err());
        assert!(parse_real("abc").is_err());
        assert!(parse_real("inf").is_err());
        assert!(parse_real("NaN").is_err());
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps("3"), Ok(3));
        assert_eq!(parse_steps("0"), Ok(0));
        assert!(parse_steps("-1").is_err());
        assert!(parse_steps("2.5").is_err());
    }

    #[test]
    fn test_parse_model_params_comma_separated() {
        assert_eq!(
            parse_model_params("1.1, 0.9, 0.05, 100, 3"),
            Ok((1.1, 0.9, 0.05, 100.0, 3))
        );
    }

    #[test]
    fn test_parse_model_params_tuple_and_whitespace() {
        assert_eq!(
            parse_model_params("(2 0.5 0.25 4 2)"),
            Ok((2.0, 0.5, 0.25, 4.0, 2))
        );
    }

    #[test]
    fn test_parse_model_params_rejects_code() {
        assert!(parse_model_params("__import__('os').system('ls')").is_err());
        assert!(parse_model_params("1.1, 0.9, 0.05, 100").is_err());
        assert!(parse_model_params("1.1, 0.9, 0.05, 100, 3, 7").is_err());
        assert!(parse_model_params("1.1, 0.9, 0.05, 100, 1+2").is_err());
    }

    proptest::proptest! {
        #[test]
        fn finite_reals_parse_back(x in -1.0e12_f64..1.0e12) {
            proptest::prop_assert_eq!(parse_real(&x.to_string()), Ok(x));
        }
    }
}
