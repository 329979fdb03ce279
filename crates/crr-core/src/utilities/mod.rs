//! Miscellaneous utilities.

/// Parsing of textual model parameters.
pub mod data_parsers;

/// Formatting of numeric values for display.
pub mod data_formatters;

pub use data_formatters::format_real;
pub use data_parsers::{parse_model_params, parse_real, parse_steps};
