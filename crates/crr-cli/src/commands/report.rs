//! Writing priced options to the terminal.

use std::io::Write;

use serde::Serialize;

use crr_core::utilities::data_formatters::format_rate;
use crr_core::utilities::format_real;
use crr_core::Real;
use crr_instruments::OptionResults;
use crr_math::round;
use crr_methods::{BinomialModel, BinomialParams, Lattice};

use crate::config::{DisplayConfig, OutputFormat};
use crate::Result;

/// One priced option, ready for output.
#[derive(Debug, Serialize)]
pub struct PricedOption {
    pub option: String,
    pub npv: Real,
    pub european_npv: Real,
    pub early_exercise_nodes: Vec<(usize, usize)>,
    pub results: OptionResults,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    model: &'a BinomialParams,
    risk_neutral_probability: Real,
    asset_tree: Option<&'a Lattice<Real>>,
    options: &'a [PricedOption],
}

/// Write a summary of the model.
pub fn write_model_summary<W: Write>(
    out: &mut W,
    model: &BinomialModel,
    display: &DisplayConfig,
) -> Result<()> {
    writeln!(
        out,
        "Binomial model: U = {}, D = {}, R = {}, S0 = {}, N = {}",
        model.up(),
        model.down(),
        format_rate(model.rate()),
        model.spot(),
        model.steps()
    )?;
    writeln!(
        out,
        "Risk-neutral probability of an up-move: {}",
        format_real(model.risk_neutral_probability(), display.precision.max(4))
    )?;
    writeln!(out)?;
    Ok(())
}

fn format_price(value: Real, display: &DisplayConfig) -> String {
    let digits = i32::try_from(display.precision).unwrap_or(i32::MAX);
    format_real(round(value, digits, display.rounding), display.precision)
}

/// Write one priced option as text: the price, its value tree and,
/// optionally, the asset price tree.
pub fn write_option_table<W: Write>(
    out: &mut W,
    priced: &PricedOption,
    model: &BinomialModel,
    display: &DisplayConfig,
) -> Result<()> {
    let precision = display.precision;
    let rounding = display.rounding;
    writeln!(out, "American {}", priced.option)?;
    writeln!(
        out,
        "The price of the option is {}",
        format_price(priced.npv, display)
    )?;
    writeln!(
        out,
        "European counterpart: {}",
        format_price(priced.european_npv, display)
    )?;
    if priced.early_exercise_nodes.is_empty() {
        writeln!(out, "Early exercise is never optimal")?;
    } else {
        let nodes: Vec<String> = priced
            .early_exercise_nodes
            .iter()
            .map(|(n, i)| format!("({n}, {i})"))
            .collect();
        writeln!(out, "Early exercise is optimal at nodes {}", nodes.join(" "))?;
    }
    writeln!(out, "\nThe price tree of the option is:")?;
    write!(out, "{}", priced.results.value_tree().render_with(precision, rounding))?;
    if display.show_asset_tree {
        writeln!(out, "\nThe price tree of the stock is:")?;
        write!(out, "{}", model.asset_tree().render_with(precision, rounding))?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write all priced options in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    model: &BinomialModel,
    options: &[PricedOption],
    display: &DisplayConfig,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            write_model_summary(out, model, display)?;
            for priced in options {
                write_option_table(out, priced, model, display)?;
            }
        }
        OutputFormat::Json => {
            let report = JsonReport {
                model: model.params(),
                risk_neutral_probability: model.risk_neutral_probability(),
                asset_tree: display.show_asset_tree.then(|| model.asset_tree()),
                options,
            };
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
