//! Price command implementation
//!
//! Builds the model from the configuration and prices every configured
//! option on it.

use std::io::Write;

use tracing::info;

use crr_instruments::{AmericanOption, Payoff, PlainVanillaPayoff};
use crr_methods::BinomialModel;

use super::report::{write_report, PricedOption};
use crate::config::{AppConfig, ConfigError, OptionConfig};
use crate::Result;

/// Price one vanilla option on `model`.
pub fn price_option(model: &BinomialModel, entry: &OptionConfig) -> Result<PricedOption> {
    let option = AmericanOption::new(PlainVanillaPayoff::new(entry.kind, entry.strike));
    let results = option.price(model)?;
    Ok(PricedOption {
        option: option.payoff().description(),
        npv: results.npv(),
        european_npv: option.european_price(model)?,
        early_exercise_nodes: results.early_exercise_nodes(),
        results,
    })
}

/// Run the price command
pub fn run<W: Write>(config: &AppConfig, out: &mut W) -> Result<()> {
    let params = config.model_params()?;
    if config.options.is_empty() {
        return Err(ConfigError::NoOptions.into());
    }
    let model = BinomialModel::new(params)?;
    info!(steps = model.steps(), options = config.options.len(), "Starting pricing");

    let priced = config
        .options
        .iter()
        .map(|entry| price_option(&model, entry))
        .collect::<Result<Vec<_>>>()?;

    write_report(out, &model, &priced, &config.display, config.format)?;
    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliOverrides, OutputFormat};
    use crate::CliError;

    fn config(params: &str, calls: Vec<f64>, puts: Vec<f64>) -> AppConfig {
        let overrides = CliOverrides {
            params: Some(params.to_string()),
            calls,
            puts,
            ..CliOverrides::default()
        };
        AppConfig::build(None, &overrides).unwrap()
    }

    #[test]
    fn prints_price_and_trees() {
        let config = config("1.1, 0.9, 0.05, 100, 1", vec![100.0], vec![]);
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("The price of the option is 7.1"), "{text}");
        assert!(text.contains("The price tree of the option is:\n7.1\n0.0 10.0\n"), "{text}");
        assert!(text.contains("The price tree of the stock is:\n100.0\n90.0 110.0\n"), "{text}");
    }

    #[test]
    fn rounding_convention_applies_to_prices_and_trees() {
        let mut config = config("1.1, 0.9, 0.05, 100, 1", vec![100.0], vec![]);
        config.display.rounding = crr_math::Rounding::Up;
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("The price of the option is 7.2"), "{text}");
        assert!(text.contains("The price tree of the option is:\n7.2\n0.0 10.0\n"), "{text}");
    }

    #[test]
    fn reports_early_exercise_nodes() {
        let config = config("2, 0.5, 0.25, 4, 2", vec![], vec![5.0]);
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("American vanilla put @ 5"), "{text}");
        assert!(text.contains("Early exercise is optimal at nodes (1, 0)"), "{text}");
    }

    #[test]
    fn json_output_is_one_document() {
        let mut config = config("2, 0.5, 0.25, 4, 2", vec![4.0], vec![5.0]);
        config.format = OutputFormat::Json;
        let mut out = Vec::new();
        run(&config, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["options"].as_array().unwrap().len(), 2);
        assert_eq!(json["model"]["steps"], 2);
        let put_npv = json["options"][1]["npv"].as_f64().unwrap();
        approx::assert_relative_eq!(put_npv, 1.36, epsilon = 1e-12);
    }

    #[test]
    fn arbitrage_is_rejected() {
        let config = config("1.1, 0.9, 0.2, 100, 2", vec![100.0], vec![]);
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Pricing(crr_core::Error::Precondition(_))));
    }

    #[test]
    fn oversized_step_count_is_rejected() {
        let config = config("1.1, 0.9, 0.05, 100, 100000", vec![100.0], vec![]);
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Pricing(crr_core::Error::Precondition(_))));
        assert!(err.to_string().contains("at most"), "{err}");
    }

    #[test]
    fn missing_options_are_reported() {
        let config = config("1.1, 0.9, 0.05, 100, 2", vec![], vec![]);
        let err = run(&config, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NoOptions)));
    }
}
