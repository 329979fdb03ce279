//! Interactive command implementation
//!
//! Prompts for the model parameters, then for the strike of an American
//! call and of an American put, pricing each as soon as it is entered.
//! Input is parsed field by field; malformed or arbitrage-admitting input
//! is reported and asked for again.

use std::io::{BufRead, ErrorKind, Write};

use tracing::{debug, warn};

use crr_core::utilities::{parse_model_params, parse_real};
use crr_instruments::OptionType;
use crr_methods::{BinomialModel, BinomialParams};

use super::price::price_option;
use super::report::{write_option_table, write_report, PricedOption};
use crate::config::{AppConfig, OptionConfig, OutputFormat};
use crate::Result;

fn read_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(std::io::Error::new(ErrorKind::UnexpectedEof, "input closed").into());
    }
    Ok(line)
}

fn prompt_model<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<BinomialModel> {
    loop {
        let line = read_line(input, out, "Enter U, D, R, S0 and N: ")?;
        let model = parse_model_params(&line).and_then(|(u, d, r, s0, steps)| {
            BinomialModel::new(BinomialParams::new(u, d, r, s0, steps))
        });
        match model {
            Ok(model) => {
                writeln!(out)?;
                return Ok(model);
            }
            Err(e) => {
                warn!(error = %e, "rejected model parameters");
                writeln!(out, "Invalid model parameters: {e}")?;
            }
        }
    }
}

fn prompt_strike<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    kind: OptionType,
) -> Result<f64> {
    let prompt = format!("Enter strike price of American {kind} option: ");
    loop {
        let line = read_line(input, out, &prompt)?;
        match parse_real(&line) {
            Ok(strike) => {
                writeln!(out)?;
                return Ok(strike);
            }
            Err(e) => writeln!(out, "Invalid strike price: {e}")?,
        }
    }
}

fn session<R, W, F>(
    input: &mut R,
    out: &mut W,
    mut on_priced: F,
) -> Result<(BinomialModel, Vec<PricedOption>)>
where
    R: BufRead,
    W: Write,
    F: FnMut(&mut W, &PricedOption, &BinomialModel) -> Result<()>,
{
    let model = prompt_model(input, out)?;
    debug!(steps = model.steps(), "model entered interactively");

    let mut priced = Vec::new();
    for kind in [OptionType::Call, OptionType::Put] {
        let strike = prompt_strike(input, out, kind)?;
        let option = price_option(&model, &OptionConfig { kind, strike })?;
        on_priced(out, &option, &model)?;
        priced.push(option);
    }
    Ok((model, priced))
}

/// Run the interactive command.
///
/// In table mode prompts and results share `out`.  In JSON mode prompts
/// and input errors go to `prompts`, so `out` holds only the JSON document.
pub fn run<R, W, P>(config: &AppConfig, input: &mut R, out: &mut W, prompts: &mut P) -> Result<()>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    match config.format {
        OutputFormat::Table => {
            session(input, out, |out, option, model| {
                write_option_table(out, option, model, &config.display)
            })?;
        }
        OutputFormat::Json => {
            let (model, priced) = session(input, prompts, |_, _, _| Ok(()))?;
            write_report(out, &model, &priced, &config.display, OutputFormat::Json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;
    use std::io::Cursor;

    fn run_with(config: &AppConfig, input: &str) -> (Result<()>, String, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let mut prompts = Vec::new();
        let result = run(config, &mut input, &mut out, &mut prompts);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(prompts).unwrap(),
        )
    }

    fn session(input: &str) -> (Result<()>, String) {
        let (result, out, prompts) = run_with(&AppConfig::default(), input);
        assert!(prompts.is_empty(), "{prompts}");
        (result, out)
    }

    #[test]
    fn prices_call_then_put() {
        let (result, text) = session("2, 0.5, 0.25, 4, 2\n4\n5\n");
        result.unwrap();
        assert!(text.contains("Enter strike price of American call option: "));
        assert!(text.contains("American vanilla call @ 4"));
        assert!(text.contains("American vanilla put @ 5"));
        assert!(text.contains("The price of the option is 1.4"), "{text}");
    }

    #[test]
    fn reprompts_after_bad_input() {
        let (result, text) = session("__import__('os')\n1.1, 0.9, 0.2, 100, 2\n1.1 0.9 0.05 100 1\nten\n100\n100\n");
        result.unwrap();
        assert_eq!(text.matches("Invalid model parameters").count(), 2, "{text}");
        assert_eq!(text.matches("Invalid strike price").count(), 1, "{text}");
        assert!(text.contains("The price of the option is 7.1"), "{text}");
    }

    #[test]
    fn closed_input_is_an_error() {
        let (result, _) = session("1.1, 0.9, 0.05, 100, 1\n");
        assert!(matches!(result, Err(CliError::Io(e)) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[test]
    fn json_mode_keeps_prompts_off_stdout() {
        let config = AppConfig {
            format: OutputFormat::Json,
            ..AppConfig::default()
        };
        let (result, out, prompts) = run_with(&config, "oops\n2, 0.5, 0.25, 4, 2\n4\n5\n");
        result.unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["options"].as_array().unwrap().len(), 2);
        assert!(prompts.contains("Enter U, D, R, S0 and N: "), "{prompts}");
        assert!(prompts.contains("Invalid model parameters"), "{prompts}");
        assert!(!out.contains("Enter"), "{out}");
    }
}
