//! Run configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags (which themselves fall back to `CRR_*` environment
//! variables).
//!
//! ```toml
//! log_level = "info"
//! format = "table"
//!
//! [model]
//! u = 1.1
//! d = 0.9
//! r = 0.05
//! s0 = 100.0
//! steps = 3
//!
//! [[options]]
//! kind = "call"
//! strike = 100.0
//!
//! [display]
//! precision = 2
//! rounding = "closest"
//! show_asset_tree = true
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crr_core::utilities::parse_model_params;
use crr_core::Real;
use crr_instruments::OptionType;
use crr_math::Rounding;
use crr_methods::BinomialParams;

/// Largest number of decimals accepted for display.
pub const MAX_PRECISION: usize = 12;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid display precision: {0}. Must be at most {MAX_PRECISION}")]
    InvalidPrecision(usize),

    #[error("Invalid rounding convention: {0}")]
    InvalidRounding(String),

    #[error("Missing model parameters: give --params \"U, D, R, S0, N\" or a [model] table")]
    MissingModel,

    #[error("Invalid model parameters: {0}")]
    InvalidModel(#[from] crr_core::Error),

    #[error("No options to price: give --call/--put strikes or [[options]] entries")]
    NoOptions,

    #[error("Invalid strike {0}: must be finite")]
    InvalidStrike(Real),
}

/// Log levels understood by the tracing filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable triangular trees.
    #[default]
    Table,
    /// One JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

fn deserialize_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let s = String::deserialize(deserializer)?;
    T::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[model]` table
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ModelConfig {
    pub u: Real,
    pub d: Real,
    pub r: Real,
    pub s0: Real,
    pub steps: usize,
}

impl From<ModelConfig> for BinomialParams {
    fn from(m: ModelConfig) -> Self {
        BinomialParams::new(m.u, m.d, m.r, m.s0, m.steps)
    }
}

/// One `[[options]]` entry
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OptionConfig {
    pub kind: OptionType,
    pub strike: Real,
}

/// `[display]` table
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimals shown for every value.
    pub precision: usize,
    /// How values are rounded to `precision` decimals.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub rounding: Rounding,
    /// Print the asset price tree after each option tree.
    pub show_asset_tree: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 1,
            rounding: Rounding::Closest,
            show_asset_tree: true,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: Option<ModelConfig>,
    pub options: Vec<OptionConfig>,
    pub display: DisplayConfig,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub log_level: LogLevel,
    #[serde(deserialize_with = "deserialize_from_str")]
    pub format: OutputFormat,
}

/// Command-line overrides, all optional
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub format: Option<String>,
    pub precision: Option<usize>,
    pub rounding: Option<String>,
    pub hide_asset_tree: bool,
    pub params: Option<String>,
    pub calls: Vec<Real>,
    pub puts: Vec<Real>,
}

impl AppConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Load the file if given, then apply the command-line overrides
    pub fn build(path: Option<&Path>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of file values.
    ///
    /// Strikes given on the command line replace the file's option list.
    pub fn apply(&mut self, overrides: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &overrides.log_level {
            self.log_level = level.parse()?;
        }
        if let Some(format) = &overrides.format {
            self.format = format.parse()?;
        }
        if let Some(precision) = overrides.precision {
            self.display.precision = precision;
        }
        if let Some(rounding) = &overrides.rounding {
            self.display.rounding = rounding
                .parse()
                .map_err(|e: crr_core::Error| ConfigError::InvalidRounding(e.to_string()))?;
        }
        if overrides.hide_asset_tree {
            self.display.show_asset_tree = false;
        }
        if let Some(params) = &overrides.params {
            let (u, d, r, s0, steps) = parse_model_params(params)?;
            self.model = Some(ModelConfig { u, d, r, s0, steps });
        }
        if !overrides.calls.is_empty() || !overrides.puts.is_empty() {
            self.options = overrides
                .calls
                .iter()
                .map(|&strike| OptionConfig {
                    kind: OptionType::Call,
                    strike,
                })
                .chain(overrides.puts.iter().map(|&strike| OptionConfig {
                    kind: OptionType::Put,
                    strike,
                }))
                .collect();
        }
        Ok(())
    }

    /// Validate settings that do not depend on the command being run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision(self.display.precision));
        }
        if let Some(option) = self.options.iter().find(|o| !o.strike.is_finite()) {
            return Err(ConfigError::InvalidStrike(option.strike));
        }
        Ok(())
    }

    /// Model parameters, required by the `price` command
    pub fn model_params(&self) -> Result<BinomialParams, ConfigError> {
        self.model.map(Into::into).ok_or(ConfigError::MissingModel)
    }
}
