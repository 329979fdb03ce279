//! crr CLI - American option pricing on a binomial lattice
//!
//! # Commands
//!
//! - `crr price --params "U, D, R, S0, N" --call K --put K` - Price options
//!   on a model given by flags or by the configuration file
//! - `crr interactive` - Prompt for the model and strikes, then price an
//!   American call and an American put
//!
//! Results go to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{AppConfig, CliOverrides};

/// Price American options under the Cox-Ross-Rubinstein binomial model
#[derive(Parser)]
#[command(name = "crr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "CRR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CRR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Decimals shown for prices and trees
    #[arg(short, long, global = true)]
    precision: Option<usize>,

    /// Rounding of displayed values (none, up, down, closest, floor, ceiling)
    #[arg(long, global = true)]
    rounding: Option<String>,

    /// Do not print the asset price tree
    #[arg(long, global = true)]
    no_asset_tree: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price American options on a binomial model
    Price {
        /// Model parameters "U, D, R, S0, N"
        #[arg(long, env = "CRR_PARAMS")]
        params: Option<String>,

        /// Strike of an American call (repeatable)
        #[arg(long = "call", value_name = "STRIKE")]
        calls: Vec<f64>,

        /// Strike of an American put (repeatable)
        #[arg(long = "put", value_name = "STRIKE")]
        puts: Vec<f64>,
    },

    /// Enter the model and strikes at a prompt
    Interactive,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut overrides = CliOverrides {
        log_level: cli.log_level,
        format: cli.format,
        precision: cli.precision,
        rounding: cli.rounding,
        hide_asset_tree: cli.no_asset_tree,
        ..CliOverrides::default()
    };
    if let Commands::Price {
        params,
        calls,
        puts,
    } = &cli.command
    {
        overrides.params = params.clone();
        overrides.calls = calls.clone();
        overrides.puts = puts.clone();
    }

    let config = AppConfig::build(cli.config.as_deref(), &overrides)?;
    init_tracing(config.log_level.as_filter_str());
    if let Some(path) = &cli.config {
        info!(config = %path.display(), "Loaded configuration");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Price { .. } => commands::price::run(&config, &mut out),
        Commands::Interactive => {
            let stdin = std::io::stdin();
            let mut prompts = std::io::stderr();
            commands::interactive::run(&config, &mut stdin.lock(), &mut out, &mut prompts)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
