//! fxpricer - FX vanilla option pricing from the command line
//!
//! # Commands
//!
//! - `fxpricer price` - Price an option and show greeks and market inputs
//! - `fxpricer shock --start <date> --end <date>` - Replay a historical window
//! - `fxpricer surface` - List a pair's smile pillars, vols and strikes
//! - `fxpricer check` - Validate configuration and market data
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate wires configuration, logging and a
//! market data provider around `pricer_pricing` sessions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::{QuoteArgs, TradeArgs};
use config::FxPricerConfig;

/// FX vanilla option pricer
#[derive(Parser)]
#[command(name = "fxpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug) output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        env = "FXPRICER_CONFIG",
        default_value = "fxpricer.toml"
    )]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a vanilla option
    Price {
        #[command(flatten)]
        trade: TradeArgs,

        #[command(flatten)]
        quote: QuoteArgs,
    },

    /// Apply the market moves between two dates to a trade
    Shock {
        #[command(flatten)]
        trade: TradeArgs,

        /// Start of the historical window (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End of the historical window (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Fail when the two snapshots quote different tenors
        #[arg(long)]
        strict: bool,
    },

    /// Show the volatility surface of a pair
    Surface {
        /// Currency pair (defaults to the configured pair)
        #[arg(short, long)]
        pair: Option<String>,
    },

    /// Check configuration and market data
    Check {
        /// Check one pair instead of every configured pair
        #[arg(short, long)]
        pair: Option<String>,
    },
}

fn init_tracing(config: &FxPricerConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = FxPricerConfig::load_with_env_and_validate(&cli.config)?;
    init_tracing(&config, cli.verbose);
    debug!(config = %cli.config.display(), "configuration loaded");

    let result = match &cli.command {
        Commands::Price { trade, quote } => commands::price::run(&config, trade, quote, cli.json),
        Commands::Shock {
            trade,
            start,
            end,
            strict,
        } => commands::shock::run(&config, trade, start, end, *strict, cli.json),
        Commands::Surface { pair } => commands::surface::run(&config, pair.as_deref(), cli.json),
        Commands::Check { pair } => commands::check::run(&config, pair.as_deref()),
    };
    if let Err(e) = &result {
        error!(category = %e.category(), "{}", e);
    }
    result
}
