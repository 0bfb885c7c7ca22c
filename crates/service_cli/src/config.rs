//! `fxpricer.toml` loading.
//!
//! ```toml
//! log_level = "info"
//!
//! [pricing]
//! pair = "EURUSD"
//! direction = "Client buys"
//! option_type = "Call"
//! notional = 1000000.0
//! notional_currency = "foreign"
//! strike = "ATMF"
//! expiry = "3M"
//! price_format = "percent"
//! premium_currency = "domestic"
//!
//! [market_data]
//! source = "mock"
//! snapshot_dir = "data/snapshots"
//! tenors = ["1W", "1M", "3M", "6M", "1Y"]
//! pairs = ["EURUSD", "USDJPY"]
//! ```
//!
//! Every field is optional. `FXPRICER_*` environment variables override the
//! file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_core::types::{CurrencyPair, Tenor};
use pricer_models::instruments::fx::{Direction, FxOptionType, NotionalCurrency};
use pricer_pricing::provider::MOCK_TENORS;
use pricer_pricing::{Expiry, PremiumCurrency, PriceFormat, StrikeSpec};
use serde::Deserialize;
use thiserror::Error;

/// Where snapshots come from.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Built-in mock fixture
    #[default]
    Mock,
    /// JSON snapshots under `snapshot_dir`
    File,
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(DataSource::Mock),
            "file" => Ok(DataSource::File),
            other => Err(format!("unknown market data source '{}'", other)),
        }
    }
}

/// Defaults for trade fields not given on the command line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingDefaults {
    /// Currency pair
    pub pair: String,
    /// `Client buys` or `Client sells`
    pub direction: String,
    /// `Call` or `Put`
    pub option_type: String,
    /// Notional amount
    pub notional: f64,
    /// `foreign` or `domestic`
    pub notional_currency: String,
    /// Strike convention or level
    pub strike: String,
    /// Tenor, ISO date or days
    pub expiry: String,
    /// `percent`, `percent_domestic` or `pips`
    pub price_format: String,
    /// `domestic` or `foreign`
    pub premium_currency: String,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        Self {
            pair: "EURUSD".to_string(),
            direction: "Client buys".to_string(),
            option_type: "Call".to_string(),
            notional: 1_000_000.0,
            notional_currency: "foreign".to_string(),
            strike: "ATMF".to_string(),
            expiry: "3M".to_string(),
            price_format: "percent".to_string(),
            premium_currency: "domestic".to_string(),
        }
    }
}

/// Market data settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MarketDataConfig {
    /// Snapshot source
    pub source: DataSource,
    /// Directory of JSON snapshots for the `file` source
    pub snapshot_dir: PathBuf,
    /// Pillars requested from the mock source
    pub tenors: Vec<String>,
    /// Pairs covered by `check`
    pub pairs: Vec<String>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            source: DataSource::default(),
            snapshot_dir: PathBuf::from("data/snapshots"),
            tenors: MOCK_TENORS.iter().map(|t| t.to_string()).collect(),
            pairs: ["EURUSD", "GBPUSD", "USDJPY", "AUDUSD", "USDCAD", "USDCHF"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// `fxpricer.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FxPricerConfig {
    /// Trade defaults
    #[serde(default)]
    pub pricing: PricingDefaults,

    /// Market data settings
    #[serde(default)]
    pub market_data: MarketDataConfig,

    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for FxPricerConfig {
    fn default() -> Self {
        Self {
            pricing: PricingDefaults::default(),
            market_data: MarketDataConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl FxPricerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path`, or the defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            _ => Self::load(path),
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = var("FXPRICER_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(source) = var("FXPRICER_SOURCE") {
            self.market_data.source = source.parse().unwrap_or(self.market_data.source);
        }
        if let Some(dir) = var("FXPRICER_SNAPSHOT_DIR") {
            self.market_data.snapshot_dir = PathBuf::from(dir);
        }
        if let Some(pair) = var("FXPRICER_PAIR") {
            self.pricing.pair = pair;
        }
        if let Some(notional) = var("FXPRICER_NOTIONAL").and_then(|n| n.parse().ok()) {
            self.pricing.notional = notional;
        }
        self
    }

    /// Validate the configuration, collecting every problem
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        let p = &self.pricing;
        check::<CurrencyPair>(&mut errors, "pricing.pair", &p.pair);
        check::<Direction>(&mut errors, "pricing.direction", &p.direction);
        check::<FxOptionType>(&mut errors, "pricing.option_type", &p.option_type);
        check::<NotionalCurrency>(&mut errors, "pricing.notional_currency", &p.notional_currency);
        check::<StrikeSpec>(&mut errors, "pricing.strike", &p.strike);
        check::<Expiry>(&mut errors, "pricing.expiry", &p.expiry);
        check::<PriceFormat>(&mut errors, "pricing.price_format", &p.price_format);
        check::<PremiumCurrency>(&mut errors, "pricing.premium_currency", &p.premium_currency);
        if !(p.notional.is_finite() && p.notional > 0.0) {
            errors.push(format!("pricing.notional must be positive, got {}", p.notional));
        }

        let m = &self.market_data;
        if m.source == DataSource::File && m.snapshot_dir.as_os_str().is_empty() {
            errors.push("market_data.snapshot_dir cannot be empty for the file source".to_string());
        }
        if m.tenors.is_empty() {
            errors.push("market_data.tenors cannot be empty".to_string());
        }
        for tenor in &m.tenors {
            check::<Tenor>(&mut errors, "market_data.tenors", tenor);
        }
        for pair in &m.pairs {
            check::<CurrencyPair>(&mut errors, "market_data.pairs", pair);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }

    /// Mock pillars, parsed.
    pub fn tenors(&self) -> Vec<Tenor> {
        self.market_data
            .tenors
            .iter()
            .filter_map(|t| t.parse().ok())
            .collect()
    }

    /// Pairs covered by `check`, parsed.
    pub fn pairs(&self) -> Vec<CurrencyPair> {
        self.market_data
            .pairs
            .iter()
            .filter_map(|p| p.parse().ok())
            .collect()
    }
}

fn check<T>(errors: &mut Vec<String>, field: &str, value: &str)
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Err(e) = value.parse::<T>() {
        errors.push(format!("{}: {}", field, e));
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The file exists but cannot be read.
    #[error("IO error reading {}: {message}", .path.display())]
    Io {
        /// Config path
        path: PathBuf,
        /// OS error text
        message: String,
    },

    /// The file is not valid TOML for this schema.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Fields that parse but make no sense.
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
