//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;
pub mod shock;
pub mod surface;

use std::str::FromStr;

use clap::Args;
use pricer_core::types::CurrencyPair;
use pricer_pricing::{
    JsonFileProvider, MockSnapshotProvider, PremiumCurrency, PriceFormat, PricingRequest,
    PricingSession,
};
use tracing::debug;

use crate::config::{DataSource, FxPricerConfig};
use crate::{CliError, Result};

/// Trade fields shared by `price` and `shock`; unset fields fall back to `[pricing]`.
#[derive(Debug, Clone, Default, Args)]
pub struct TradeArgs {
    /// Currency pair, e.g. EURUSD
    #[arg(short, long)]
    pub pair: Option<String>,

    /// Tenor (3M), expiry date (YYYY-MM-DD) or days
    #[arg(short, long)]
    pub expiry: Option<String>,

    /// ATMF, ATMS, a strike level or a delta (25D, 10DP)
    #[arg(short, long)]
    pub strike: Option<String>,

    /// Call or Put
    #[arg(long = "type")]
    pub option_type: Option<String>,

    /// "Client buys" or "Client sells"
    #[arg(short, long)]
    pub direction: Option<String>,

    /// Notional amount
    #[arg(short, long)]
    pub notional: Option<f64>,

    /// Notional currency: foreign or domestic
    #[arg(long)]
    pub notional_currency: Option<String>,
}

/// Output preferences shared by `price` and `shock`.
#[derive(Debug, Clone, Default, Args)]
pub struct QuoteArgs {
    /// Price format: percent, percent_domestic or pips
    #[arg(long)]
    pub price_format: Option<String>,

    /// Premium currency: domestic or foreign
    #[arg(long)]
    pub premium_currency: Option<String>,
}

fn parse<T>(field: &str, text: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse()
        .map_err(|e| CliError::InvalidArgument(format!("{}: {}", field, e)))
}

impl TradeArgs {
    /// Request built from these arguments over the configured defaults.
    pub fn request(&self, config: &FxPricerConfig) -> Result<PricingRequest> {
        let d = &config.pricing;
        let pair = parse("pair", self.pair.as_deref().unwrap_or(&d.pair))?;
        let expiry = parse("expiry", self.expiry.as_deref().unwrap_or(&d.expiry))?;
        let request = PricingRequest::new(pair, expiry)
            .with_strike(parse("strike", self.strike.as_deref().unwrap_or(&d.strike))?)
            .with_option_type(parse(
                "type",
                self.option_type.as_deref().unwrap_or(&d.option_type),
            )?)
            .with_direction(parse(
                "direction",
                self.direction.as_deref().unwrap_or(&d.direction),
            )?)
            .with_notional(
                self.notional.unwrap_or(d.notional),
                parse(
                    "notional currency",
                    self.notional_currency
                        .as_deref()
                        .unwrap_or(&d.notional_currency),
                )?,
            );
        debug!(?request, "request");
        Ok(request)
    }
}

impl QuoteArgs {
    /// Price format and premium currency over the configured defaults.
    pub fn resolve(&self, config: &FxPricerConfig) -> Result<(PriceFormat, PremiumCurrency)> {
        let d = &config.pricing;
        Ok((
            parse("price format", self.price_format.as_deref().unwrap_or(&d.price_format))?,
            parse(
                "premium currency",
                self.premium_currency
                    .as_deref()
                    .unwrap_or(&d.premium_currency),
            )?,
        ))
    }
}

/// Pair argument, else the configured default pair.
pub fn pair_or_default(pair: Option<&str>, config: &FxPricerConfig) -> Result<CurrencyPair> {
    parse("pair", pair.unwrap_or(&config.pricing.pair))
}

/// Session over the configured market data source.
pub fn session(config: &FxPricerConfig) -> PricingSession {
    match config.market_data.source {
        DataSource::Mock => {
            PricingSession::new(MockSnapshotProvider::new().with_tenors(&config.tenors()))
        }
        DataSource::File => {
            PricingSession::new(JsonFileProvider::new(&config.market_data.snapshot_dir))
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_models::instruments::fx::{Direction, FxOptionType, NotionalCurrency};
    use pricer_pricing::{Expiry, StrikeSpec};

    #[test]
    fn test_defaults_fill_request() {
        let config = FxPricerConfig::default();
        let request = TradeArgs::default().request(&config).unwrap();
        assert_eq!(request.pair.code(), "EURUSD");
        assert_eq!(request.expiry, Expiry::Tenor("3M".parse().unwrap()));
        assert_eq!(request.strike, StrikeSpec::AtmForward);
        assert_eq!(request.option_type, FxOptionType::Call);
        assert_eq!(request.direction, Direction::ClientBuys);
        assert_eq!(request.notional, 1_000_000.0);
        assert_eq!(request.notional_currency, NotionalCurrency::For);
    }

    #[test]
    fn test_arguments_override_defaults() {
        let args = TradeArgs {
            pair: Some("usdjpy".to_string()),
            expiry: Some("45".to_string()),
            strike: Some("10dp".to_string()),
            option_type: Some("put".to_string()),
            direction: Some("sell".to_string()),
            notional: Some(5e6),
            notional_currency: Some("dom".to_string()),
        };
        let request = args.request(&FxPricerConfig::default()).unwrap();
        assert_eq!(request.pair.code(), "USDJPY");
        assert_eq!(request.expiry, Expiry::Days(45));
        assert_eq!(request.option_type, FxOptionType::Put);
        assert_eq!(request.direction, Direction::ClientSells);
        assert_eq!(request.notional_currency, NotionalCurrency::Dom);
        assert!(matches!(request.strike, StrikeSpec::Delta { .. }));
    }

    #[test]
    fn test_bad_argument_names_field() {
        let args = TradeArgs {
            strike: Some("wide".to_string()),
            ..TradeArgs::default()
        };
        let err = args.request(&FxPricerConfig::default()).unwrap_err();
        assert!(err.to_string().contains("strike"), "{err}");
    }

    #[test]
    fn test_quote_defaults() {
        let (format, currency) = QuoteArgs::default()
            .resolve(&FxPricerConfig::default())
            .unwrap();
        assert_eq!(format, PriceFormat::PercentForeign);
        assert_eq!(currency, PremiumCurrency::Domestic);
    }
}
