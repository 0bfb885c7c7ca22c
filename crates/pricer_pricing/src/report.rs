//! Results handed back to callers: priced trades, premium quotes, shock
//! runs and surface grids.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use pricer_core::types::{Currency, Tenor};
use pricer_models::analytical::{OptionParams, PricingResult};
use pricer_models::instruments::fx::{ConventionParseError, NotionalCurrency};
use pricer_risk::scenarios::{MarketDataDelta, Position, ScenarioOutcome, ShockPnl};
use serde::{Deserialize, Serialize};

use crate::error::PricingSessionError;
use crate::request::PricingRequest;

/// How the option price is quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFormat {
    /// Percent of the foreign notional.
    #[default]
    PercentForeign,
    /// Percent of the domestic notional (foreign notional times strike).
    PercentDomestic,
    /// Pips of the pair per unit of foreign notional.
    Pips,
}

impl PriceFormat {
    /// Price of an option worth `unit_premium` domestic per unit of foreign.
    pub fn quote(&self, unit_premium: f64, spot: f64, strike: f64, pip_scale: f64) -> f64 {
        match self {
            PriceFormat::PercentForeign => unit_premium / spot * 100.0,
            PriceFormat::PercentDomestic => unit_premium / strike * 100.0,
            PriceFormat::Pips => unit_premium * pip_scale,
        }
    }
}

impl fmt::Display for PriceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceFormat::PercentForeign => write!(f, "% FOR"),
            PriceFormat::PercentDomestic => write!(f, "% DOM"),
            PriceFormat::Pips => write!(f, "pips"),
        }
    }
}

impl FromStr for PriceFormat {
    type Err = PricingSessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "percent" | "percent_foreign" | "%_for" | "pct_for" => Ok(PriceFormat::PercentForeign),
            "percent_domestic" | "%_dom" | "pct_dom" => Ok(PriceFormat::PercentDomestic),
            "pips" => Ok(PriceFormat::Pips),
            _ => Err(unrecognised("price format", s)),
        }
    }
}

fn unrecognised(kind: &'static str, text: &str) -> PricingSessionError {
    PricingSessionError::Convention(ConventionParseError {
        kind,
        text: text.to_string(),
    })
}

/// Currency the premium amount is paid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PremiumCurrency {
    /// Quote currency of the pair.
    #[default]
    Domestic,
    /// Base currency of the pair.
    Foreign,
}

impl FromStr for PremiumCurrency {
    type Err = PricingSessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domestic" | "dom" => Ok(PremiumCurrency::Domestic),
            "foreign" | "for" => Ok(PremiumCurrency::Foreign),
            _ => Err(unrecognised("premium currency", s)),
        }
    }
}

/// Premium in a chosen price format and settlement currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PremiumQuote {
    /// Format of `price`
    pub format: PriceFormat,
    /// Price in `format`
    pub price: f64,
    /// Currency of `amount`
    pub currency: Currency,
    /// Premium amount for the whole notional
    pub amount: f64,
}

/// A priced request with every market input used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceReport {
    /// Request as submitted
    pub request: PricingRequest,
    /// Snapshot date
    pub as_of: Option<NaiveDate>,
    /// Calendar days to expiry
    pub expiry_days: i64,
    /// ACT/365 time to expiry
    pub time_to_expiry: f64,
    /// Spot
    pub spot: f64,
    /// Forward points at expiry, in pips
    pub forward_points: f64,
    /// Outright forward at expiry
    pub forward: f64,
    /// Domestic (quote currency) deposit rate
    pub domestic_rate: f64,
    /// Foreign (base currency) deposit rate
    pub foreign_rate: f64,
    /// Resolved strike
    pub strike: f64,
    /// Volatility at strike and expiry
    pub volatility: f64,
    /// Parameters handed to the pricer
    pub params: OptionParams,
    /// Pricer output
    pub result: PricingResult,
    /// Delta hedge in foreign currency, signed by direction
    pub hedge: f64,
}

impl PriceReport {
    /// Domestic premium per unit of foreign notional.
    pub fn unit_premium(&self) -> f64 {
        self.result.premium_pips / self.request.pair.pip_scale()
    }

    /// Notional expressed in foreign currency, domestic notionals converted at spot.
    pub fn foreign_notional(&self) -> f64 {
        match self.request.notional_currency {
            NotionalCurrency::For => self.request.notional,
            NotionalCurrency::Dom => self.request.notional / self.spot,
        }
    }

    /// Premium quoted in `format` and paid in `currency`.
    pub fn premium_quote(&self, format: PriceFormat, currency: PremiumCurrency) -> PremiumQuote {
        let unit = self.unit_premium();
        let pair = self.request.pair;
        let domestic_amount = unit * self.foreign_notional();
        let (currency, amount) = match currency {
            PremiumCurrency::Domestic => (pair.quote(), domestic_amount),
            PremiumCurrency::Foreign => (pair.base(), domestic_amount / self.spot),
        };
        PremiumQuote {
            format,
            price: format.quote(unit, self.spot, self.strike, pair.pip_scale()),
            currency,
            amount,
        }
    }

    /// Gamma scaled to the notional.
    pub fn notional_gamma(&self) -> f64 {
        self.result.greeks.gamma * self.request.notional
    }

    /// Vega scaled to the notional.
    pub fn notional_vega(&self) -> f64 {
        self.result.greeks.vega * self.request.notional
    }

    /// The priced trade as a scenario position.
    pub fn position(&self) -> Position {
        Position {
            params: self.params,
            direction: self.request.direction,
            expiry_days: self.expiry_days,
            pip_scale: self.request.pair.pip_scale(),
        }
    }
}

/// A historical shock applied to a priced trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShockReport {
    /// Start of the historical window
    pub start_date: NaiveDate,
    /// End of the historical window
    pub end_date: NaiveDate,
    /// The trade priced in the current market
    pub original: PriceReport,
    /// Market moves over the window
    pub delta: MarketDataDelta,
    /// Shocked and decay-only repricings
    pub outcome: ScenarioOutcome,
}

impl ShockReport {
    /// P&L split.
    pub fn pnl(&self) -> &ShockPnl {
        &self.outcome.pnl
    }
}

/// One pillar of a solved surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRow {
    /// Pillar tenor
    pub tenor: Tenor,
    /// Calendar days to expiry
    pub days: i64,
    /// Year fraction
    pub time_to_expiry: f64,
    /// Outright forward
    pub forward: f64,
    /// Domestic deposit rate
    pub domestic_rate: f64,
    /// Foreign deposit rate
    pub foreign_rate: f64,
    /// Vols at 10P, 25P, ATM, 25C, 10C
    pub vols: [f64; 5],
    /// Strikes at 10P, 25P, ATM, 25C, 10C
    pub strikes: [f64; 5],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_formats() {
        let unit = 0.0180;
        assert_relative_eq!(PriceFormat::PercentForeign.quote(unit, 1.0850, 1.09, 10_000.0), unit / 1.0850 * 100.0);
        assert_relative_eq!(PriceFormat::PercentDomestic.quote(unit, 1.0850, 1.09, 10_000.0), unit / 1.09 * 100.0);
        assert_relative_eq!(PriceFormat::Pips.quote(unit, 1.0850, 1.09, 10_000.0), 180.0, max_relative = 1e-12);
        assert_relative_eq!(PriceFormat::Pips.quote(1.25, 149.5, 150.0, 100.0), 125.0);
    }

    #[test]
    fn test_parse_conventions() {
        assert_eq!("pips".parse::<PriceFormat>().unwrap(), PriceFormat::Pips);
        assert_eq!("percent-domestic".parse::<PriceFormat>().unwrap(), PriceFormat::PercentDomestic);
        assert_eq!("Percent".parse::<PriceFormat>().unwrap(), PriceFormat::PercentForeign);
        assert!("bps".parse::<PriceFormat>().is_err());
        assert_eq!("FOR".parse::<PremiumCurrency>().unwrap(), PremiumCurrency::Foreign);
        assert!("yen".parse::<PremiumCurrency>().is_err());
    }
}
