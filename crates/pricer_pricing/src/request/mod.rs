//! Pricing requests: the trade as entered, before any market lookup.

mod strike;

pub use strike::StrikeSpec;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use pricer_core::types::{days_between, days_to_years, is_tenor, CurrencyPair, Tenor, DAYS_PER_YEAR};
use pricer_core::market_data::MarketSnapshot;
use pricer_models::instruments::fx::{Direction, FxOptionType, NotionalCurrency};
use serde::{Deserialize, Serialize};

use crate::error::PricingSessionError;

/// Option expiry as entered.
///
/// Text forms: a tenor (`3M`, `1Y`), an ISO date (`2024-12-20`) or a
/// whole number of calendar days (`90`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    /// Calendar days from the valuation date.
    Days(i64),
    /// Tenor label, resolved through the snapshot's day table.
    Tenor(Tenor),
    /// Expiry date, counted from the snapshot date.
    Date(NaiveDate),
    /// Time to expiry in years.
    Years(f64),
}

/// Expiry resolved against a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedExpiry {
    /// Calendar days to expiry
    pub days: i64,
    /// ACT/365 year fraction
    pub time_to_expiry: f64,
}

impl Expiry {
    /// Days and year fraction to expiry as seen from `snapshot`.
    ///
    /// # Errors
    ///
    /// `PricingSessionError::InvalidExpiry` when the expiry is not in the
    /// future, or is a date and the snapshot carries no `as_of` date.
    pub fn resolve(&self, snapshot: &MarketSnapshot) -> Result<ResolvedExpiry, PricingSessionError> {
        let (days, time_to_expiry) = match *self {
            Expiry::Days(days) => (days, days_to_years(days)),
            Expiry::Tenor(tenor) => {
                let days = snapshot.days_to_maturity(&tenor);
                (days, days_to_years(days))
            }
            Expiry::Date(date) => {
                let as_of = snapshot.as_of.ok_or_else(|| {
                    PricingSessionError::expiry(self.to_string(), "snapshot has no as-of date")
                })?;
                let days = days_between(as_of, date);
                (days, days_to_years(days))
            }
            Expiry::Years(t) => ((t * DAYS_PER_YEAR).round() as i64, t),
        };
        if !time_to_expiry.is_finite() || time_to_expiry <= 0.0 || days <= 0 {
            return Err(PricingSessionError::expiry(
                self.to_string(),
                "expiry must be in the future",
            ));
        }
        Ok(ResolvedExpiry { days, time_to_expiry })
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expiry::Days(days) => write!(f, "{}", days),
            Expiry::Tenor(tenor) => write!(f, "{}", tenor),
            Expiry::Date(date) => write!(f, "{}", date),
            Expiry::Years(t) => write!(f, "{}Y", t),
        }
    }
}

impl FromStr for Expiry {
    type Err = PricingSessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if is_tenor(text) {
            let tenor: Tenor = text
                .parse()
                .map_err(|_| PricingSessionError::expiry(s, "invalid tenor"))?;
            return Ok(Expiry::Tenor(tenor));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Expiry::Date(date));
        }
        if let Ok(days) = text.parse::<i64>() {
            return Ok(Expiry::Days(days));
        }
        Err(PricingSessionError::expiry(
            s,
            "expected a tenor (3M), a date (YYYY-MM-DD) or a number of days",
        ))
    }
}

/// A vanilla FX option to price.
///
/// # Examples
///
/// ```
/// use pricer_pricing::{Expiry, PricingRequest, StrikeSpec};
/// use pricer_models::instruments::fx::FxOptionType;
///
/// let request = PricingRequest::new("EURUSD".parse().unwrap(), Expiry::Days(91))
///     .with_option_type(FxOptionType::Put)
///     .with_strike(StrikeSpec::parse("25D").unwrap());
/// assert_eq!(request.notional, 1_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Call or put on the base currency
    pub option_type: FxOptionType,
    /// Client side
    pub direction: Direction,
    /// Notional amount
    pub notional: f64,
    /// Currency the notional is expressed in
    pub notional_currency: NotionalCurrency,
    /// Strike choice
    pub strike: StrikeSpec,
    /// Expiry choice
    pub expiry: Expiry,
}

impl PricingRequest {
    /// Client-buys ATMF call on 1,000,000 of foreign notional.
    pub fn new(pair: CurrencyPair, expiry: Expiry) -> Self {
        Self {
            pair,
            option_type: FxOptionType::Call,
            direction: Direction::ClientBuys,
            notional: 1_000_000.0,
            notional_currency: NotionalCurrency::For,
            strike: StrikeSpec::AtmForward,
            expiry,
        }
    }

    /// Sets the option type.
    pub fn with_option_type(mut self, option_type: FxOptionType) -> Self {
        self.option_type = option_type;
        self
    }

    /// Sets the client side.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets notional amount and currency.
    pub fn with_notional(mut self, notional: f64, currency: NotionalCurrency) -> Self {
        self.notional = notional;
        self.notional_currency = currency;
        self
    }

    /// Sets the strike choice.
    pub fn with_strike(mut self, strike: StrikeSpec) -> Self {
        self.strike = strike;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn snapshot() -> MarketSnapshot {
        let mut snapshot = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0850);
        snapshot.as_of = NaiveDate::from_ymd_opt(2024, 6, 3);
        snapshot.days.insert("3M".parse().unwrap(), 92);
        snapshot
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("3M".parse::<Expiry>().unwrap(), Expiry::Tenor("3M".parse().unwrap()));
        assert_eq!(
            "2024-12-20".parse::<Expiry>().unwrap(),
            Expiry::Date(NaiveDate::from_ymd_opt(2024, 12, 20).unwrap())
        );
        assert_eq!("90".parse::<Expiry>().unwrap(), Expiry::Days(90));
        assert!(matches!(
            "soon".parse::<Expiry>(),
            Err(PricingSessionError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_tenor_uses_day_table() {
        let resolved = Expiry::Tenor("3M".parse().unwrap()).resolve(&snapshot()).unwrap();
        assert_eq!(resolved.days, 92);
        assert_relative_eq!(resolved.time_to_expiry, 92.0 / 365.0);

        let approx = Expiry::Tenor("1Y".parse().unwrap()).resolve(&snapshot()).unwrap();
        assert_eq!(approx.days, 365);
    }

    #[test]
    fn test_date_counts_from_as_of() {
        let expiry = Expiry::Date(NaiveDate::from_ymd_opt(2024, 7, 3).unwrap());
        assert_eq!(expiry.resolve(&snapshot()).unwrap().days, 30);

        let mut undated = snapshot();
        undated.as_of = None;
        assert!(expiry.resolve(&undated).is_err());
    }

    #[test]
    fn test_years_rounds_days() {
        let resolved = Expiry::Years(0.5).resolve(&snapshot()).unwrap();
        assert_eq!(resolved.days, 183);
        assert_relative_eq!(resolved.time_to_expiry, 0.5);
    }

    #[test]
    fn test_past_expiry_rejected() {
        for expiry in [
            Expiry::Days(0),
            Expiry::Days(-5),
            Expiry::Years(0.0),
            Expiry::Date(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()),
        ] {
            let err = expiry.resolve(&snapshot()).unwrap_err();
            assert!(matches!(err, PricingSessionError::InvalidExpiry { .. }), "{expiry}");
        }
    }

    #[test]
    fn test_request_builders() {
        let request = PricingRequest::new("USDJPY".parse().unwrap(), Expiry::Days(30))
            .with_direction(Direction::ClientSells)
            .with_notional(5_000_000.0, NotionalCurrency::Dom);
        assert_eq!(request.direction, Direction::ClientSells);
        assert_eq!(request.notional_currency, NotionalCurrency::Dom);
        assert_eq!(request.strike, StrikeSpec::AtmForward);
    }
}
