//! Currency pair conventions for FX option pricing.
//!
//! A pair is quoted as units of the quote (domestic) currency per one unit
//! of the base (foreign) currency. EURUSD = 1.0850 means 1 EUR costs
//! 1.0850 USD, so EUR is foreign and USD is domestic.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair, UsdPosition};
//!
//! let pair: CurrencyPair = "USD/JPY".parse().unwrap();
//! assert_eq!(pair.base(), Currency::USD);
//! assert_eq!(pair.quote(), Currency::JPY);
//! assert_eq!(pair.usd_position(), UsdPosition::Base);
//! assert_eq!(pair.pip_scale(), 100.0);
//!
//! let inverted = pair.invert();
//! assert_eq!(inverted.code(), "JPYUSD");
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// Where USD sits in a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsdPosition {
    /// USD is the base (foreign) currency, e.g. USDJPY.
    Base,
    /// USD is the quote (domestic) currency, e.g. EURUSD.
    Quote,
    /// Cross pair without USD, e.g. EURGBP.
    None,
}

/// An ordered FX currency pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Multiplier turning a price difference into pips for most pairs.
    pub const STANDARD_PIP_SCALE: f64 = 10_000.0;

    /// Multiplier for pairs quoted in yen.
    pub const JPY_PIP_SCALE: f64 = 100.0;

    /// Pairs settling T+1 rather than T+2.
    const T_PLUS_ONE: [(Currency, Currency); 2] =
        [(Currency::USD, Currency::CAD), (Currency::CAD, Currency::USD)];

    /// Creates a pair, rejecting identical legs.
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Base (foreign) currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Quote (domestic) currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Six-letter code, e.g. `EURUSD`.
    pub fn code(&self) -> String {
        format!("{}{}", self.base.code(), self.quote.code())
    }

    /// Slash-separated code, e.g. `EUR/USD`.
    pub fn display_code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }

    /// Swaps base and quote.
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Returns true if either leg is `currency`.
    #[inline]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }

    /// Position of USD within the pair.
    pub fn usd_position(&self) -> UsdPosition {
        if self.base == Currency::USD {
            UsdPosition::Base
        } else if self.quote == Currency::USD {
            UsdPosition::Quote
        } else {
            UsdPosition::None
        }
    }

    /// Pip multiplier: 100 for yen-quoted pairs, 10000 otherwise.
    ///
    /// Forward points are quoted in the same unit, so this doubles as the
    /// forward-point scale.
    pub fn pip_scale(&self) -> f64 {
        if self.quote == Currency::JPY {
            Self::JPY_PIP_SCALE
        } else {
            Self::STANDARD_PIP_SCALE
        }
    }

    /// Business days between trade date and spot date.
    pub fn spot_lag_days(&self) -> u32 {
        if Self::T_PLUS_ONE.contains(&(self.base, self.quote)) {
            1
        } else {
            2
        }
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Accepts `EURUSD`, `EUR/USD` and `eur usd`.
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let cleaned: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect::<String>()
            .to_uppercase();
        if cleaned.len() != 6 || !cleaned.is_ascii() {
            return Err(CurrencyError::ParseError(format!(
                "Invalid currency pair: {}. Expected 6 characters.",
                s
            )));
        }
        let base: Currency = cleaned[..3].parse()?;
        let quote: Currency = cleaned[3..].parse()?;
        Self::new(base, quote)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.code()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        let expected = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        assert_eq!("EURUSD".parse::<CurrencyPair>().unwrap(), expected);
        assert_eq!("eur/usd".parse::<CurrencyPair>().unwrap(), expected);
        assert_eq!("EUR USD".parse::<CurrencyPair>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_bad_length() {
        assert!(matches!(
            "EURUS".parse::<CurrencyPair>(),
            Err(CurrencyError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_rejects_same_currency() {
        assert!(matches!(
            "USDUSD".parse::<CurrencyPair>(),
            Err(CurrencyError::SameCurrency(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_leg() {
        assert!(matches!(
            "EURXYZ".parse::<CurrencyPair>(),
            Err(CurrencyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_usd_position() {
        let eurusd: CurrencyPair = "EURUSD".parse().unwrap();
        let usdjpy: CurrencyPair = "USDJPY".parse().unwrap();
        let eurgbp: CurrencyPair = "EURGBP".parse().unwrap();
        assert_eq!(eurusd.usd_position(), UsdPosition::Quote);
        assert_eq!(usdjpy.usd_position(), UsdPosition::Base);
        assert_eq!(eurgbp.usd_position(), UsdPosition::None);
    }

    #[test]
    fn test_pip_scale() {
        for code in ["USDJPY", "EURJPY", "GBPJPY", "AUDJPY", "CADJPY", "CHFJPY"] {
            let pair: CurrencyPair = code.parse().unwrap();
            assert_eq!(pair.pip_scale(), 100.0, "{}", code);
        }
        for code in ["EURUSD", "GBPUSD", "USDCHF", "AUDUSD"] {
            let pair: CurrencyPair = code.parse().unwrap();
            assert_eq!(pair.pip_scale(), 10_000.0, "{}", code);
        }
    }

    #[test]
    fn test_spot_lag() {
        let usdcad: CurrencyPair = "USDCAD".parse().unwrap();
        let eurusd: CurrencyPair = "EURUSD".parse().unwrap();
        assert_eq!(usdcad.spot_lag_days(), 1);
        assert_eq!(usdcad.invert().spot_lag_days(), 1);
        assert_eq!(eurusd.spot_lag_days(), 2);
    }

    #[test]
    fn test_display_codes() {
        let pair: CurrencyPair = "GBPUSD".parse().unwrap();
        assert_eq!(pair.to_string(), "GBPUSD");
        assert_eq!(pair.display_code(), "GBP/USD");
        assert!(pair.contains(Currency::GBP));
        assert!(!pair.contains(Currency::JPY));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let pair: CurrencyPair = "USDJPY".parse().unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"USDJPY\"");
        let back: CurrencyPair = serde_json::from_str("\"usd/jpy\"").unwrap();
        assert_eq!(back, pair);
    }
}
