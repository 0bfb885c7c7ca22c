//! FX vanilla option conventions.
//!
//! Option type, trade direction and notional currency of a European FX
//! option. Text forms match the labels shown to users (`Call`,
//! `Client buys`, `FOR`).

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use thiserror::Error;

/// A label that does not name any variant.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unrecognised {kind}: '{text}'")]
pub struct ConventionParseError {
    /// What was being parsed
    pub kind: &'static str,
    /// The rejected text
    pub text: String,
}

impl ConventionParseError {
    fn new(kind: &'static str, text: &str) -> Self {
        Self {
            kind,
            text: text.to_string(),
        }
    }
}

/// FX option type (Call or Put).
///
/// - Call: Right to buy base currency, sell quote currency
/// - Put: Right to sell base currency, buy quote currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FxOptionType {
    /// Right to buy base currency at strike price in quote currency.
    Call,
    /// Right to sell base currency at strike price in quote currency.
    Put,
}

impl FxOptionType {
    /// Returns whether this is a call option.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, FxOptionType::Call)
    }

    /// Returns whether this is a put option.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, FxOptionType::Put)
    }

    /// +1 for calls, −1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            FxOptionType::Call => 1.0,
            FxOptionType::Put => -1.0,
        }
    }

    /// Payoff at expiry per unit of foreign notional.
    ///
    /// ```
    /// use pricer_models::instruments::fx::FxOptionType;
    ///
    /// assert!((FxOptionType::Call.intrinsic(1.10_f64, 1.05) - 0.05).abs() < 1e-12);
    /// assert_eq!(FxOptionType::Put.intrinsic(1.10_f64, 1.05), 0.0);
    /// ```
    #[inline]
    pub fn intrinsic<T: Float>(&self, spot: T, strike: T) -> T {
        match self {
            FxOptionType::Call => (spot - strike).max(T::zero()),
            FxOptionType::Put => (strike - spot).max(T::zero()),
        }
    }
}

impl fmt::Display for FxOptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FxOptionType::Call => write!(f, "Call"),
            FxOptionType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for FxOptionType {
    type Err = ConventionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(FxOptionType::Call),
            "put" | "p" => Ok(FxOptionType::Put),
            _ => Err(ConventionParseError::new("option type", s)),
        }
    }
}

/// Trade direction from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Client buys the option from the dealer.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Client buys", alias = "client_buys"))]
    ClientBuys,
    /// Client sells the option to the dealer.
    #[cfg_attr(feature = "serde", serde(rename = "Client sells", alias = "client_sells"))]
    ClientSells,
}

impl Direction {
    /// Display label, `Client buys` or `Client sells`.
    pub fn label(&self) -> &'static str {
        match self {
            Direction::ClientBuys => "Client buys",
            Direction::ClientSells => "Client sells",
        }
    }

    /// Sign applied to the delta hedge: +1 when the client buys.
    #[inline]
    pub fn hedge_sign(&self) -> f64 {
        match self {
            Direction::ClientBuys => 1.0,
            Direction::ClientSells => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Direction {
    type Err = ConventionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        match normalised.as_str() {
            "client buys" | "buy" | "buys" => Ok(Direction::ClientBuys),
            "client sells" | "sell" | "sells" => Ok(Direction::ClientSells),
            _ => Err(ConventionParseError::new("direction", s)),
        }
    }
}

/// Currency the notional amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "UPPERCASE")
)]
pub enum NotionalCurrency {
    /// Foreign (base) currency, e.g. EUR in EURUSD.
    #[default]
    For,
    /// Domestic (quote) currency, e.g. USD in EURUSD.
    Dom,
}

impl NotionalCurrency {
    /// Short code, `FOR` or `DOM`.
    pub fn code(&self) -> &'static str {
        match self {
            NotionalCurrency::For => "FOR",
            NotionalCurrency::Dom => "DOM",
        }
    }
}

impl fmt::Display for NotionalCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for NotionalCurrency {
    type Err = ConventionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FOR" | "FOREIGN" => Ok(NotionalCurrency::For),
            "DOM" | "DOMESTIC" => Ok(NotionalCurrency::Dom),
            _ => Err(ConventionParseError::new("notional currency", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type_parse_and_display() {
        assert_eq!("Call".parse::<FxOptionType>().unwrap(), FxOptionType::Call);
        assert_eq!(" put ".parse::<FxOptionType>().unwrap(), FxOptionType::Put);
        assert_eq!(FxOptionType::Put.to_string(), "Put");
        let err = "straddle".parse::<FxOptionType>().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognised option type: 'straddle'");
    }

    #[test]
    fn test_option_type_sign_and_intrinsic() {
        assert_eq!(FxOptionType::Call.sign(), 1.0);
        assert_eq!(FxOptionType::Put.sign(), -1.0);
        assert_eq!(FxOptionType::Call.intrinsic(1.0_f64, 1.2), 0.0);
        assert!((FxOptionType::Put.intrinsic(1.0_f64, 1.2) - 0.2).abs() < 1e-15);
    }

    #[test]
    fn test_direction_labels_round_trip() {
        for direction in [Direction::ClientBuys, Direction::ClientSells] {
            assert_eq!(direction.label().parse::<Direction>().unwrap(), direction);
        }
        assert_eq!("client_sells".parse::<Direction>().unwrap(), Direction::ClientSells);
        assert_eq!(Direction::default(), Direction::ClientBuys);
        assert_eq!(Direction::ClientSells.hedge_sign(), -1.0);
        assert!("hold".parse::<Direction>().is_err());
    }

    #[test]
    fn test_notional_currency_parse() {
        assert_eq!("for".parse::<NotionalCurrency>().unwrap(), NotionalCurrency::For);
        assert_eq!("DOM".parse::<NotionalCurrency>().unwrap(), NotionalCurrency::Dom);
        assert_eq!(NotionalCurrency::Dom.to_string(), "DOM");
        assert!("EUR".parse::<NotionalCurrency>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_direction_serde_uses_labels() {
        let json = serde_json::to_string(&Direction::ClientSells).unwrap();
        assert_eq!(json, "\"Client sells\"");
        let back: NotionalCurrency = serde_json::from_str("\"DOM\"").unwrap();
        assert_eq!(back, NotionalCurrency::Dom);
    }
}
