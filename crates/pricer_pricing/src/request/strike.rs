//! Strike specifications as traders type them.

use std::fmt;
use std::str::FromStr;

use pricer_models::instruments::fx::FxOptionType;
use serde::{Deserialize, Serialize};

use crate::error::PricingSessionError;

/// How the strike of a request is chosen.
///
/// | Text            | Meaning                                       |
/// |-----------------|-----------------------------------------------|
/// | `ATMF`          | outright forward at expiry                    |
/// | `ATMS`, `ATM`   | spot                                          |
/// | `1.0900`        | absolute strike                               |
/// | `25D`           | 25 delta, call or put following the option    |
/// | `25DC`, `10DP`  | 25 delta call strike, 10 delta put strike     |
///
/// # Examples
///
/// ```
/// use pricer_pricing::StrikeSpec;
/// use pricer_models::instruments::fx::FxOptionType;
///
/// assert_eq!(StrikeSpec::parse("atmf").unwrap(), StrikeSpec::AtmForward);
/// assert_eq!(StrikeSpec::parse("1.09").unwrap(), StrikeSpec::Absolute(1.09));
/// assert_eq!(
///     StrikeSpec::parse("10DP").unwrap(),
///     StrikeSpec::Delta { delta: 0.10, option_type: Some(FxOptionType::Put) },
/// );
/// assert!(StrikeSpec::parse("ATMX").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StrikeSpec {
    /// At-the-money forward.
    #[default]
    AtmForward,
    /// At-the-money spot.
    AtmSpot,
    /// Fixed strike.
    Absolute(f64),
    /// Strike solved from an unsigned delta in `(0, 1)`.
    Delta {
        /// Unsigned delta, 0.25 for `25D`
        delta: f64,
        /// Side fixed by a `C`/`P` suffix; `None` follows the option type
        option_type: Option<FxOptionType>,
    },
}

impl StrikeSpec {
    /// Parses strike text, case-insensitively.
    ///
    /// # Errors
    ///
    /// `PricingSessionError::InvalidStrike` naming the rejected text.
    pub fn parse(text: &str) -> Result<Self, PricingSessionError> {
        let upper = text.trim().to_ascii_uppercase();
        match upper.as_str() {
            "" => return Err(PricingSessionError::strike(text, "empty strike")),
            "ATMF" => return Ok(StrikeSpec::AtmForward),
            "ATMS" | "ATM" => return Ok(StrikeSpec::AtmSpot),
            _ => {}
        }

        if let Some(delta_spec) = Self::parse_delta(text, &upper)? {
            return Ok(delta_spec);
        }

        let strike: f64 = upper
            .parse()
            .map_err(|_| PricingSessionError::strike(text, "expected ATMF, ATMS, a number or a delta such as 25D"))?;
        if !strike.is_finite() || strike <= 0.0 {
            return Err(PricingSessionError::strike(text, "strike must be positive"));
        }
        Ok(StrikeSpec::Absolute(strike))
    }

    fn parse_delta(text: &str, upper: &str) -> Result<Option<Self>, PricingSessionError> {
        let (number, option_type) = if let Some(n) = upper.strip_suffix("DC") {
            (n, Some(FxOptionType::Call))
        } else if let Some(n) = upper.strip_suffix("DP") {
            (n, Some(FxOptionType::Put))
        } else if let Some(n) = upper.strip_suffix('D') {
            (n, None)
        } else {
            return Ok(None);
        };

        let delta: f64 = number
            .parse()
            .map_err(|_| PricingSessionError::strike(text, "delta must be a number such as 25D"))?;
        if !(delta > 0.0 && delta < 100.0) {
            return Err(PricingSessionError::strike(text, "delta must lie between 0 and 100"));
        }
        Ok(Some(StrikeSpec::Delta {
            delta: delta / 100.0,
            option_type,
        }))
    }

    /// Signed delta and option side used to solve the strike of a
    /// delta spec for an option of type `option_type`.
    ///
    /// Puts carry negative delta.
    pub fn signed_delta(&self, option_type: FxOptionType) -> Option<(f64, FxOptionType)> {
        match *self {
            StrikeSpec::Delta {
                delta,
                option_type: side,
            } => {
                let side = side.unwrap_or(option_type);
                Some((delta * side.sign(), side))
            }
            _ => None,
        }
    }
}

impl fmt::Display for StrikeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrikeSpec::AtmForward => write!(f, "ATMF"),
            StrikeSpec::AtmSpot => write!(f, "ATMS"),
            StrikeSpec::Absolute(k) => write!(f, "{}", k),
            StrikeSpec::Delta { delta, option_type } => {
                let suffix = match option_type {
                    Some(FxOptionType::Call) => "DC",
                    Some(FxOptionType::Put) => "DP",
                    None => "D",
                };
                write!(f, "{}{}", delta * 100.0, suffix)
            }
        }
    }
}

impl FromStr for StrikeSpec {
    type Err = PricingSessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StrikeSpec {
    type Error = PricingSessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StrikeSpec> for String {
    fn from(spec: StrikeSpec) -> Self {
        spec.to_string()
    }
}
