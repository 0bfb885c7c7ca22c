//! Market data error types.
//!
//! Raised by curve construction and queries, the implied deposit
//! calculation and snapshot validation. Every variant carries the tenor,
//! field or value needed to report the failure.

use crate::types::{ErrorCategory, InterpolationError, PricingError, TenorParseError};
use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::ErrorCategory;
///
/// let err = MarketDataError::InvalidSmileQuote {
///     tenor: "3M".to_string(),
///     field: "vol_10p".to_string(),
///     value: -0.002,
/// };
/// assert!(err.to_string().contains("3M"));
/// assert_eq!(err.category(), ErrorCategory::BusinessRule);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// A curve was queried before any point was added.
    #[error("Curve '{curve}' has no points")]
    EmptyCurve {
        /// Curve label, e.g. `USD` or `EURUSD`
        curve: String,
    },

    /// Negative maturity, or a non-increasing maturity pair.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// A tenor label could not be parsed.
    #[error(transparent)]
    InvalidTenor(#[from] TenorParseError),

    /// A tenor required for the calculation is absent from the data.
    #[error("Missing {field} for tenor {tenor}")]
    MissingTenor {
        /// Tenor label
        tenor: String,
        /// Which quote was missing
        field: String,
    },

    /// A smile quote produced a non-positive (or non-finite) pillar vol.
    #[error("Invalid smile quote for tenor {tenor}: {field} = {value}")]
    InvalidSmileQuote {
        /// Tenor label
        tenor: String,
        /// Offending quote or derived pillar, e.g. `atm` or `vol_25p`
        field: String,
        /// The value that failed validation
        value: f64,
    },

    /// Spot or outright forward is not positive where a logarithm is taken.
    #[error("Non-positive {name}: {value}")]
    NonPositiveRate {
        /// `spot` or `forward`
        name: String,
        /// The value that failed validation
        value: f64,
    },

    /// The pair cannot be handled by the USD-based rate derivation.
    #[error("Unsupported currency pair {pair}: {reason}")]
    UnsupportedPair {
        /// Pair code
        pair: String,
        /// Why it is unsupported
        reason: String,
    },

    /// Snapshot-level validation failure (spot, quote values).
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl MarketDataError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            MarketDataError::EmptyCurve { .. }
            | MarketDataError::InvalidMaturity { .. }
            | MarketDataError::InvalidTenor(_)
            | MarketDataError::InvalidSnapshot(_)
            | MarketDataError::Interpolation(_) => ErrorCategory::InputValidation,
            MarketDataError::MissingTenor { .. } => ErrorCategory::NoData,
            MarketDataError::InvalidSmileQuote { .. } | MarketDataError::UnsupportedPair { .. } => {
                ErrorCategory::BusinessRule
            }
            MarketDataError::NonPositiveRate { .. } => ErrorCategory::NumericDomain,
        }
    }
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        PricingError::with_category(err.category(), err.to_string())
    }
}
