//! Volatility smile and surface errors.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{ErrorCategory, InterpolationError, PricingError};
use thiserror::Error;

use crate::analytical::AnalyticalError;

/// Volatility surface errors.
///
/// # Examples
/// ```
/// use pricer_models::volatility::VolSurfaceError;
/// use pricer_core::types::ErrorCategory;
///
/// let err = VolSurfaceError::VolatilityOutOfRange { strike: 1.2, t: 0.5, vol: 2.4 };
/// assert_eq!(err.category(), ErrorCategory::NumericDomain);
/// assert!(err.to_string().contains("2.4"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VolSurfaceError {
    /// The surface holds no smile.
    #[error("Volatility surface has no smiles")]
    EmptySurface,

    /// A smile was queried before its strikes were solved.
    #[error("Strikes not calculated for tenor {tenor}")]
    StrikesNotCalculated {
        /// Tenor label
        tenor: String,
    },

    /// Interpolated volatility outside `(0.00001, 2.0]`.
    #[error("Volatility {vol} out of range at strike {strike}, t = {t}")]
    VolatilityOutOfRange {
        /// Query strike
        strike: f64,
        /// Query time in years
        t: f64,
        /// Offending volatility
        vol: f64,
    },

    /// Smile quote or market data error.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Delta-to-strike inversion failed.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),
}

impl VolSurfaceError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            VolSurfaceError::EmptySurface => ErrorCategory::NoData,
            VolSurfaceError::StrikesNotCalculated { .. }
            | VolSurfaceError::Interpolation(_) => ErrorCategory::InputValidation,
            VolSurfaceError::VolatilityOutOfRange { .. } => ErrorCategory::NumericDomain,
            VolSurfaceError::MarketData(err) => err.category(),
            VolSurfaceError::Analytical(err) => err.category(),
        }
    }
}

impl From<VolSurfaceError> for PricingError {
    fn from(err: VolSurfaceError) -> Self {
        PricingError::with_category(err.category(), err.to_string())
    }
}
