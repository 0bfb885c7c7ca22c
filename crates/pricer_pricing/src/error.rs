//! Error types for pricing sessions and snapshot providers.

use std::path::PathBuf;

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{CurrencyError, ErrorCategory, PricingError};
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::fx::ConventionParseError;
use pricer_models::volatility::VolSurfaceError;
use pricer_risk::scenarios::ScenarioError;
use thiserror::Error;

/// Failures fetching or loading a market snapshot.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no snapshot for the pair (and date).
    #[error("No snapshot for {pair}{}", .date.map(|d| format!(" on {}", d)).unwrap_or_default())]
    NotFound {
        /// Pair code
        pair: String,
        /// Historical date, if one was requested
        date: Option<chrono::NaiveDate>,
    },

    /// Snapshot file could not be read.
    #[error("Failed to read snapshot {}: {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not a valid snapshot document.
    #[error("Failed to parse snapshot {}: {source}", .path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot was loaded but its quotes are unusable.
    #[error(transparent)]
    Invalid(#[from] MarketDataError),
}

impl ProviderError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProviderError::NotFound { .. } | ProviderError::Io { .. } => ErrorCategory::NoData,
            ProviderError::Parse { .. } => ErrorCategory::InputValidation,
            ProviderError::Invalid(e) => e.category(),
        }
    }
}

/// Errors raised while resolving and pricing a request.
#[derive(Debug, Error)]
pub enum PricingSessionError {
    /// Strike text is not ATMF, ATMS, ATM, a number or a delta spec.
    #[error("Invalid strike '{text}': {reason}")]
    InvalidStrike {
        /// Text as entered
        text: String,
        /// What is wrong with it
        reason: String,
    },

    /// Expiry is malformed or not in the future.
    #[error("Invalid expiry '{text}': {reason}")]
    InvalidExpiry {
        /// Expiry as entered
        text: String,
        /// What is wrong with it
        reason: String,
    },

    /// A trade convention (option type, direction, notional currency) did not parse.
    #[error(transparent)]
    Convention(#[from] ConventionParseError),

    /// Currency pair did not parse.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Snapshot could not be obtained.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Market data failure.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Volatility surface failure.
    #[error(transparent)]
    VolSurface(#[from] VolSurfaceError),

    /// Pricing failure.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// Scenario failure.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

impl PricingSessionError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingSessionError::InvalidStrike { .. }
            | PricingSessionError::InvalidExpiry { .. }
            | PricingSessionError::Convention(_)
            | PricingSessionError::Currency(_) => ErrorCategory::InputValidation,
            PricingSessionError::Provider(e) => e.category(),
            PricingSessionError::MarketData(e) => e.category(),
            PricingSessionError::VolSurface(e) => e.category(),
            PricingSessionError::Analytical(e) => e.category(),
            PricingSessionError::Scenario(e) => e.category(),
        }
    }

    pub(crate) fn strike(text: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingSessionError::InvalidStrike {
            text: text.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn expiry(text: impl Into<String>, reason: impl Into<String>) -> Self {
        PricingSessionError::InvalidExpiry {
            text: text.into(),
            reason: reason.into(),
        }
    }
}

impl From<PricingSessionError> for PricingError {
    fn from(err: PricingSessionError) -> Self {
        PricingError::with_category(err.category(), err.to_string())
    }
}
