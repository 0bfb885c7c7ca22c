//! Scenario error types.

use pricer_core::market_data::MarketDataError;
use pricer_core::types::{ErrorCategory, PricingError};
use pricer_models::analytical::AnalyticalError;
use pricer_models::volatility::VolSurfaceError;
use thiserror::Error;

/// Errors raised while computing deltas, shocking or repricing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScenarioError {
    /// The shock window consumes the option's remaining life.
    #[error("Option expires within the shock window: {original_days} days to expiry, {elapsed_days} days elapsed")]
    OptionExpired {
        /// Days to expiry before the shock
        original_days: i64,
        /// Days between the two historical snapshots
        elapsed_days: i64,
    },

    /// Tenors quoted in only one of the two snapshots (strict mode).
    #[error("Incomplete snapshot, tenors missing on one side: {}", .tenors.join(", "))]
    IncompleteSnapshot {
        /// Offending tenor labels
        tenors: Vec<String>,
    },

    /// End date precedes start date.
    #[error("Invalid date range: {start} to {end}")]
    InvalidDateRange {
        /// Start date
        start: String,
        /// End date
        end: String,
    },

    /// Market data failure.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Volatility surface failure.
    #[error(transparent)]
    VolSurface(#[from] VolSurfaceError),

    /// Pricing failure.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),
}

impl ScenarioError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScenarioError::OptionExpired { .. } | ScenarioError::IncompleteSnapshot { .. } => {
                ErrorCategory::BusinessRule
            }
            ScenarioError::InvalidDateRange { .. } => ErrorCategory::InputValidation,
            ScenarioError::MarketData(e) => e.category(),
            ScenarioError::VolSurface(e) => e.category(),
            ScenarioError::Analytical(e) => e.category(),
        }
    }
}

impl From<ScenarioError> for PricingError {
    fn from(err: ScenarioError) -> Self {
        PricingError::with_category(err.category(), err.to_string())
    }
}
