//! CLI error type.

use pricer_core::types::ErrorCategory;
use pricer_pricing::PricingSessionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `fxpricer` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing fields, malformed or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pricing, provider or scenario failure.
    #[error(transparent)]
    Pricing(#[from] PricingSessionError),

    /// Command line argument that does not parse.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// `check` found pairs whose market data does not build.
    #[error("{failed} of {checked} pairs failed the market data check")]
    CheckFailed {
        /// Pairs failing
        failed: usize,
        /// Pairs checked
        checked: usize,
    },

    /// Output could not be serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Category of the underlying failure.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Pricing(e) => e.category(),
            CliError::CheckFailed { .. } => ErrorCategory::NoData,
            CliError::Config(_) | CliError::InvalidArgument(_) | CliError::Json(_) => {
                ErrorCategory::InputValidation
            }
        }
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
