//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the Garman-Kohlhagen kernels

use pricer_core::types::{ErrorCategory, PricingError};
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`, `InvalidStrike`, `InvalidNotional`: non-positive inputs
/// - `InvalidVolatility`: negative or non-finite volatility
/// - `ProbabilityOutOfDomain`: inverse normal CDF evaluated outside (0, 1)
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
/// use pricer_core::types::ErrorCategory;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// assert_eq!(err.category(), ErrorCategory::InputValidation);
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (negative or non-finite).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot rate (non-positive).
    #[error("Invalid spot rate: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid notional (non-positive).
    #[error("Invalid notional: {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Inverse normal CDF evaluated outside the open unit interval.
    #[error("Probability {probability} outside (0, 1) for inverse normal CDF")]
    ProbabilityOutOfDomain {
        /// The probability passed to the inverse CDF
        probability: f64,
    },
}

impl AnalyticalError {
    /// Taxonomy bucket of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AnalyticalError::ProbabilityOutOfDomain { .. } => ErrorCategory::NumericDomain,
            _ => ErrorCategory::InputValidation,
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::with_category(err.category(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_invalid_strike_display() {
        let err = AnalyticalError::InvalidStrike { strike: -1.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = -1");
    }

    #[test]
    fn test_probability_out_of_domain_display() {
        let err = AnalyticalError::ProbabilityOutOfDomain { probability: 1.2 };
        assert_eq!(
            format!("{}", err),
            "Probability 1.2 outside (0, 1) for inverse normal CDF"
        );
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = AnalyticalError::InvalidSpot { spot: 0.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_invalid_inputs_map_to_input_validation() {
        for err in [
            AnalyticalError::InvalidSpot { spot: 0.0 },
            AnalyticalError::InvalidStrike { strike: 0.0 },
            AnalyticalError::InvalidVolatility { volatility: -0.1 },
            AnalyticalError::InvalidNotional { notional: 0.0 },
        ] {
            let pricing_err: PricingError = err.into();
            assert!(matches!(pricing_err, PricingError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_probability_out_of_domain_to_numeric_domain() {
        let err = AnalyticalError::ProbabilityOutOfDomain { probability: 0.0 };
        let pricing_err: PricingError = err.into();
        match pricing_err {
            PricingError::NumericDomain(msg) => assert!(msg.contains("(0, 1)")),
            other => panic!("Expected NumericDomain variant, got {:?}", other),
        }
    }
}
