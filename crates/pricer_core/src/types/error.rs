//! Error types for structured error handling.
//!
//! This module provides:
//! - `ErrorCategory`: The three-way taxonomy every pricing failure maps onto
//! - `PricingError`: Category-tagged errors handed to presentation layers
//! - `CurrencyError`: Errors from currency and currency pair parsing
//! - `InterpolationError`: Errors from interpolation operations

use std::fmt;
use thiserror::Error;

/// Broad classification of a failure.
///
/// Presentation layers use this to distinguish "no data available" from
/// "computation out of valid range" from "invalid input".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCategory {
    /// Malformed or missing input; raised before any numeric work.
    InputValidation,
    /// A computation left its valid numeric domain.
    NumericDomain,
    /// A market or trade rule was violated (e.g. option already expired).
    BusinessRule,
    /// Required market data is not available.
    NoData,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::InputValidation => write!(f, "input validation"),
            ErrorCategory::NumericDomain => write!(f, "numeric domain"),
            ErrorCategory::BusinessRule => write!(f, "business rule"),
            ErrorCategory::NoData => write!(f, "no data"),
        }
    }
}

/// Categorised pricing errors.
///
/// Lower layers raise their own typed errors; this is the flattened form
/// exposed at the orchestration boundary.
///
/// # Examples
/// ```
/// use pricer_core::types::{ErrorCategory, PricingError};
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// assert_eq!(err.category(), ErrorCategory::InputValidation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Computation produced a value outside its valid range
    NumericDomain(String),

    /// Trade or market rule violated
    BusinessRule(String),

    /// Required market data missing
    NoData(String),
}

impl PricingError {
    /// Returns the taxonomy bucket for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            PricingError::InvalidInput(_) => ErrorCategory::InputValidation,
            PricingError::NumericDomain(_) => ErrorCategory::NumericDomain,
            PricingError::BusinessRule(_) => ErrorCategory::BusinessRule,
            PricingError::NoData(_) => ErrorCategory::NoData,
        }
    }

    /// Builds an error of the given category.
    pub fn with_category(category: ErrorCategory, message: impl Into<String>) -> Self {
        let message = message.into();
        match category {
            ErrorCategory::InputValidation => PricingError::InvalidInput(message),
            ErrorCategory::NumericDomain => PricingError::NumericDomain(message),
            ErrorCategory::BusinessRule => PricingError::BusinessRule(message),
            ErrorCategory::NoData => PricingError::NoData(message),
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NumericDomain(msg) => write!(f, "Numeric domain error: {}", msg),
            PricingError::BusinessRule(msg) => write!(f, "Business rule violated: {}", msg),
            PricingError::NoData(msg) => write!(f, "No data available: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Currency parsing errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyError {
    /// Currency code not recognised
    UnknownCurrency(String),

    /// Currency pair text could not be parsed
    ParseError(String),

    /// Base and quote currencies are identical
    SameCurrency(String),
}

impl fmt::Display for CurrencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyError::UnknownCurrency(code) => write!(f, "Unknown currency: {}", code),
            CurrencyError::ParseError(msg) => write!(f, "Currency parse error: {}", msg),
            CurrencyError::SameCurrency(code) => {
                write!(f, "Base and quote currencies are the same: {}", code)
            }
        }
    }
}

impl std::error::Error for CurrencyError {}

impl From<CurrencyError> for PricingError {
    fn from(err: CurrencyError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

/// Interpolation errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::LengthMismatch { xs: 3, ys: 2 };
/// assert_eq!(format!("{}", err), "x and y points must have the same length: got 3 and 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// No data points supplied
    #[error("Cannot interpolate with empty points")]
    EmptyInput,

    /// x and y slices differ in length
    #[error("x and y points must have the same length: got {xs} and {ys}")]
    LengthMismatch {
        /// Number of x points
        xs: usize,
        /// Number of y points
        ys: usize,
    },

    /// Query outside the interpolator's domain
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// Query point
        x: f64,
        /// Lower bound of the domain
        min: f64,
        /// Upper bound of the domain
        max: f64,
    },

    /// Too few points for the requested scheme
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Points supplied
        got: usize,
        /// Points required
        need: usize,
    },

    /// Grid axis not strictly increasing
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// First offending index
        index: usize,
    },

    /// Other malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
