//! Core types for FX calculations.
//!
//! This module provides:
//! - `dual`: Dual number alias for AD verification (when `num-dual-mode` is enabled)
//! - `time`: ACT/365 year fractions and day counts
//! - `tenor`: Market tenor labels and their approximate year fractions
//! - `currency` / `currency_pair`: ISO 4217 codes and pair conventions
//! - `error`: Structured error types for pricing, currency and interpolation

pub mod currency;
pub mod currency_pair;
#[cfg(feature = "num-dual-mode")]
pub mod dual;
pub mod error;
pub mod tenor;
pub mod time;

// Re-export commonly used types at module level
pub use currency::Currency;
pub use currency_pair::{CurrencyPair, UsdPosition};
pub use error::{CurrencyError, ErrorCategory, InterpolationError, PricingError};
pub use tenor::{is_tenor, tenor_to_years, Tenor, TenorParseError, TenorUnit};
pub use time::{days_between, days_to_years, time_to_maturity, DAYS_PER_YEAR};
