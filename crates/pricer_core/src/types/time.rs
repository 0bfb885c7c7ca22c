//! Time conventions used by the pricer.
//!
//! All year fractions are ACT/365 fixed. Calendar rolls (spot lag, holiday
//! adjustment) are performed by the caller; the pricer only sees day counts.

use chrono::NaiveDate;

/// Days per year under ACT/365 fixed.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Converts a day count into an ACT/365 year fraction.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::days_to_years;
///
/// assert_eq!(days_to_years(365), 1.0);
/// assert!(days_to_years(-10) < 0.0);
/// ```
#[inline]
pub fn days_to_years(days: i64) -> f64 {
    days as f64 / DAYS_PER_YEAR
}

/// Signed number of calendar days from `start` to `end`.
#[inline]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// ACT/365 year fraction between two dates. Negative if `end < start`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use pricer_core::types::time::time_to_maturity;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// assert!((time_to_maturity(start, end) - 182.0 / 365.0).abs() < 1e-12);
/// ```
#[inline]
pub fn time_to_maturity(start: NaiveDate, end: NaiveDate) -> f64 {
    days_to_years(days_between(start, end))
}
