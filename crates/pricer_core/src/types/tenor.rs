//! Market tenor labels (`1W`, `3M`, `18M`, `2Y`).
//!
//! Tenors map to an approximate year fraction when the calendar
//! collaborator has not supplied explicit day counts:
//! `D` → n/365, `W` → 7n/365, `M` → n/12, `Y` → n.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::time::DAYS_PER_YEAR;

/// Unit of a tenor label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Weeks
    Weeks,
    /// Months
    Months,
    /// Years
    Years,
}

impl TenorUnit {
    fn suffix(&self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// Error returned when a tenor label does not match `^(\d+)([DWMY])$`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid tenor format: '{0}'")]
pub struct TenorParseError(pub String);

/// A parsed tenor label.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Tenor;
///
/// let tenor: Tenor = "18m".parse().unwrap();
/// assert_eq!(tenor.to_string(), "18M");
/// assert_eq!(tenor.years(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from its parts.
    pub fn new(count: u32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Numeric part of the label.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Unit of the label.
    #[inline]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Approximate year fraction.
    pub fn years(&self) -> f64 {
        let n = f64::from(self.count);
        match self.unit {
            TenorUnit::Days => n / DAYS_PER_YEAR,
            TenorUnit::Weeks => n * 7.0 / DAYS_PER_YEAR,
            TenorUnit::Months => n / 12.0,
            TenorUnit::Years => n,
        }
    }

    /// Approximate calendar days, rounded to the nearest day.
    pub fn approx_days(&self) -> i64 {
        (self.years() * DAYS_PER_YEAR).round() as i64
    }
}

/// Returns true if `value` looks like a tenor label.
///
/// ```
/// use pricer_core::types::is_tenor;
///
/// assert!(is_tenor("3M"));
/// assert!(is_tenor(" 1w "));
/// assert!(!is_tenor("2024-06-30"));
/// ```
pub fn is_tenor(value: &str) -> bool {
    value.parse::<Tenor>().is_ok()
}

/// Year fraction of a tenor label.
pub fn tenor_to_years(tenor: &str) -> Result<f64, TenorParseError> {
    Ok(tenor.parse::<Tenor>()?.years())
}

impl FromStr for Tenor {
    type Err = TenorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || TenorParseError(s.to_string());

        let mut chars = trimmed.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TenorUnit::Days,
            Some('W') => TenorUnit::Weeks,
            Some('M') => TenorUnit::Months,
            Some('Y') => TenorUnit::Years,
            _ => return Err(err()),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(err());
        }
        let count = digits.parse::<u32>().map_err(|_| err())?;
        Ok(Self { count, unit })
    }
}

impl TryFrom<String> for Tenor {
    type Error = TenorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    /// Orders by approximate length, then by label for equal lengths
    /// (`12M` and `1Y`).
    fn cmp(&self, other: &Self) -> Ordering {
        self.years()
            .total_cmp(&other.years())
            .then_with(|| self.to_string().cmp(&other.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tenor_years() {
        assert_relative_eq!(tenor_to_years("1D").unwrap(), 1.0 / 365.0);
        assert_relative_eq!(tenor_to_years("2W").unwrap(), 14.0 / 365.0);
        assert_relative_eq!(tenor_to_years("3M").unwrap(), 0.25);
        assert_relative_eq!(tenor_to_years("18M").unwrap(), 1.5);
        assert_relative_eq!(tenor_to_years("2Y").unwrap(), 2.0);
    }

    #[test]
    fn test_tenor_case_insensitive() {
        assert_eq!("6m".parse::<Tenor>().unwrap(), Tenor::new(6, TenorUnit::Months));
    }

    #[test]
    fn test_tenor_rejects_malformed() {
        for bad in ["", "M", "3", "3X", "-3M", "3.5M", "M3", "ON"] {
            assert!(bad.parse::<Tenor>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_tenor_ordering() {
        let mut tenors: Vec<Tenor> = ["1Y", "1W", "18M", "3M", "2W"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        tenors.sort();
        let labels: Vec<String> = tenors.iter().map(|t| t.to_string()).collect();
        assert_eq!(labels, vec!["1W", "2W", "3M", "1Y", "18M"]);
    }

    #[test]
    fn test_approx_days() {
        assert_eq!("1W".parse::<Tenor>().unwrap().approx_days(), 7);
        assert_eq!("1Y".parse::<Tenor>().unwrap().approx_days(), 365);
        assert_eq!("1M".parse::<Tenor>().unwrap().approx_days(), 30);
    }
}
