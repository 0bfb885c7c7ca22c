//! Interest rate curve keyed by tenor.

use std::collections::BTreeMap;

use super::pillars::PillarInterpolant;
use super::YieldCurve;
use crate::market_data::error::MarketDataError;
use crate::types::{days_to_years, Currency, Tenor};

/// Annualised decimal rates per tenor for one currency.
///
/// Pillar times come from the explicit day count when one was supplied for
/// the tenor, otherwise from the tenor label (`3M` → 0.25). The interpolant
/// is rebuilt whenever the rates change; outside the pillar range the rate
/// is held at the boundary value.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::RateCurve;
/// use pricer_core::types::{Currency, Tenor};
///
/// let mut curve = RateCurve::new(Currency::USD);
/// curve.add_rate("1M".parse::<Tenor>().unwrap(), 0.0532).unwrap();
/// curve.add_rate("3M".parse::<Tenor>().unwrap(), 0.0534).unwrap();
/// curve.add_rate("1Y".parse::<Tenor>().unwrap(), 0.0490).unwrap();
///
/// assert_eq!(curve.get_rate(0.25).unwrap(), 0.0534);
/// assert_eq!(curve.get_rate(5.0).unwrap(), 0.0490);
/// ```
#[derive(Debug, Clone)]
pub struct RateCurve {
    currency: Currency,
    rates: BTreeMap<Tenor, f64>,
    days: BTreeMap<Tenor, i64>,
    interpolant: PillarInterpolant,
}

impl RateCurve {
    /// Creates an empty curve.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            rates: BTreeMap::new(),
            days: BTreeMap::new(),
            interpolant: PillarInterpolant::Empty,
        }
    }

    /// Creates a curve from rates and optional explicit day counts.
    pub fn with_rates(
        currency: Currency,
        rates: BTreeMap<Tenor, f64>,
        days: BTreeMap<Tenor, i64>,
    ) -> Result<Self, MarketDataError> {
        let mut curve = Self::new(currency);
        curve.days = days;
        curve.set_rates(rates)?;
        Ok(curve)
    }

    /// Adds or replaces one pillar.
    pub fn add_rate(&mut self, tenor: Tenor, rate: f64) -> Result<(), MarketDataError> {
        let mut rates = self.rates.clone();
        rates.insert(tenor, rate);
        self.set_rates(rates)
    }

    /// Adds or replaces one pillar with an explicit day count.
    pub fn add_rate_with_days(
        &mut self,
        tenor: Tenor,
        rate: f64,
        days: i64,
    ) -> Result<(), MarketDataError> {
        let mut rates = self.rates.clone();
        let mut day_counts = self.days.clone();
        rates.insert(tenor, rate);
        day_counts.insert(tenor, days);
        self.rebuild(rates, day_counts)
    }

    /// Replaces every pillar. On error the curve is left unchanged.
    pub fn set_rates(&mut self, rates: BTreeMap<Tenor, f64>) -> Result<(), MarketDataError> {
        let days = self.days.clone();
        self.rebuild(rates, days)
    }

    fn rebuild(
        &mut self,
        rates: BTreeMap<Tenor, f64>,
        days: BTreeMap<Tenor, i64>,
    ) -> Result<(), MarketDataError> {
        let points = rates
            .iter()
            .map(|(tenor, &rate)| (pillar_time(&days, tenor), rate))
            .collect();
        self.interpolant = PillarInterpolant::build(points)?;
        self.rates = rates;
        self.days = days;
        Ok(())
    }

    fn pillar_time(&self, tenor: &Tenor) -> f64 {
        pillar_time(&self.days, tenor)
    }

    /// Interpolated rate at `t` years.
    ///
    /// # Errors
    ///
    /// `MarketDataError::EmptyCurve` if no pillar has been added.
    pub fn get_rate(&self, t: f64) -> Result<f64, MarketDataError> {
        self.interpolant
            .value(t)
            .ok_or_else(|| MarketDataError::EmptyCurve {
                curve: self.currency.code().to_string(),
            })
    }

    /// The quoted rate if the tenor is a pillar, else the interpolated rate.
    pub fn get_rate_for_tenor(&self, tenor: &Tenor) -> Result<f64, MarketDataError> {
        match self.rates.get(tenor) {
            Some(&rate) => Ok(rate),
            None => self.get_rate(self.pillar_time(tenor)),
        }
    }

    /// `exp(-r(t)·t)`.
    pub fn get_discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        let rate = self.get_rate(t)?;
        Ok((-rate * t).exp())
    }

    /// Curve currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Pillar rates ordered by tenor.
    pub fn rates(&self) -> &BTreeMap<Tenor, f64> {
        &self.rates
    }

    /// `(time, rate)` pillars ordered by time.
    pub fn pillars(&self) -> Vec<(f64, f64)> {
        let mut points: Vec<(f64, f64)> = self
            .rates
            .iter()
            .map(|(tenor, &rate)| (self.pillar_time(tenor), rate))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    /// Number of pillars.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// True before any pillar is added.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Explicit day count when present, else the tenor's year fraction.
pub(crate) fn pillar_time(days: &BTreeMap<Tenor, i64>, tenor: &Tenor) -> f64 {
    days.get(tenor)
        .map_or_else(|| tenor.years(), |&d| days_to_years(d))
}

impl YieldCurve<f64> for RateCurve {
    fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        self.get_discount_factor(t)
    }
}
