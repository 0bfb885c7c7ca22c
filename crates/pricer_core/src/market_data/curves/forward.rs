//! Outright forward curve for one currency pair.

use std::collections::BTreeMap;

use super::pillars::PillarInterpolant;
use super::rate::pillar_time;
use crate::market_data::error::MarketDataError;
use crate::types::{CurrencyPair, Tenor};

/// Outright forwards per tenor, anchored at spot.
///
/// Uses the same interpolant as [`super::RateCurve`]. A non-positive time
/// returns spot.
///
/// ```
/// use pricer_core::market_data::curves::ForwardCurve;
/// use pricer_core::types::{CurrencyPair, Tenor};
///
/// let pair: CurrencyPair = "EURUSD".parse().unwrap();
/// let mut curve = ForwardCurve::new(pair, 1.0850);
/// curve.add_forward("3M".parse::<Tenor>().unwrap(), 1.0888).unwrap();
///
/// assert_eq!(curve.get_forward(0.0).unwrap(), 1.0850);
/// assert_eq!(curve.get_forward(0.25).unwrap(), 1.0888);
/// ```
#[derive(Debug, Clone)]
pub struct ForwardCurve {
    pair: CurrencyPair,
    spot: f64,
    forwards: BTreeMap<Tenor, f64>,
    days: BTreeMap<Tenor, i64>,
    interpolant: PillarInterpolant,
}

impl ForwardCurve {
    /// Creates a curve with no forwards.
    pub fn new(pair: CurrencyPair, spot: f64) -> Self {
        Self {
            pair,
            spot,
            forwards: BTreeMap::new(),
            days: BTreeMap::new(),
            interpolant: PillarInterpolant::Empty,
        }
    }

    /// Creates a curve from outright forwards and optional day counts.
    pub fn with_forwards(
        pair: CurrencyPair,
        spot: f64,
        forwards: BTreeMap<Tenor, f64>,
        days: BTreeMap<Tenor, i64>,
    ) -> Result<Self, MarketDataError> {
        let mut curve = Self::new(pair, spot);
        curve.days = days;
        curve.set_forwards(forwards)?;
        Ok(curve)
    }

    /// Builds outrights `spot + points / pip_scale` from forward points.
    pub fn from_points(
        pair: CurrencyPair,
        spot: f64,
        points: &BTreeMap<Tenor, f64>,
        days: BTreeMap<Tenor, i64>,
    ) -> Result<Self, MarketDataError> {
        let scale = pair.pip_scale();
        let forwards = points
            .iter()
            .map(|(&tenor, &pts)| (tenor, spot + pts / scale))
            .collect();
        Self::with_forwards(pair, spot, forwards, days)
    }

    /// Adds or replaces one forward.
    pub fn add_forward(&mut self, tenor: Tenor, forward: f64) -> Result<(), MarketDataError> {
        let mut forwards = self.forwards.clone();
        forwards.insert(tenor, forward);
        self.set_forwards(forwards)
    }

    /// Replaces every forward. On error the curve is left unchanged.
    pub fn set_forwards(&mut self, forwards: BTreeMap<Tenor, f64>) -> Result<(), MarketDataError> {
        let points = forwards
            .iter()
            .map(|(tenor, &fwd)| (pillar_time(&self.days, tenor), fwd))
            .collect();
        self.interpolant = PillarInterpolant::build(points)?;
        self.forwards = forwards;
        Ok(())
    }

    /// Outright forward at `t` years; spot for `t <= 0`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::EmptyCurve` for a positive `t` on an empty curve.
    pub fn get_forward(&self, t: f64) -> Result<f64, MarketDataError> {
        if t <= 0.0 {
            return Ok(self.spot);
        }
        self.interpolant
            .value(t)
            .ok_or_else(|| MarketDataError::EmptyCurve {
                curve: self.pair.code(),
            })
    }

    /// The quoted forward if the tenor is a pillar, else the interpolated one.
    pub fn get_forward_for_tenor(&self, tenor: &Tenor) -> Result<f64, MarketDataError> {
        match self.forwards.get(tenor) {
            Some(&fwd) => Ok(fwd),
            None => self.get_forward(pillar_time(&self.days, tenor)),
        }
    }

    /// Forward points at `t`, in the pair's pip convention.
    pub fn get_forward_points(&self, t: f64) -> Result<f64, MarketDataError> {
        Ok((self.get_forward(t)? - self.spot) * self.pair.pip_scale())
    }

    /// Currency pair.
    pub fn pair(&self) -> CurrencyPair {
        self.pair
    }

    /// Spot anchor.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Outright forwards ordered by tenor.
    pub fn forwards(&self) -> &BTreeMap<Tenor, f64> {
        &self.forwards
    }
}
