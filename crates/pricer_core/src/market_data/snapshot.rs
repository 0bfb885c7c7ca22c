//! Market data snapshot for one currency pair.
//!
//! This is the input contract of the pricing and scenario engines: spot,
//! forward points, the USD deposit curve and the five-quote volatility
//! smiles per tenor, with the calendar day count of each tenor when known.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::curves::{pillar_time, ForwardCurve, RateCurve};
use super::error::MarketDataError;
use super::fx_rates::{implied_rate, outright_forward, FxCurves, FxRates};
use crate::math::interpolators::linear_interpolate;
use crate::types::{Currency, CurrencyPair, Tenor, UsdPosition};

/// Whether rates and vols are quoted in percent (`5.30`) or decimals (`0.053`).
///
/// Forward points are always in pips and are not affected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum QuoteUnits {
    /// Percentage points, as quoted by market data vendors
    #[default]
    Percent,
    /// Decimals
    Decimal,
}

impl QuoteUnits {
    /// Divisor turning a quote into a decimal.
    pub fn divisor(&self) -> f64 {
        match self {
            QuoteUnits::Percent => 100.0,
            QuoteUnits::Decimal => 1.0,
        }
    }
}

/// ATM, risk reversal and butterfly quotes for one tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmileQuote {
    /// At-the-money (delta-neutral straddle) vol
    pub atm: f64,
    /// 25-delta risk reversal
    pub rr25: f64,
    /// 25-delta butterfly
    pub bf25: f64,
    /// 10-delta risk reversal
    pub rr10: f64,
    /// 10-delta butterfly
    pub bf10: f64,
}

impl SmileQuote {
    /// Every quote divided by `divisor`.
    pub fn scaled(&self, divisor: f64) -> Self {
        Self {
            atm: self.atm / divisor,
            rr25: self.rr25 / divisor,
            bf25: self.bf25 / divisor,
            rr10: self.rr10 / divisor,
            bf10: self.bf10 / divisor,
        }
    }

    fn fields(&self) -> [(&'static str, f64); 5] {
        [
            ("atm", self.atm),
            ("rr25", self.rr25),
            ("bf25", self.bf25),
            ("rr10", self.rr10),
            ("bf10", self.bf10),
        ]
    }
}

/// Market data for one currency pair at one point in time.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::{MarketSnapshot, QuoteUnits};
///
/// let mut snapshot = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0850);
/// snapshot.quote_units = QuoteUnits::Percent;
/// snapshot.forward_points.insert("3M".parse().unwrap(), 38.0);
/// snapshot.usd_rates.insert("3M".parse().unwrap(), 5.34);
///
/// let rates = snapshot.fx_rates(0.25).unwrap();
/// assert!((rates.domestic_rate - 0.0534).abs() < 1e-15);
/// assert!((rates.forward - 1.0888).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Spot rate
    pub spot: f64,
    /// Observation date, when known
    #[cfg_attr(feature = "serde", serde(default))]
    pub as_of: Option<NaiveDate>,
    /// Units of `usd_rates` and `smiles`
    #[cfg_attr(feature = "serde", serde(default))]
    pub quote_units: QuoteUnits,
    /// Forward points in pips per tenor
    #[cfg_attr(feature = "serde", serde(default))]
    pub forward_points: BTreeMap<Tenor, f64>,
    /// USD deposit rates per tenor
    #[cfg_attr(feature = "serde", serde(default))]
    pub usd_rates: BTreeMap<Tenor, f64>,
    /// Smile quotes per tenor
    #[cfg_attr(feature = "serde", serde(default))]
    pub smiles: BTreeMap<Tenor, SmileQuote>,
    /// Calendar days to maturity per tenor
    #[cfg_attr(feature = "serde", serde(default))]
    pub days: BTreeMap<Tenor, i64>,
}

impl MarketSnapshot {
    /// Creates a snapshot with spot only.
    pub fn new(pair: CurrencyPair, spot: f64) -> Self {
        Self {
            pair,
            spot,
            as_of: None,
            quote_units: QuoteUnits::default(),
            forward_points: BTreeMap::new(),
            usd_rates: BTreeMap::new(),
            smiles: BTreeMap::new(),
            days: BTreeMap::new(),
        }
    }

    /// Checks spot, day counts and that every quote is finite.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::NonPositiveRate` for a non-positive spot
    /// * `MarketDataError::InvalidSnapshot` for non-finite quotes or day counts below 1
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(MarketDataError::NonPositiveRate {
                name: "spot".to_string(),
                value: self.spot,
            });
        }
        let non_finite = |what: &str, tenor: &Tenor, value: f64| {
            MarketDataError::InvalidSnapshot(format!("{} for {} is {}", what, tenor, value))
        };
        for (tenor, &pts) in &self.forward_points {
            if !pts.is_finite() {
                return Err(non_finite("forward points", tenor, pts));
            }
        }
        for (tenor, &rate) in &self.usd_rates {
            if !rate.is_finite() {
                return Err(non_finite("USD rate", tenor, rate));
            }
        }
        for (tenor, smile) in &self.smiles {
            if let Some((field, value)) = smile.fields().into_iter().find(|(_, v)| !v.is_finite())
            {
                return Err(non_finite(field, tenor, value));
            }
        }
        if let Some((tenor, days)) = self.days.iter().find(|(_, d)| **d < 1) {
            return Err(MarketDataError::InvalidSnapshot(format!(
                "days to maturity for {} is {}",
                tenor, days
            )));
        }
        Ok(())
    }

    /// Every tenor carrying at least one quote, shortest first.
    pub fn tenors(&self) -> Vec<Tenor> {
        let all: BTreeSet<Tenor> = self
            .forward_points
            .keys()
            .chain(self.usd_rates.keys())
            .chain(self.smiles.keys())
            .copied()
            .collect();
        all.into_iter().collect()
    }

    /// Calendar days to the tenor's maturity: explicit if supplied, else
    /// approximated from the label.
    pub fn days_to_maturity(&self, tenor: &Tenor) -> i64 {
        self.days
            .get(tenor)
            .copied()
            .unwrap_or_else(|| tenor.approx_days())
    }

    /// Year fraction of the tenor's maturity.
    pub fn time_to_maturity(&self, tenor: &Tenor) -> f64 {
        pillar_time(&self.days, tenor)
    }

    /// USD rate for the tenor as a decimal.
    pub fn usd_rate(&self, tenor: &Tenor) -> Option<f64> {
        self.usd_rates
            .get(tenor)
            .map(|r| r / self.quote_units.divisor())
    }

    /// Smile quotes for the tenor as decimals.
    pub fn smile(&self, tenor: &Tenor) -> Option<SmileQuote> {
        self.smiles
            .get(tenor)
            .map(|s| s.scaled(self.quote_units.divisor()))
    }

    /// Decimal smile quotes for every tenor.
    pub fn decimal_smiles(&self) -> BTreeMap<Tenor, SmileQuote> {
        let divisor = self.quote_units.divisor();
        self.smiles
            .iter()
            .map(|(&tenor, smile)| (tenor, smile.scaled(divisor)))
            .collect()
    }

    /// USD deposit curve in decimals.
    pub fn usd_curve(&self) -> Result<RateCurve, MarketDataError> {
        let divisor = self.quote_units.divisor();
        let rates = self
            .usd_rates
            .iter()
            .map(|(&tenor, &r)| (tenor, r / divisor))
            .collect();
        RateCurve::with_rates(Currency::USD, rates, self.days.clone())
    }

    /// Outright forward curve.
    pub fn forward_curve(&self) -> Result<ForwardCurve, MarketDataError> {
        ForwardCurve::from_points(self.pair, self.spot, &self.forward_points, self.days.clone())
    }

    /// Forward points at `t`, linear in time with extrapolation.
    ///
    /// # Errors
    ///
    /// `MarketDataError::EmptyCurve` if the snapshot has no forward points.
    pub fn forward_points_at(&self, t: f64) -> Result<f64, MarketDataError> {
        if self.forward_points.is_empty() {
            return Err(MarketDataError::EmptyCurve {
                curve: format!("{} forward points", self.pair),
            });
        }
        let mut points: Vec<(f64, f64)> = self
            .forward_points
            .iter()
            .map(|(tenor, &pts)| (self.time_to_maturity(tenor), pts))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (ts, pts): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
        Ok(linear_interpolate(t, &ts, &pts, true)?)
    }

    /// Domestic and foreign deposit curves implied at every tenor quoted
    /// with both a USD rate and forward points, plus the forward curve.
    pub fn fx_curves(&self) -> Result<FxCurves, MarketDataError> {
        let position = self.pair.usd_position();
        let mut usd = BTreeMap::new();
        let mut implied = BTreeMap::new();
        for (tenor, &pts) in &self.forward_points {
            let Some(usd_rate) = self.usd_rate(tenor) else {
                continue;
            };
            let forward = outright_forward(&self.pair, self.spot, pts);
            let t = self.time_to_maturity(tenor);
            usd.insert(*tenor, usd_rate);
            implied.insert(*tenor, implied_rate(&self.pair, usd_rate, self.spot, forward, t)?);
        }

        let (domestic, foreign) = match position {
            UsdPosition::Quote => (usd, implied),
            UsdPosition::Base => (implied, usd),
            UsdPosition::None => {
                return Err(MarketDataError::UnsupportedPair {
                    pair: self.pair.code(),
                    reason: "no USD leg to anchor the deposit curves".to_string(),
                })
            }
        };
        Ok(FxCurves {
            domestic: RateCurve::with_rates(self.pair.quote(), domestic, self.days.clone())?,
            foreign: RateCurve::with_rates(self.pair.base(), foreign, self.days.clone())?,
            forward: self.forward_curve()?,
        })
    }

    /// Rates at `t`: USD rate from the spline curve, forward points linear
    /// in time, the other rate implied by parity.
    pub fn fx_rates(&self, t: f64) -> Result<FxRates, MarketDataError> {
        let usd_rate = self.usd_curve()?.get_rate(t)?;
        let points = self.forward_points_at(t)?;
        let rates = FxRates::calculate(&self.pair, self.spot, points, usd_rate, t)?;
        Ok(rates.with_curves(self.fx_curves()?))
    }
}
