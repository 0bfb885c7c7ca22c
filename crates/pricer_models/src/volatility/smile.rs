//! Five-point FX volatility smile for one tenor.
//!
//! The market quotes ATM, risk reversals and butterflies at the 25 and 10
//! delta points. The pillar vols are
//!
//! - `vol_25c = ATM + 0.5·RR25 + BF25`, `vol_25p = vol_25c − RR25`
//! - `vol_10c = ATM + 0.5·RR10 + BF10`, `vol_10p = vol_10c − RR10`
//!
//! and the strikes of the four delta pillars come from inverting the
//! Garman-Kohlhagen spot delta at each pillar's own vol. The ATM strike is
//! the delta-neutral straddle `F·(1 + 0.5·σ²·t)` on the simple forward
//! `F = S·(1 + (rd − rf)·t)`.

use pricer_core::market_data::{MarketDataError, SmileQuote};
use pricer_core::math::interpolators::linear_interpolate;
use pricer_core::types::{days_to_years, Tenor};

use super::error::VolSurfaceError;
use crate::analytical::strike_from_delta;
use crate::instruments::fx::FxOptionType;

/// Standard delta pillars of an FX smile, lowest strike first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmilePillar {
    /// 10 delta put
    Put10D,
    /// 25 delta put
    Put25D,
    /// Delta-neutral straddle
    Atm,
    /// 25 delta call
    Call25D,
    /// 10 delta call
    Call10D,
}

impl SmilePillar {
    /// Every pillar in quoting order.
    #[inline]
    pub fn all() -> [SmilePillar; 5] {
        [
            SmilePillar::Put10D,
            SmilePillar::Put25D,
            SmilePillar::Atm,
            SmilePillar::Call25D,
            SmilePillar::Call10D,
        ]
    }

    /// Signed spot delta of the pillar; `None` for ATM.
    pub fn delta(&self) -> Option<(f64, FxOptionType)> {
        match self {
            SmilePillar::Put10D => Some((-0.10, FxOptionType::Put)),
            SmilePillar::Put25D => Some((-0.25, FxOptionType::Put)),
            SmilePillar::Atm => None,
            SmilePillar::Call25D => Some((0.25, FxOptionType::Call)),
            SmilePillar::Call10D => Some((0.10, FxOptionType::Call)),
        }
    }

    /// Short label, e.g. `25C`.
    pub fn label(&self) -> &'static str {
        match self {
            SmilePillar::Put10D => "10P",
            SmilePillar::Put25D => "25P",
            SmilePillar::Atm => "ATM",
            SmilePillar::Call25D => "25C",
            SmilePillar::Call10D => "10C",
        }
    }
}

/// Decimal smile quotes for one tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolSmileData {
    /// Tenor the quotes belong to
    pub tenor: Tenor,
    /// ATM vol
    pub atm: f64,
    /// 25 delta risk reversal
    pub rr25: f64,
    /// 25 delta butterfly
    pub bf25: f64,
    /// 10 delta risk reversal
    pub rr10: f64,
    /// 10 delta butterfly
    pub bf10: f64,
}

impl VolSmileData {
    /// Quotes from a decimal [`SmileQuote`].
    pub fn from_quote(tenor: Tenor, quote: &SmileQuote) -> Self {
        Self {
            tenor,
            atm: quote.atm,
            rr25: quote.rr25,
            bf25: quote.bf25,
            rr10: quote.rr10,
            bf10: quote.bf10,
        }
    }

    /// 25 delta call vol.
    #[inline]
    pub fn vol_25c(&self) -> f64 {
        self.atm + 0.5 * self.rr25 + self.bf25
    }

    /// 25 delta put vol.
    #[inline]
    pub fn vol_25p(&self) -> f64 {
        self.vol_25c() - self.rr25
    }

    /// 10 delta call vol.
    #[inline]
    pub fn vol_10c(&self) -> f64 {
        self.atm + 0.5 * self.rr10 + self.bf10
    }

    /// 10 delta put vol.
    #[inline]
    pub fn vol_10p(&self) -> f64 {
        self.vol_10c() - self.rr10
    }

    /// Vol at a pillar.
    pub fn vol(&self, pillar: SmilePillar) -> f64 {
        match pillar {
            SmilePillar::Put10D => self.vol_10p(),
            SmilePillar::Put25D => self.vol_25p(),
            SmilePillar::Atm => self.atm,
            SmilePillar::Call25D => self.vol_25c(),
            SmilePillar::Call10D => self.vol_10c(),
        }
    }

    /// Checks that every pillar vol is positive and finite.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidSmileQuote` naming the tenor and the first
    /// failing pillar.
    pub fn validate(&self) -> Result<(), MarketDataError> {
        let fields = [
            ("atm", self.atm),
            ("vol_25c", self.vol_25c()),
            ("vol_25p", self.vol_25p()),
            ("vol_10c", self.vol_10c()),
            ("vol_10p", self.vol_10p()),
        ];
        match fields.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            Some(&(field, value)) => Err(MarketDataError::InvalidSmileQuote {
                tenor: self.tenor.to_string(),
                field: field.to_string(),
                value,
            }),
            None => Ok(()),
        }
    }
}

/// Solved strikes of the five pillars.
///
/// Not necessarily increasing: an extreme smile can invert the order.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmileStrikes {
    /// 10 delta put strike
    pub put_10: f64,
    /// 25 delta put strike
    pub put_25: f64,
    /// DNS ATM strike
    pub atm: f64,
    /// 25 delta call strike
    pub call_25: f64,
    /// 10 delta call strike
    pub call_10: f64,
}

impl SmileStrikes {
    /// Strike at a pillar.
    pub fn strike(&self, pillar: SmilePillar) -> f64 {
        match pillar {
            SmilePillar::Put10D => self.put_10,
            SmilePillar::Put25D => self.put_25,
            SmilePillar::Atm => self.atm,
            SmilePillar::Call25D => self.call_25,
            SmilePillar::Call10D => self.call_10,
        }
    }
}

/// A validated smile with its expiry and, once solved, its strikes.
///
/// # Example
///
/// ```
/// use pricer_models::volatility::{VolSmile, VolSmileData};
///
/// let data = VolSmileData {
///     tenor: "3M".parse().unwrap(),
///     atm: 0.076, rr25: -0.005, bf25: 0.0025, rr10: -0.01, bf10: 0.006,
/// };
/// let mut smile = VolSmile::new(data, 0.25, 91).unwrap();
/// assert!(smile.get_vol_for_strike(1.09).is_err());
///
/// smile.calculate_strikes(1.0850, 0.0534, 0.03).unwrap();
/// let atm = smile.strikes().unwrap().atm;
/// assert!((smile.get_vol_for_strike(atm).unwrap() - 0.076).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolSmile {
    data: VolSmileData,
    time_to_expiry: f64,
    days_to_expiry: i64,
    strikes: Option<SmileStrikes>,
}

impl VolSmile {
    /// Creates a smile expiring in `time_to_expiry` years (`days_to_expiry` calendar days).
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidSmileQuote` if a pillar vol is not positive.
    pub fn new(data: VolSmileData, time_to_expiry: f64, days_to_expiry: i64) -> Result<Self, MarketDataError> {
        data.validate()?;
        Ok(Self {
            data,
            time_to_expiry,
            days_to_expiry,
            strikes: None,
        })
    }

    /// Creates a smile whose year fraction is `days / 365`.
    pub fn from_days(data: VolSmileData, days_to_expiry: i64) -> Result<Self, MarketDataError> {
        Self::new(data, days_to_years(days_to_expiry), days_to_expiry)
    }

    /// Tenor.
    #[inline]
    pub fn tenor(&self) -> Tenor {
        self.data.tenor
    }

    /// Quotes.
    #[inline]
    pub fn data(&self) -> &VolSmileData {
        &self.data
    }

    /// Time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.time_to_expiry
    }

    /// Calendar days to expiry.
    #[inline]
    pub fn days_to_expiry(&self) -> i64 {
        self.days_to_expiry
    }

    /// ATM vol.
    #[inline]
    pub fn atm_vol(&self) -> f64 {
        self.data.atm
    }

    /// Solved strikes, if any.
    #[inline]
    pub fn strikes(&self) -> Option<&SmileStrikes> {
        self.strikes.as_ref()
    }

    /// True once [`Self::calculate_strikes`] has succeeded.
    #[inline]
    pub fn has_strikes(&self) -> bool {
        self.strikes.is_some()
    }

    /// Solves the five pillar strikes.
    ///
    /// On error the previously solved strikes, if any, are kept.
    ///
    /// # Errors
    ///
    /// `VolSurfaceError::Analytical` if a delta cannot be inverted, e.g. a
    /// foreign discount factor below the pillar delta.
    pub fn calculate_strikes(&mut self, spot: f64, r_dom: f64, r_for: f64) -> Result<(), VolSurfaceError> {
        let t = self.time_to_expiry;
        let simple_forward = spot * (1.0 + (r_dom - r_for) * t);
        let solve = |pillar: SmilePillar| -> Result<f64, VolSurfaceError> {
            match pillar.delta() {
                Some((delta, option_type)) => Ok(strike_from_delta(
                    spot,
                    delta,
                    r_dom,
                    r_for,
                    self.data.vol(pillar),
                    t,
                    option_type,
                )?),
                None => Ok(simple_forward * (1.0 + 0.5 * self.data.atm * self.data.atm * t)),
            }
        };
        self.strikes = Some(SmileStrikes {
            put_10: solve(SmilePillar::Put10D)?,
            put_25: solve(SmilePillar::Put25D)?,
            atm: solve(SmilePillar::Atm)?,
            call_25: solve(SmilePillar::Call25D)?,
            call_10: solve(SmilePillar::Call10D)?,
        });
        Ok(())
    }

    /// `(strike, vol)` pairs sorted by strike.
    ///
    /// # Errors
    ///
    /// `VolSurfaceError::StrikesNotCalculated` before strikes are solved.
    pub fn points(&self) -> Result<Vec<(f64, f64)>, VolSurfaceError> {
        let strikes = self.strikes.as_ref().ok_or_else(|| VolSurfaceError::StrikesNotCalculated {
            tenor: self.tenor().to_string(),
        })?;
        let mut points: Vec<(f64, f64)> = SmilePillar::all()
            .iter()
            .map(|&p| (strikes.strike(p), self.data.vol(p)))
            .collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(points)
    }

    /// Vol at `strike`, linear in strike with extrapolation beyond the wings.
    ///
    /// # Errors
    ///
    /// `VolSurfaceError::StrikesNotCalculated` before strikes are solved.
    pub fn get_vol_for_strike(&self, strike: f64) -> Result<f64, VolSurfaceError> {
        let (strikes, vols): (Vec<f64>, Vec<f64>) = self.points()?.into_iter().unzip();
        Ok(linear_interpolate(strike, &strikes, &vols, true)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data(tenor: &str) -> VolSmileData {
        VolSmileData {
            tenor: tenor.parse().unwrap(),
            atm: 0.076,
            rr25: -0.005,
            bf25: 0.0025,
            rr10: -0.01,
            bf10: 0.006,
        }
    }

    fn solved() -> VolSmile {
        let mut smile = VolSmile::new(data("3M"), 0.25, 91).unwrap();
        smile.calculate_strikes(1.0850, 0.0534, 0.03).unwrap();
        smile
    }

    #[test]
    fn test_derived_pillar_vols() {
        let d = data("3M");
        assert_relative_eq!(d.vol_25c(), 0.076, epsilon = 1e-15);
        assert_relative_eq!(d.vol_25p(), 0.081, epsilon = 1e-15);
        assert_relative_eq!(d.vol_10c(), 0.077, epsilon = 1e-15);
        assert_relative_eq!(d.vol_10p(), 0.087, epsilon = 1e-15);
    }

    #[test]
    fn test_validate_names_tenor_and_field() {
        let mut d = data("1M");
        d.rr10 = 0.2;
        let err = d.validate().unwrap_err();
        assert_eq!(
            err,
            MarketDataError::InvalidSmileQuote {
                tenor: "1M".to_string(),
                field: "vol_10p".to_string(),
                value: d.vol_10p(),
            }
        );
        assert!(VolSmile::new(d, 1.0 / 12.0, 30).is_err());
    }

    #[test]
    fn test_strikes_match_reference_values() {
        let strikes = *solved().strikes().unwrap();
        assert_relative_eq!(strikes.put_10, 1.033359029291189, epsilon = 1e-9);
        assert_relative_eq!(strikes.put_25, 1.0630824633943632, epsilon = 1e-9);
        assert_relative_eq!(strikes.atm, 1.0921352027144997, epsilon = 1e-12);
        assert_relative_eq!(strikes.call_25, 1.1202568391073093, epsilon = 1e-9);
        assert_relative_eq!(strikes.call_10, 1.1472252078842888, epsilon = 1e-9);
    }

    #[test]
    fn test_vol_for_strike_reproduces_pillars_and_extrapolates() {
        let smile = solved();
        let strikes = *smile.strikes().unwrap();
        for pillar in SmilePillar::all() {
            assert_relative_eq!(
                smile.get_vol_for_strike(strikes.strike(pillar)).unwrap(),
                smile.data().vol(pillar),
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(smile.get_vol_for_strike(1.09).unwrap(), 0.07636747011890539, epsilon = 1e-8);
        assert_relative_eq!(smile.get_vol_for_strike(0.90).unwrap(), 0.11391997744842282, epsilon = 1e-7);
    }

    #[test]
    fn test_query_before_strikes_is_error() {
        let smile = VolSmile::from_days(data("6M"), 182).unwrap();
        assert_relative_eq!(smile.time_to_expiry(), 182.0 / 365.0);
        assert!(matches!(
            smile.get_vol_for_strike(1.0),
            Err(VolSurfaceError::StrikesNotCalculated { ref tenor }) if tenor == "6M"
        ));
    }

    #[test]
    fn test_expired_smile_collapses_to_spot() {
        let mut smile = VolSmile::new(data("1W"), 0.0, 0).unwrap();
        smile.calculate_strikes(1.0850, 0.05, 0.03).unwrap();
        let strikes = smile.strikes().unwrap();
        for pillar in SmilePillar::all() {
            assert_eq!(strikes.strike(pillar), 1.0850);
        }
        assert!(smile.get_vol_for_strike(1.2).unwrap().is_finite());
    }

    #[test]
    fn test_inverted_smile_still_interpolates() {
        let mut d = data("1Y");
        // a 10 delta call vol far below the 25 delta call vol pulls its strike inside
        d.atm = 0.10;
        d.rr25 = 0.10;
        d.bf25 = 0.0;
        d.rr10 = -0.10;
        d.bf10 = 0.0;
        let mut smile = VolSmile::new(d, 1.0, 365).unwrap();
        smile.calculate_strikes(1.0850, 0.049, 0.03).unwrap();
        let strikes = *smile.strikes().unwrap();
        assert!(strikes.call_10 < strikes.call_25);

        let points = smile.points().unwrap();
        assert!(points.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_relative_eq!(smile.get_vol_for_strike(1.10).unwrap(), 0.08585610521907067, epsilon = 1e-8);
    }
}
