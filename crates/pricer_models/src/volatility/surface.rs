//! Volatility surface over tenors.
//!
//! A query at `(strike, t)`:
//! 1. finds the two pillars bracketing `t` (the first or last two when `t`
//!    falls outside the pillar range),
//! 2. interpolates each pillar's smile linearly in strike,
//! 3. interpolates the two vols linearly in total variance `σ²·t`.
//!
//! With a single smile only step 2 applies.

use std::collections::BTreeMap;

use pricer_core::market_data::{MarketSnapshot, SmileQuote};
use pricer_core::math::interpolators::{
    find_bracketing_indices, variance_interpolate, ScatteredLinearInterpolator,
};
use pricer_core::types::{days_to_years, Tenor};

use super::error::VolSurfaceError;
use super::smile::{SmilePillar, VolSmile, VolSmileData};

/// Lowest volatility accepted from a surface query (exclusive).
pub const MIN_VOL: f64 = 0.00001;

/// Highest volatility accepted from a surface query (inclusive).
pub const MAX_VOL: f64 = 2.0;

/// Smiles keyed by tenor and ordered by time to expiry.
///
/// # Example
///
/// ```
/// use pricer_models::volatility::{VolSmile, VolSmileData, VolSurface};
///
/// let flat = |tenor: &str, atm: f64| VolSmileData {
///     tenor: tenor.parse().unwrap(),
///     atm, rr25: 0.0, bf25: 0.0, rr10: 0.0, bf10: 0.0,
/// };
/// let mut surface = VolSurface::new();
/// surface.add_smile(VolSmile::new(flat("1M", 0.08), 1.0 / 12.0, 30).unwrap());
/// surface.add_smile(VolSmile::new(flat("1Y", 0.10), 1.0, 365).unwrap());
///
/// let vol = surface.get_vol(1.10, 0.5, 1.0850, 0.05, 0.03).unwrap();
/// assert!(vol > 0.08 && vol < 0.10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolSurface {
    smiles: BTreeMap<Tenor, VolSmile>,
    order: Vec<Tenor>,
}

impl VolSurface {
    /// Creates an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a surface from decimal smile quotes.
    ///
    /// A tenor's expiry comes from `days` when present, else from its
    /// label (`3M` → 0.25 years).
    ///
    /// # Errors
    ///
    /// `VolSurfaceError::MarketData` naming the first tenor whose quotes
    /// give a non-positive pillar vol.
    pub fn from_market_data(
        quotes: &BTreeMap<Tenor, SmileQuote>,
        days: &BTreeMap<Tenor, i64>,
    ) -> Result<Self, VolSurfaceError> {
        let mut surface = Self::new();
        for (&tenor, quote) in quotes {
            let data = VolSmileData::from_quote(tenor, quote);
            let smile = match days.get(&tenor) {
                Some(&d) => VolSmile::new(data, days_to_years(d), d)?,
                None => VolSmile::new(data, tenor.years(), tenor.approx_days())?,
            };
            surface.add_smile(smile);
        }
        Ok(surface)
    }

    /// Surface from a snapshot's smiles, in decimals.
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Result<Self, VolSurfaceError> {
        Self::from_market_data(&snapshot.decimal_smiles(), &snapshot.days)
    }

    /// Adds a smile, replacing any smile of the same tenor.
    pub fn add_smile(&mut self, smile: VolSmile) {
        self.smiles.insert(smile.tenor(), smile);
        self.rebuild_order();
    }

    fn rebuild_order(&mut self) {
        let mut order: Vec<(Tenor, f64)> = self
            .smiles
            .values()
            .map(|s| (s.tenor(), s.time_to_expiry()))
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.order = order.into_iter().map(|(tenor, _)| tenor).collect();
    }

    /// Tenors ordered by time to expiry.
    pub fn tenors(&self) -> Vec<Tenor> {
        self.order.clone()
    }

    /// Number of smiles.
    pub fn len(&self) -> usize {
        self.smiles.len()
    }

    /// True when there is no smile.
    pub fn is_empty(&self) -> bool {
        self.smiles.is_empty()
    }

    /// Smile of a tenor.
    pub fn get_smile_for_tenor(&self, tenor: &Tenor) -> Option<&VolSmile> {
        self.smiles.get(tenor)
    }

    /// Smiles ordered by time to expiry.
    pub fn smiles(&self) -> impl Iterator<Item = &VolSmile> {
        self.order.iter().filter_map(|tenor| self.smiles.get(tenor))
    }

    /// Solves the strikes of every smile.
    ///
    /// # Errors
    ///
    /// The first smile whose strikes cannot be solved.
    pub fn calculate_all_strikes(&mut self, spot: f64, r_dom: f64, r_for: f64) -> Result<(), VolSurfaceError> {
        for smile in self.smiles.values_mut() {
            smile.calculate_strikes(spot, r_dom, r_for)?;
        }
        Ok(())
    }

    /// Tenors of the smiles used for a query at `t`.
    fn bracket(&self, t: f64) -> Result<(Tenor, Tenor), VolSurfaceError> {
        let times: Vec<f64> = self.smiles().map(VolSmile::time_to_expiry).collect();
        let (lo, hi) = find_bracketing_indices(t, &times)?;
        Ok((self.order[lo], self.order[hi]))
    }

    fn ensure_strikes(&mut self, tenor: &Tenor, spot: f64, r_dom: f64, r_for: f64) -> Result<(), VolSurfaceError> {
        match self.smiles.get_mut(tenor) {
            Some(smile) if !smile.has_strikes() => smile.calculate_strikes(spot, r_dom, r_for),
            _ => Ok(()),
        }
    }

    /// Vol at `(strike, t)`, solving the strikes of the smiles it needs
    /// from `spot` and the rates when they have not been solved yet.
    ///
    /// # Errors
    ///
    /// * `VolSurfaceError::EmptySurface` without smiles
    /// * `VolSurfaceError::VolatilityOutOfRange` unless `0.00001 < vol <= 2.0`
    pub fn get_vol(
        &mut self,
        strike: f64,
        t: f64,
        spot: f64,
        r_dom: f64,
        r_for: f64,
    ) -> Result<f64, VolSurfaceError> {
        if self.is_empty() {
            return Err(VolSurfaceError::EmptySurface);
        }
        let (lo, hi) = self.bracket(t)?;
        self.ensure_strikes(&lo, spot, r_dom, r_for)?;
        self.ensure_strikes(&hi, spot, r_dom, r_for)?;
        self.vol_at(strike, t)
    }

    /// Vol at `(strike, t)` from already solved smiles.
    ///
    /// # Errors
    ///
    /// As [`Self::get_vol`], plus `VolSurfaceError::StrikesNotCalculated`
    /// when a bracketing smile has no strikes.
    pub fn vol_at(&self, strike: f64, t: f64) -> Result<f64, VolSurfaceError> {
        if self.is_empty() {
            return Err(VolSurfaceError::EmptySurface);
        }
        let (lo, hi) = self.bracket(t)?;
        let lower = self.smile(&lo)?;
        let vol = if lo == hi {
            lower.get_vol_for_strike(strike)?
        } else {
            let upper = self.smile(&hi)?;
            let ts = [lower.time_to_expiry(), upper.time_to_expiry()];
            let vols = [lower.get_vol_for_strike(strike)?, upper.get_vol_for_strike(strike)?];
            variance_interpolate(t, &ts, &vols, true)?
        };
        check_range(strike, t, vol)
    }

    fn smile(&self, tenor: &Tenor) -> Result<&VolSmile, VolSurfaceError> {
        self.smiles.get(tenor).ok_or(VolSurfaceError::EmptySurface)
    }

    /// ATM vol at `t`, variance-interpolated across every pillar.
    pub fn get_atm_vol(&self, t: f64) -> Result<f64, VolSurfaceError> {
        if self.is_empty() {
            return Err(VolSurfaceError::EmptySurface);
        }
        let (ts, vols): (Vec<f64>, Vec<f64>) = self
            .smiles()
            .map(|s| (s.time_to_expiry(), s.atm_vol()))
            .unzip();
        let vol = variance_interpolate(t, &ts, &vols, true)?;
        check_range(f64::NAN, t, vol)
    }

    /// Vol at `(strike, days)` from the scattered `(days, strike)` cloud of
    /// every solved smile, barycentric within its convex hull and nearest
    /// pillar outside. Rounded to 4 decimals.
    ///
    /// # Errors
    ///
    /// * `VolSurfaceError::EmptySurface` without smiles
    /// * `VolSurfaceError::StrikesNotCalculated` when no smile is solved
    /// * `VolSurfaceError::VolatilityOutOfRange` as for [`Self::get_vol`]
    pub fn get_vol_scattered(&self, strike: f64, days: f64) -> Result<f64, VolSurfaceError> {
        let first = self.order.first().ok_or(VolSurfaceError::EmptySurface)?;
        let mut points = Vec::with_capacity(self.len() * 5);
        for smile in self.smiles().filter(|s| s.has_strikes()) {
            let day_count = smile.days_to_expiry() as f64;
            for (k, vol) in smile.points()? {
                points.push((day_count, k, vol));
            }
        }
        if points.is_empty() {
            return Err(VolSurfaceError::StrikesNotCalculated {
                tenor: first.to_string(),
            });
        }
        let interpolator = ScatteredLinearInterpolator::new(&points)?;
        check_range(strike, days_to_years(days.round() as i64), interpolator.interpolate(days, strike))
    }

    /// Pillar vols of every smile, for display.
    pub fn pillar_vols(&self) -> Vec<(Tenor, [f64; 5])> {
        self.smiles()
            .map(|s| {
                let vols = SmilePillar::all().map(|p| s.data().vol(p));
                (s.tenor(), vols)
            })
            .collect()
    }
}

fn check_range(strike: f64, t: f64, vol: f64) -> Result<f64, VolSurfaceError> {
    if vol > MIN_VOL && vol <= MAX_VOL {
        Ok(vol)
    } else {
        Err(VolSurfaceError::VolatilityOutOfRange { strike, t, vol })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn data(tenor: &str, atm: f64) -> VolSmileData {
        VolSmileData {
            tenor: tenor.parse().unwrap(),
            atm,
            rr25: -0.005,
            bf25: 0.0025,
            rr10: -0.01,
            bf10: 0.006,
        }
    }

    fn flat(tenor: &str, atm: f64) -> VolSmileData {
        VolSmileData {
            tenor: tenor.parse().unwrap(),
            atm,
            rr25: 0.0,
            bf25: 0.0,
            rr10: 0.0,
            bf10: 0.0,
        }
    }

    fn two_tenor_surface() -> VolSurface {
        let mut surface = VolSurface::new();
        surface.add_smile(VolSmile::from_days(data("6M", 0.075), 182).unwrap());
        surface.add_smile(VolSmile::from_days(data("1M", 0.080), 30).unwrap());
        surface
    }

    #[test]
    fn test_empty_surface_errors() {
        let mut surface = VolSurface::new();
        assert_eq!(surface.get_vol(1.0, 0.5, 1.0, 0.0, 0.0), Err(VolSurfaceError::EmptySurface));
        assert_eq!(surface.get_atm_vol(0.5), Err(VolSurfaceError::EmptySurface));
        assert_eq!(surface.get_vol_scattered(1.0, 90.0), Err(VolSurfaceError::EmptySurface));
    }

    #[test]
    fn test_tenors_ordered_by_time() {
        let surface = two_tenor_surface();
        let labels: Vec<String> = surface.tenors().iter().map(|t| t.to_string()).collect();
        assert_eq!(labels, vec!["1M", "6M"]);
    }

    #[test]
    fn test_single_smile_is_strike_interpolation_only() {
        let mut surface = VolSurface::new();
        surface.add_smile(VolSmile::new(data("3M", 0.076), 0.25, 91).unwrap());
        let near = surface.get_vol(1.09, 0.1, 1.0850, 0.0534, 0.03).unwrap();
        let far = surface.get_vol(1.09, 1.5, 1.0850, 0.0534, 0.03).unwrap();
        assert_eq!(near, far);

        let smile = surface.get_smile_for_tenor(&"3M".parse().unwrap()).unwrap();
        assert_eq!(near, smile.get_vol_for_strike(1.09).unwrap());
    }

    #[test]
    fn test_lazy_strikes_only_for_bracket() {
        let mut surface = VolSurface::new();
        surface.add_smile(VolSmile::from_days(data("1M", 0.08), 30).unwrap());
        surface.add_smile(VolSmile::from_days(data("3M", 0.076), 91).unwrap());
        surface.add_smile(VolSmile::from_days(data("1Y", 0.073), 365).unwrap());
        assert!(matches!(
            surface.vol_at(1.09, 0.2),
            Err(VolSurfaceError::StrikesNotCalculated { .. })
        ));
        surface.get_vol(1.09, 0.2, 1.0850, 0.0534, 0.03).unwrap();
        let solved: Vec<bool> = surface.smiles().map(VolSmile::has_strikes).collect();
        assert_eq!(solved, vec![true, true, false]);
    }

    #[test]
    fn test_pillar_time_returns_smile_vol() {
        let mut surface = two_tenor_surface();
        surface.calculate_all_strikes(1.0850, 0.053, 0.03).unwrap();
        let six_months = surface.get_smile_for_tenor(&"6M".parse().unwrap()).unwrap().clone();
        let vol = surface.vol_at(1.10, six_months.time_to_expiry()).unwrap();
        assert_relative_eq!(vol, six_months.get_vol_for_strike(1.10).unwrap(), epsilon = 1e-14);
    }

    #[test]
    fn test_constant_flat_surface_is_constant() {
        let mut surface = VolSurface::new();
        for (tenor, days) in [("1M", 30), ("6M", 182), ("1Y", 365)] {
            surface.add_smile(VolSmile::from_days(flat(tenor, 0.09), days).unwrap());
        }
        for t in [0.01, 0.3, 0.75, 3.0] {
            for k in [0.9, 1.085, 1.3] {
                let vol = surface.get_vol(k, t, 1.0850, 0.05, 0.03).unwrap();
                assert_relative_eq!(vol, 0.09, epsilon = 1e-12);
            }
        }
        assert_relative_eq!(surface.get_atm_vol(0.4).unwrap(), 0.09, epsilon = 1e-12);
    }

    #[test]
    fn test_variance_interpolation_between_pillars() {
        let mut surface = VolSurface::new();
        surface.add_smile(VolSmile::new(flat("6M", 0.08), 0.5, 182).unwrap());
        surface.add_smile(VolSmile::new(flat("1Y", 0.10), 1.0, 365).unwrap());
        let vol = surface.get_vol(1.10, 0.75, 1.0850, 0.05, 0.03).unwrap();
        let variance = 0.5 * (0.08 * 0.08 * 0.5) + 0.5 * (0.10 * 0.10 * 1.0);
        assert_relative_eq!(vol, (variance / 0.75_f64).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_range_vol_is_error() {
        let mut surface = VolSurface::new();
        let steep = VolSmileData {
            rr25: -0.02,
            bf25: 0.0,
            rr10: -0.06,
            bf10: 0.0,
            ..data("1M", 0.08)
        };
        surface.add_smile(VolSmile::new(steep, 1.0 / 12.0, 30).unwrap());
        // call wing extrapolates below zero
        let err = surface.get_vol(2.0, 1.0 / 12.0, 1.0850, 0.053, 0.03).unwrap_err();
        assert!(matches!(err, VolSurfaceError::VolatilityOutOfRange { strike, vol, .. } if strike == 2.0 && vol < 0.0));
    }

    #[test]
    fn test_scattered_matches_pillars() {
        let mut surface = two_tenor_surface();
        assert!(matches!(
            surface.get_vol_scattered(1.09, 60.0),
            Err(VolSurfaceError::StrikesNotCalculated { .. })
        ));
        surface.calculate_all_strikes(1.0850, 0.053, 0.03).unwrap();
        let one_month = surface.get_smile_for_tenor(&"1M".parse().unwrap()).unwrap();
        let atm = one_month.strikes().unwrap().atm;
        let vol = surface.get_vol_scattered(atm, 30.0).unwrap();
        assert_relative_eq!(vol, 0.08, epsilon = 1e-12);

        let between = surface.get_vol_scattered(1.09, 100.0).unwrap();
        assert!(between > 0.07 && between < 0.09);
    }

    #[test]
    fn test_from_market_data_uses_days_or_label() {
        let quote = SmileQuote {
            atm: 0.076,
            rr25: -0.005,
            bf25: 0.0025,
            rr10: -0.01,
            bf10: 0.006,
        };
        let quotes: BTreeMap<Tenor, SmileQuote> = [("3M".parse::<Tenor>().unwrap(), quote), ("1Y".parse::<Tenor>().unwrap(), quote)]
            .into_iter()
            .collect();
        let days: BTreeMap<Tenor, i64> = [("3M".parse::<Tenor>().unwrap(), 92)].into_iter().collect();
        let surface = VolSurface::from_market_data(&quotes, &days).unwrap();

        let three_months = surface.get_smile_for_tenor(&"3M".parse().unwrap()).unwrap();
        assert_relative_eq!(three_months.time_to_expiry(), 92.0 / 365.0);
        let one_year = surface.get_smile_for_tenor(&"1Y".parse().unwrap()).unwrap();
        assert_eq!(one_year.time_to_expiry(), 1.0);
        assert_eq!(surface.pillar_vols().len(), 2);
    }

    #[test]
    fn test_from_market_data_rejects_bad_quote() {
        let quote = SmileQuote {
            atm: 0.05,
            rr25: 0.0,
            bf25: 0.0,
            rr10: 0.2,
            bf10: 0.0,
        };
        let quotes: BTreeMap<Tenor, SmileQuote> = [("2W".parse::<Tenor>().unwrap(), quote)].into_iter().collect();
        let err = VolSurface::from_market_data(&quotes, &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("2W"));
    }
}
