//! Market context and execution for the 3-stage pricing flow.
//!
//! 1. **Definition**: [`PricingRequest`] says what to price, without market data.
//! 2. **Linking**: [`MarketContext`] owns a validated snapshot and its vol
//!    surface, and [`MarketContext::resolve`] turns a request into a
//!    [`ResolvedTrade`] with every market input fixed.
//! 3. **Execution**: [`price_resolved`] runs the Garman-Kohlhagen pricer on
//!    the resolved trade, with no further market lookups.

use pricer_core::market_data::MarketSnapshot;
use pricer_models::analytical::{calculate_all, delta_hedge, strike_from_delta, OptionParams};
use pricer_models::volatility::{SmilePillar, VolSurface};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PricingSessionError;
use crate::report::{PriceReport, SurfaceRow};
use crate::request::{PricingRequest, ResolvedExpiry, StrikeSpec};

/// A validated snapshot and the vol surface built from it.
///
/// Smile strikes are solved per request, with that request's rates, on a
/// copy of the surface. Resolving one request never changes the result of
/// another.
#[derive(Debug, Clone)]
pub struct MarketContext {
    snapshot: MarketSnapshot,
    surface: VolSurface,
}

/// A request with every market input resolved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTrade {
    /// Request as submitted
    pub request: PricingRequest,
    /// Days and year fraction to expiry
    pub expiry: ResolvedExpiry,
    /// Forward points at expiry, in pips
    pub forward_points: f64,
    /// Outright forward at expiry
    pub forward: f64,
    /// Pricer inputs
    pub params: OptionParams,
}

impl MarketContext {
    /// Validates `snapshot` and builds its surface.
    ///
    /// # Errors
    ///
    /// Snapshot validation failures and invalid smile quotes.
    pub fn new(snapshot: MarketSnapshot) -> Result<Self, PricingSessionError> {
        snapshot.validate()?;
        let surface = VolSurface::from_snapshot(&snapshot)?;
        Ok(Self { snapshot, surface })
    }

    /// The snapshot.
    pub fn snapshot(&self) -> &MarketSnapshot {
        &self.snapshot
    }

    /// The vol surface.
    pub fn surface(&self) -> &VolSurface {
        &self.surface
    }

    /// Resolves expiry, rates, strike and volatility of `request`.
    ///
    /// Rates come from the USD curve (spline) and forward points (linear in
    /// time) at expiry. Delta strikes are solved with the ATM vol at expiry;
    /// the pricing vol is then read off the surface at the resolved strike.
    ///
    /// # Errors
    ///
    /// Any failure along the way; nothing falls back to a default rate or vol.
    pub fn resolve(&self, request: &PricingRequest) -> Result<ResolvedTrade, PricingSessionError> {
        let expiry = request.expiry.resolve(&self.snapshot)?;
        let t = expiry.time_to_expiry;
        let spot = self.snapshot.spot;
        let rates = self.snapshot.fx_rates(t)?;
        let (r_dom, r_for) = (rates.domestic_rate, rates.foreign_rate);

        let strike = match request.strike {
            StrikeSpec::AtmForward => rates.forward,
            StrikeSpec::AtmSpot => spot,
            StrikeSpec::Absolute(k) => k,
            spec @ StrikeSpec::Delta { .. } => {
                let (delta, side) = spec
                    .signed_delta(request.option_type)
                    .ok_or_else(|| PricingSessionError::strike(spec.to_string(), "not a delta strike"))?;
                let atm_vol = self.surface.get_atm_vol(t)?;
                strike_from_delta(spot, delta, r_dom, r_for, atm_vol, t, side)?
            }
        };

        let mut surface = self.surface.clone();
        let volatility = surface.get_vol(strike, t, spot, r_dom, r_for)?;
        let params = OptionParams::new(
            spot,
            strike,
            r_dom,
            r_for,
            volatility,
            t,
            request.option_type,
            request.notional,
            request.notional_currency,
        )?;
        debug!(
            pair = %request.pair,
            days = expiry.days,
            t,
            strike,
            vol = volatility,
            r_dom,
            r_for,
            "resolved request"
        );
        Ok(ResolvedTrade {
            request: *request,
            expiry,
            forward_points: rates.forward_points(),
            forward: rates.forward,
            params,
        })
    }

    /// Resolves and prices `request`.
    pub fn price(&self, request: &PricingRequest) -> Result<PriceReport, PricingSessionError> {
        let trade = self.resolve(request)?;
        let mut report = price_resolved(&trade)?;
        report.as_of = self.snapshot.as_of;
        Ok(report)
    }

    /// Every pillar with its rates and solved strikes.
    ///
    /// Each smile's strikes are solved with the rates at its own expiry.
    pub fn surface_grid(&self) -> Result<Vec<SurfaceRow>, PricingSessionError> {
        let spot = self.snapshot.spot;
        let mut rows = Vec::with_capacity(self.surface.len());
        for smile in self.surface.smiles() {
            let t = smile.time_to_expiry();
            let rates = self.snapshot.fx_rates(t)?;
            let mut solved = smile.clone();
            solved.calculate_strikes(spot, rates.domestic_rate, rates.foreign_rate)?;
            let strikes = solved
                .strikes()
                .map(|s| SmilePillar::all().map(|p| s.strike(p)))
                .unwrap_or([f64::NAN; 5]);
            rows.push(SurfaceRow {
                tenor: smile.tenor(),
                days: smile.days_to_expiry(),
                time_to_expiry: t,
                forward: rates.forward,
                domestic_rate: rates.domestic_rate,
                foreign_rate: rates.foreign_rate,
                vols: SmilePillar::all().map(|p| smile.data().vol(p)),
                strikes,
            });
        }
        Ok(rows)
    }
}

/// Prices a resolved trade and sizes its delta hedge.
///
/// # Errors
///
/// Pricer input validation failures.
pub fn price_resolved(trade: &ResolvedTrade) -> Result<PriceReport, PricingSessionError> {
    let request = &trade.request;
    let params = &trade.params;
    let result = calculate_all(params, request.pair.pip_scale())?;
    let hedge = delta_hedge(params, request.direction)?;
    Ok(PriceReport {
        request: *request,
        as_of: None,
        expiry_days: trade.expiry.days,
        time_to_expiry: trade.expiry.time_to_expiry,
        spot: params.spot,
        forward_points: trade.forward_points,
        forward: trade.forward,
        domestic_rate: params.domestic_rate,
        foreign_rate: params.foreign_rate,
        strike: params.strike,
        volatility: params.volatility,
        params: *params,
        result,
        hedge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MarketSnapshotProvider, MockSnapshotProvider};
    use crate::request::Expiry;
    use approx::assert_relative_eq;
    use pricer_models::analytical::GarmanKohlhagen;
    use pricer_models::instruments::fx::{Direction, FxOptionType, NotionalCurrency};

    fn context(pair: &str) -> MarketContext {
        let snapshot = MockSnapshotProvider::new()
            .snapshot(&pair.parse().unwrap())
            .unwrap();
        MarketContext::new(snapshot).unwrap()
    }

    fn request(days: i64) -> PricingRequest {
        PricingRequest::new("EURUSD".parse().unwrap(), Expiry::Days(days))
    }

    #[test]
    fn test_atmf_strike_is_forward() {
        let ctx = context("EURUSD");
        let trade = ctx.resolve(&request(91)).unwrap();
        assert_relative_eq!(trade.params.strike, trade.forward);
        assert_relative_eq!(trade.forward, 1.0850 + trade.forward_points / 10_000.0, max_relative = 1e-12);
        // just inside the 3M pillar (0.25y)
        assert_relative_eq!(trade.forward_points, 38.0, epsilon = 0.2);
    }

    #[test]
    fn test_atms_strike_is_spot() {
        let ctx = context("EURUSD");
        let trade = ctx
            .resolve(&request(91).with_strike(StrikeSpec::AtmSpot))
            .unwrap();
        assert_eq!(trade.params.strike, 1.0850);
    }

    #[test]
    fn test_delta_strike_hits_delta_at_atm_vol() {
        let ctx = context("EURUSD");
        let put = request(182)
            .with_option_type(FxOptionType::Put)
            .with_strike(StrikeSpec::parse("25D").unwrap());
        let trade = ctx.resolve(&put).unwrap();
        let atm_vol = ctx.surface().get_atm_vol(trade.expiry.time_to_expiry).unwrap();

        let at_atm_vol = OptionParams {
            volatility: atm_vol,
            ..trade.params
        };
        let delta = at_atm_vol.model().unwrap().delta(FxOptionType::Put);
        assert_relative_eq!(delta, -0.25, epsilon = 1e-9);
        assert!(trade.params.strike < 1.0850);
    }

    #[test]
    fn test_put_wing_vol_above_atm() {
        let ctx = context("EURUSD");
        let atm = ctx.resolve(&request(182)).unwrap();
        let wing = ctx
            .resolve(&request(182).with_strike(StrikeSpec::parse("10DP").unwrap()))
            .unwrap();
        // negative risk reversals plus positive butterflies lift the put wing
        assert!(wing.params.volatility > atm.params.volatility);
    }

    #[test]
    fn test_price_resolved_matches_pricer() {
        let ctx = context("EURUSD");
        let request = request(91)
            .with_direction(Direction::ClientSells)
            .with_notional(2_000_000.0, NotionalCurrency::For);
        let report = ctx.price(&request).unwrap();
        let unit = GarmanKohlhagen::new(
            pricer_models::analytical::GarmanKohlhagenParams::new(
                report.spot,
                report.strike,
                report.domestic_rate,
                report.foreign_rate,
                report.volatility,
                report.time_to_expiry,
            )
            .unwrap(),
        )
        .price(FxOptionType::Call);
        assert_relative_eq!(report.result.premium, unit * 2_000_000.0, max_relative = 1e-12);
        assert!(report.hedge < 0.0);
        assert_relative_eq!(report.hedge, -report.result.greeks.delta * 2_000_000.0, max_relative = 1e-12);
        assert!(report.as_of.is_some());
    }

    #[test]
    fn test_cross_pair_is_business_rule() {
        let ctx = context("EURGBP");
        let request = PricingRequest::new("EURGBP".parse().unwrap(), Expiry::Days(91));
        let err = ctx.resolve(&request).unwrap_err();
        assert_eq!(err.category(), pricer_core::types::ErrorCategory::BusinessRule);
    }

    #[test]
    fn test_surface_grid_strikes_ordered() {
        let ctx = context("EURUSD");
        let grid = ctx.surface_grid().unwrap();
        assert_eq!(grid.len(), 10);
        for row in &grid {
            assert!(row.strikes.windows(2).all(|w| w[0] < w[1]), "{}", row.tenor);
            assert_relative_eq!(row.vols[2], ctx.surface().get_smile_for_tenor(&row.tenor).unwrap().atm_vol());
        }
        assert!(grid.windows(2).all(|w| w[0].time_to_expiry < w[1].time_to_expiry));
    }

    #[test]
    fn test_resolution_independent_of_call_order() {
        let near = request(120).with_strike(StrikeSpec::Absolute(1.10));
        let far = request(300).with_strike(StrikeSpec::parse("10DP").unwrap());

        let fresh = context("EURUSD").resolve(&near).unwrap();
        let ctx = context("EURUSD");
        ctx.resolve(&far).unwrap();
        let after = ctx.resolve(&near).unwrap();
        assert_eq!(after.params, fresh.params);
        assert!(!ctx.surface().smiles().any(|s| s.has_strikes()));
    }

    #[test]
    fn test_empty_snapshot_fails_without_defaults() {
        let snapshot = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0850);
        let ctx = MarketContext::new(snapshot).unwrap();
        assert!(ctx.resolve(&request(91)).is_err());
    }
}
