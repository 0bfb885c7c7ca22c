//! Applying a historical delta to the current market.

use std::collections::BTreeMap;

use pricer_core::market_data::{
    outright_forward, FxRates, MarketSnapshot, QuoteUnits, RateCurve, SmileQuote,
};
use pricer_core::types::{days_to_years, CurrencyPair, Tenor};
use pricer_models::volatility::VolSurface;
use tracing::debug;

use super::delta::MarketDataDelta;
use super::error::ScenarioError;

/// Current market moved by a [`MarketDataDelta`], in decimals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShockedMarketData {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Shocked spot
    pub spot: f64,
    /// Shocked outright forward per tenor
    pub forwards: BTreeMap<Tenor, f64>,
    /// Shocked domestic rate per tenor
    pub domestic_rates: BTreeMap<Tenor, f64>,
    /// Shocked foreign rate per tenor
    pub foreign_rates: BTreeMap<Tenor, f64>,
    /// Shocked USD deposit rate per tenor
    pub usd_rates: BTreeMap<Tenor, f64>,
    /// Spot of the current market, against which `carry_points` are quoted
    pub carry_spot: f64,
    /// Forward points of the current market in pips. With the shocked USD
    /// curve they imply the non-USD rate, so both rates move by the USD diff.
    pub carry_points: BTreeMap<Tenor, f64>,
    /// Shocked smile quotes per tenor
    pub smiles: BTreeMap<Tenor, SmileQuote>,
    /// Shocked ATM vol per tenor
    pub atm_vols: BTreeMap<Tenor, f64>,
    /// Explicit calendar days to maturity, as supplied with the current
    /// market; other tenors take the year fraction of their label
    pub days: BTreeMap<Tenor, i64>,
    /// Days to expiry of the option before the shock
    pub original_expiry_days: i64,
    /// Days to expiry of the option after the shock window
    pub shocked_expiry_days: i64,
    /// Relative spot change applied
    pub spot_pct_change: f64,
    /// Mean ATM change applied
    pub avg_vol_change: f64,
    /// Mean rate change applied
    pub avg_rate_change: f64,
}

impl ShockedMarketData {
    /// Shocked time to expiry in years (ACT/365).
    pub fn time_to_expiry(&self) -> f64 {
        days_to_years(self.shocked_expiry_days)
    }

    /// Days consumed by the shock window.
    pub fn elapsed_days(&self) -> i64 {
        self.original_expiry_days - self.shocked_expiry_days
    }

    /// Domestic deposit curve through the shocked pillar rates.
    pub fn domestic_curve(&self) -> Result<RateCurve, ScenarioError> {
        Ok(RateCurve::with_rates(
            self.pair.quote(),
            self.domestic_rates.clone(),
            self.days.clone(),
        )?)
    }

    /// Foreign deposit curve through the shocked pillar rates.
    pub fn foreign_curve(&self) -> Result<RateCurve, ScenarioError> {
        Ok(RateCurve::with_rates(
            self.pair.base(),
            self.foreign_rates.clone(),
            self.days.clone(),
        )?)
    }

    /// Domestic and foreign rates at `t`.
    ///
    /// Resolved as a snapshot resolves them: USD rate off the shocked USD
    /// spline, forward points linear in time, the other rate implied. An
    /// unshocked market gives back exactly the rates of the current
    /// snapshot.
    pub fn rates_at(&self, t: f64) -> Result<(f64, f64), ScenarioError> {
        let rates = self.carry_market().fx_rates(t)?;
        Ok((rates.domestic_rate, rates.foreign_rate))
    }

    fn carry_market(&self) -> MarketSnapshot {
        let mut market = MarketSnapshot::new(self.pair, self.carry_spot);
        market.quote_units = QuoteUnits::Decimal;
        market.forward_points = self.carry_points.clone();
        market.usd_rates = self.usd_rates.clone();
        market.days = self.days.clone();
        market
    }

    /// Full smile surface of the shocked market.
    pub fn vol_surface(&self) -> Result<VolSurface, ScenarioError> {
        Ok(VolSurface::from_market_data(&self.smiles, &self.days)?)
    }
}

/// Builds shocked markets from a current snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShockCalculator;

impl ShockCalculator {
    /// Moves `current` by `delta`.
    ///
    /// - spot: `S·(1 + spot %)`
    /// - forwards: points recovered from the outright, moved by their
    ///   relative change `P + |P|·%` (so negative points move the same way
    ///   they were measured), added back to the shocked spot
    /// - rates: the USD rate change is added to the USD rate of each tenor,
    ///   and so to both the domestic and the foreign rate
    /// - smiles: see [`VolDiff::apply`](crate::scenarios::VolDiff::apply)
    ///
    /// Tenors absent from `delta` keep their current quotes.
    ///
    /// # Errors
    ///
    /// * `ScenarioError::OptionExpired` when the window consumes the
    ///   `original_expiry_days`
    /// * `ScenarioError::MarketData` for a cross pair or a snapshot whose
    ///   forwards are non-positive
    pub fn apply_shock(
        current: &MarketSnapshot,
        delta: &MarketDataDelta,
        original_expiry_days: i64,
    ) -> Result<ShockedMarketData, ScenarioError> {
        let shocked_expiry_days = original_expiry_days - delta.time_diff_days;
        if shocked_expiry_days <= 0 {
            return Err(ScenarioError::OptionExpired {
                original_days: original_expiry_days,
                elapsed_days: delta.time_diff_days,
            });
        }
        current.validate()?;

        let pair = current.pair;
        let pip_scale = pair.pip_scale();
        let spot = current.spot * (1.0 + delta.spot_pct_change);

        let usd_rates: BTreeMap<Tenor, f64> = current
            .usd_rates
            .keys()
            .filter_map(|tenor| {
                current
                    .usd_rate(tenor)
                    .map(|rate| (*tenor, rate + delta.rate_change(tenor)))
            })
            .collect();

        let mut forwards = BTreeMap::new();
        let mut domestic_rates = BTreeMap::new();
        let mut foreign_rates = BTreeMap::new();
        for (tenor, &pts) in &current.forward_points {
            let outright = outright_forward(&pair, current.spot, pts);
            let points = (outright - current.spot) * pip_scale;
            let shocked_points = points + points.abs() * delta.forward_points_change(tenor);
            forwards.insert(*tenor, spot + shocked_points / pip_scale);

            let Some(&usd_rate) = usd_rates.get(tenor) else {
                continue;
            };
            let t = current.time_to_maturity(tenor);
            let rates = FxRates::calculate(&pair, current.spot, pts, usd_rate, t)?;
            domestic_rates.insert(*tenor, rates.domestic_rate);
            foreign_rates.insert(*tenor, rates.foreign_rate);
        }

        let smiles: BTreeMap<Tenor, SmileQuote> = current
            .decimal_smiles()
            .into_iter()
            .map(|(tenor, quote)| (tenor, delta.vol_change(&tenor).apply(&quote)))
            .collect();
        let atm_vols = smiles.iter().map(|(tenor, q)| (*tenor, q.atm)).collect();

        let shocked = ShockedMarketData {
            pair,
            spot,
            forwards,
            domestic_rates,
            foreign_rates,
            usd_rates,
            carry_spot: current.spot,
            carry_points: current.forward_points.clone(),
            smiles,
            atm_vols,
            days: current.days.clone(),
            original_expiry_days,
            shocked_expiry_days,
            spot_pct_change: delta.spot_pct_change,
            avg_vol_change: delta.avg_vol_change(),
            avg_rate_change: delta.avg_rate_change(),
        };
        debug!(
            pair = %pair,
            spot = shocked.spot,
            original_days = original_expiry_days,
            shocked_days = shocked_expiry_days,
            "shocked market"
        );
        Ok(shocked)
    }

    /// The current market held still while time advances over the
    /// delta's window.
    pub fn hold_market(
        current: &MarketSnapshot,
        delta: &MarketDataDelta,
        original_expiry_days: i64,
    ) -> Result<ShockedMarketData, ScenarioError> {
        Self::apply_shock(current, &delta.time_only(), original_expiry_days)
    }
}
