//! Repricing a position under a shocked market and the time-decay
//! counterfactual.

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::days_to_years;
use pricer_models::analytical::{calculate_all, OptionParams, PricingResult};
use pricer_models::instruments::fx::Direction;
use tracing::{debug, info};

use super::delta::MarketDataDelta;
use super::error::ScenarioError;
use super::shock::{ShockCalculator, ShockedMarketData};

/// Decay P&L below which the shock/decay ratio is not reported.
pub const RATIO_EPSILON: f64 = 1e-12;

/// An option position as originally priced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Trade and market inputs at inception of the scenario
    pub params: OptionParams,
    /// Client side of the trade
    pub direction: Direction,
    /// Calendar days to expiry
    pub expiry_days: i64,
    /// Pip multiplier of the pair
    pub pip_scale: f64,
}

impl Position {
    /// Premium at the original market, in notional terms.
    pub fn original_premium(&self) -> Result<f64, ScenarioError> {
        Ok(calculate_all(&self.params, self.pip_scale)?.premium)
    }

    /// Year fraction left once `elapsed_days` have passed.
    pub fn time_after(&self, elapsed_days: i64) -> f64 {
        self.params.time_to_expiry - days_to_years(elapsed_days)
    }
}

/// Market inputs used for one repricing and its result.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepricedPosition {
    /// Spot used
    pub spot: f64,
    /// Domestic rate at the shocked expiry
    pub domestic_rate: f64,
    /// Foreign rate at the shocked expiry
    pub foreign_rate: f64,
    /// Vol at the option's strike and shocked expiry
    pub volatility: f64,
    /// Shocked time to expiry in years
    pub time_to_expiry: f64,
    /// Pricing output
    pub result: PricingResult,
}

impl RepricedPosition {
    /// Premium in notional terms.
    pub fn premium(&self) -> f64 {
        self.result.premium
    }
}

/// Reprices `position` in a shocked market at the shocked expiry.
///
/// Time to expiry is the position's own, less the window. Rates are
/// resolved from the shocked market the way the position's were from the
/// current one, and the vol is read off the shocked surface at the option's
/// own strike. With no shock and no elapsed time this gives back the
/// original premium.
///
/// # Errors
///
/// Curve, surface or pricing failures, including a vol outside
/// `(0.00001, 2.0]`.
pub fn reprice_shocked(
    position: &Position,
    shocked: &ShockedMarketData,
) -> Result<RepricedPosition, ScenarioError> {
    let t = position.time_after(shocked.elapsed_days());
    let (domestic_rate, foreign_rate) = shocked.rates_at(t)?;
    let mut surface = shocked.vol_surface()?;
    let strike = position.params.strike;
    let volatility = surface.get_vol(strike, t, shocked.spot, domestic_rate, foreign_rate)?;

    let params = OptionParams {
        spot: shocked.spot,
        domestic_rate,
        foreign_rate,
        ..position.params.with_market(volatility, t)
    };
    let result = calculate_all(&params, position.pip_scale)?;
    debug!(strike, t, vol = volatility, premium = result.premium, "repriced position");
    Ok(RepricedPosition {
        spot: shocked.spot,
        domestic_rate,
        foreign_rate,
        volatility,
        time_to_expiry: t,
        result,
    })
}

/// Reprices `position` in the current, unshocked market at the expiry
/// left after the delta's window.
pub fn reprice_time_decay(
    position: &Position,
    current: &MarketSnapshot,
    delta: &MarketDataDelta,
) -> Result<RepricedPosition, ScenarioError> {
    let held = ShockCalculator::hold_market(current, delta, position.expiry_days)?;
    reprice_shocked(position, &held)
}

/// Shock P&L split into market moves and time decay, from the client's
/// side of the trade.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShockPnl {
    /// Premium at the original market
    pub original_premium: f64,
    /// Premium under the shocked market
    pub shocked_premium: f64,
    /// Premium with only time advanced
    pub decay_premium: f64,
    /// Shocked P&L
    pub shocked_pnl: f64,
    /// Time-decay P&L
    pub decay_pnl: f64,
    /// Shocked minus decay P&L
    pub market_pnl: f64,
    /// `|shocked P&L| / |decay P&L|`, absent when decay is negligible
    pub shock_to_decay_ratio: Option<f64>,
}

impl ShockPnl {
    /// Builds the report from the three premiums.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_models::instruments::fx::Direction;
    /// use pricer_risk::scenarios::ShockPnl;
    ///
    /// let pnl = ShockPnl::from_premiums(100.0, 130.0, 95.0, Direction::ClientBuys);
    /// assert_eq!(pnl.shocked_pnl, 30.0);
    /// assert_eq!(pnl.market_pnl, 35.0);
    /// assert_eq!(pnl.shock_to_decay_ratio, Some(6.0));
    ///
    /// let flat = ShockPnl::from_premiums(100.0, 100.0, 100.0, Direction::ClientSells);
    /// assert_eq!(flat.shock_to_decay_ratio, None);
    /// ```
    pub fn from_premiums(
        original_premium: f64,
        shocked_premium: f64,
        decay_premium: f64,
        direction: Direction,
    ) -> Self {
        let sign = direction.hedge_sign();
        let shocked_pnl = sign * (shocked_premium - original_premium);
        let decay_pnl = sign * (decay_premium - original_premium);
        let shock_to_decay_ratio = if decay_pnl.abs() < RATIO_EPSILON {
            None
        } else {
            Some(shocked_pnl.abs() / decay_pnl.abs())
        };
        Self {
            original_premium,
            shocked_premium,
            decay_premium,
            shocked_pnl,
            decay_pnl,
            market_pnl: shocked_pnl - decay_pnl,
            shock_to_decay_ratio,
        }
    }
}

/// Full scenario: shock, decay-only counterfactual and P&L.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioOutcome {
    /// Shocked market
    pub shocked_market: ShockedMarketData,
    /// Repricing under the shocked market
    pub shocked: RepricedPosition,
    /// Repricing with time advanced only
    pub decay: RepricedPosition,
    /// P&L report
    pub pnl: ShockPnl,
}

/// Applies `delta` to `current` and reprices `position` both ways.
///
/// # Errors
///
/// `ScenarioError::OptionExpired` when the window outlives the option,
/// otherwise any repricing failure.
pub fn run_scenario(
    position: &Position,
    current: &MarketSnapshot,
    delta: &MarketDataDelta,
) -> Result<ScenarioOutcome, ScenarioError> {
    let original_premium = position.original_premium()?;
    let shocked_market = ShockCalculator::apply_shock(current, delta, position.expiry_days)?;
    let shocked = reprice_shocked(position, &shocked_market)?;
    let decay = reprice_time_decay(position, current, delta)?;
    let pnl = ShockPnl::from_premiums(
        original_premium,
        shocked.premium(),
        decay.premium(),
        position.direction,
    );
    info!(
        shocked_pnl = pnl.shocked_pnl,
        decay_pnl = pnl.decay_pnl,
        market_pnl = pnl.market_pnl,
        "scenario complete"
    );
    Ok(ScenarioOutcome {
        shocked_market,
        shocked,
        decay,
        pnl,
    })
}
