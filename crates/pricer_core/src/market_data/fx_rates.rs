//! Implied deposit rates and the per-expiry FX rate bundle.
//!
//! Only a USD curve is observed. The other currency's rate is implied from
//! spot and the outright forward through covered interest parity,
//! `F = S·exp((r_dom − r_for)·t)`:
//!
//! - USD quote (EURUSD): `r_for = r_usd − ln(F/S)/t`
//! - USD base (USDJPY): `r_dom = r_usd + ln(F/S)/t`

use super::curves::{ForwardCurve, RateCurve};
use super::error::MarketDataError;
use crate::types::{Currency, CurrencyPair, UsdPosition};

/// Outright forward from spot and forward points in the pair's pip scale.
///
/// ```
/// use pricer_core::market_data::outright_forward;
///
/// let eurusd = "EURUSD".parse().unwrap();
/// assert!((outright_forward(&eurusd, 1.0850, 38.0) - 1.0888).abs() < 1e-12);
/// let usdjpy = "USDJPY".parse().unwrap();
/// assert!((outright_forward(&usdjpy, 149.50, -250.0) - 147.0).abs() < 1e-12);
/// ```
pub fn outright_forward(pair: &CurrencyPair, spot: f64, forward_points: f64) -> f64 {
    spot + forward_points / pair.pip_scale()
}

/// Non-USD deposit rate implied by the USD rate, spot and outright forward.
///
/// Returns `usd_rate` unchanged for `t <= 0`.
///
/// # Errors
///
/// * `MarketDataError::NonPositiveRate` if spot or forward is not positive
/// * `MarketDataError::UnsupportedPair` for a pair without USD
pub fn implied_rate(
    pair: &CurrencyPair,
    usd_rate: f64,
    spot: f64,
    forward: f64,
    t: f64,
) -> Result<f64, MarketDataError> {
    let position = pair.usd_position();
    if position == UsdPosition::None {
        return Err(unsupported_cross(pair));
    }
    if t <= 0.0 {
        return Ok(usd_rate);
    }
    if spot <= 0.0 {
        return Err(MarketDataError::NonPositiveRate {
            name: "spot".to_string(),
            value: spot,
        });
    }
    if forward <= 0.0 {
        return Err(MarketDataError::NonPositiveRate {
            name: "forward".to_string(),
            value: forward,
        });
    }

    let carry = (forward / spot).ln() / t;
    Ok(match position {
        UsdPosition::Quote => usd_rate - carry,
        UsdPosition::Base | UsdPosition::None => usd_rate + carry,
    })
}

fn unsupported_cross(pair: &CurrencyPair) -> MarketDataError {
    MarketDataError::UnsupportedPair {
        pair: pair.code(),
        reason: "rates are implied from a USD curve; cross pairs need both legs".to_string(),
    }
}

/// Domestic, foreign and forward curves built from a full snapshot.
#[derive(Debug, Clone)]
pub struct FxCurves {
    /// Quote-currency rate curve
    pub domestic: RateCurve,
    /// Base-currency rate curve
    pub foreign: RateCurve,
    /// Outright forwards
    pub forward: ForwardCurve,
}

/// Rates for one pair at one expiry.
///
/// The domestic currency is the quote currency and the foreign currency the
/// base currency. When built from a snapshot the curves used to derive the
/// scalars are kept alongside.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::FxRates;
/// use pricer_core::types::Currency;
///
/// let pair = "EURUSD".parse().unwrap();
/// let rates = FxRates::calculate(&pair, 1.0850, 38.0, 0.0534, 0.25).unwrap();
///
/// assert_eq!(rates.domestic_currency, Currency::USD);
/// assert_eq!(rates.domestic_rate, 0.0534);
/// assert!(rates.foreign_rate < rates.domestic_rate);
/// assert!((rates.forward - 1.0888).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FxRates {
    /// Currency pair
    pub pair: CurrencyPair,
    /// Quote-currency rate (continuously compounded, decimal)
    pub domestic_rate: f64,
    /// Base-currency rate (continuously compounded, decimal)
    pub foreign_rate: f64,
    /// Outright forward
    pub forward: f64,
    /// Spot
    pub spot: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Quote currency
    pub domestic_currency: Currency,
    /// Base currency
    pub foreign_currency: Currency,
    #[cfg_attr(feature = "serde", serde(skip))]
    curves: Option<FxCurves>,
}

impl FxRates {
    /// Derives the rates at `t` from spot, forward points and the USD rate.
    ///
    /// # Errors
    ///
    /// * `MarketDataError::UnsupportedPair` for a pair without USD
    /// * `MarketDataError::NonPositiveRate` from the implied rate
    pub fn calculate(
        pair: &CurrencyPair,
        spot: f64,
        forward_points: f64,
        usd_rate: f64,
        t: f64,
    ) -> Result<Self, MarketDataError> {
        let forward = outright_forward(pair, spot, forward_points);
        let implied = implied_rate(pair, usd_rate, spot, forward, t)?;
        let (domestic_rate, foreign_rate) = match pair.usd_position() {
            UsdPosition::Quote => (usd_rate, implied),
            UsdPosition::Base => (implied, usd_rate),
            UsdPosition::None => return Err(unsupported_cross(pair)),
        };

        Ok(Self {
            pair: *pair,
            domestic_rate,
            foreign_rate,
            forward,
            spot,
            time_to_expiry: t,
            domestic_currency: pair.quote(),
            foreign_currency: pair.base(),
            curves: None,
        })
    }

    /// Attaches the curves the scalars were derived from.
    pub fn with_curves(mut self, curves: FxCurves) -> Self {
        self.curves = Some(curves);
        self
    }

    /// Curves, when built from a snapshot.
    pub fn curves(&self) -> Option<&FxCurves> {
        self.curves.as_ref()
    }

    /// `forward − spot` in the pair's pip convention.
    pub fn forward_points(&self) -> f64 {
        (self.forward - self.spot) * self.pair.pip_scale()
    }

    /// Exponential forward `S·exp((r_dom − r_for)·t)` from the implied rates.
    ///
    /// Equals [`Self::forward`] up to rounding when `t > 0`.
    pub fn parity_forward(&self) -> f64 {
        self.spot * ((self.domestic_rate - self.foreign_rate) * self.time_to_expiry).exp()
    }
}
