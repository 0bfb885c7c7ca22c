//! Garman-Kohlhagen model for FX option pricing.
//!
//! The Garman-Kohlhagen closed form prices European FX options by treating
//! the foreign interest rate as a continuous dividend yield.
//!
//! # Mathematical Background
//!
//! - S: spot exchange rate (domestic per foreign)
//! - K: strike price
//! - rd: domestic risk-free rate (continuous compounding)
//! - rf: foreign risk-free rate (continuous compounding)
//! - σ: volatility of the exchange rate
//! - T: time to maturity in years
//!
//! ## Call Option Price
//! C = S * e^(-rf*T) * N(d1) - K * e^(-rd*T) * N(d2)
//!
//! ## Put Option Price
//! P = K * e^(-rd*T) * N(-d2) - S * e^(-rf*T) * N(-d1)
//!
//! where:
//! d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
//! d2 = d1 - σ * √T
//!
//! Prices are per unit of foreign notional, in domestic currency. At
//! `T <= 0` the price is intrinsic and the Greeks collapse to their expiry
//! values.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::garman_kohlhagen::{
//!     GarmanKohlhagen, GarmanKohlhagenParams,
//! };
//! use pricer_models::instruments::fx::FxOptionType;
//!
//! let params = GarmanKohlhagenParams::new(
//!     1.10,   // spot
//!     1.12,   // strike
//!     0.03,   // domestic rate (3%)
//!     0.01,   // foreign rate (1%)
//!     0.15,   // volatility (15%)
//!     1.0,    // expiry (1 year)
//! ).unwrap();
//!
//! let model = GarmanKohlhagen::new(params);
//! let call_price = model.price(FxOptionType::Call);
//! let put_price = model.price(FxOptionType::Put);
//!
//! // Put-call parity check
//! let parity_diff = call_price - put_price
//!     - (1.10 * (-0.01_f64).exp() - 1.12 * (-0.03_f64).exp());
//! assert!(parity_diff.abs() < 1e-10);
//! ```

use num_traits::Float;

use super::distributions::{cst, norm_cdf, norm_inv_cdf, norm_pdf};
use super::error::AnalyticalError;
use crate::instruments::fx::{Direction, FxOptionType, NotionalCurrency};

/// `(d1, d2)`; both zero when `t <= 0` or `vol <= 0`.
#[inline]
pub fn d1_d2<T: Float>(spot: T, strike: T, rate_domestic: T, rate_foreign: T, vol: T, t: T) -> (T, T) {
    if t <= T::zero() || vol <= T::zero() {
        return (T::zero(), T::zero());
    }
    let sqrt_t = t.sqrt();
    let d1 = ((spot / strike).ln() + (rate_domestic - rate_foreign + cst::<T>(0.5) * vol * vol) * t)
        / (vol * sqrt_t);
    (d1, d1 - vol * sqrt_t)
}

/// Outright forward by interest rate parity, `S·exp((rd − rf)·t)`.
#[inline]
pub fn forward<T: Float>(spot: T, rate_domestic: T, rate_foreign: T, t: T) -> T {
    spot * ((rate_domestic - rate_foreign) * t).exp()
}

/// Parameters for the Garman-Kohlhagen model.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual64`)
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagenParams<T: Float> {
    /// Spot exchange rate (domestic per foreign).
    pub spot: T,
    /// Strike price.
    pub strike: T,
    /// Domestic risk-free rate (continuous compounding).
    pub rate_domestic: T,
    /// Foreign risk-free rate (continuous compounding).
    pub rate_foreign: T,
    /// Volatility of the exchange rate.
    pub volatility: T,
    /// Time to expiry in years; `<= 0` means expired.
    pub expiry: T,
}

impl<T: Float> GarmanKohlhagenParams<T> {
    /// Creates new Garman-Kohlhagen parameters.
    ///
    /// Rates may be negative. A zero volatility or non-positive expiry is
    /// accepted and handled by the expiry conventions of the kernel.
    ///
    /// # Errors
    ///
    /// * `AnalyticalError::InvalidSpot` / `InvalidStrike` for non-positive values
    /// * `AnalyticalError::InvalidVolatility` for a negative or non-finite volatility
    pub fn new(
        spot: T,
        strike: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !(strike > T::zero()) {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !volatility.is_finite() || volatility < T::zero() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self {
            spot,
            strike,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    /// Forward rate `S·exp((rd − rf)·T)`.
    #[inline]
    pub fn forward(&self) -> T {
        forward(self.spot, self.rate_domestic, self.rate_foreign, self.expiry)
    }
}

/// Garman-Kohlhagen pricer with d1, d2 and discount factors precomputed.
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagen<T: Float> {
    params: GarmanKohlhagenParams<T>,
    d1: T,
    d2: T,
    sqrt_t: T,
    df_domestic: T,
    df_foreign: T,
}

impl<T: Float> GarmanKohlhagen<T> {
    /// Creates a pricer for the given parameters.
    pub fn new(params: GarmanKohlhagenParams<T>) -> Self {
        let (d1, d2) = d1_d2(
            params.spot,
            params.strike,
            params.rate_domestic,
            params.rate_foreign,
            params.volatility,
            params.expiry,
        );
        let t = params.expiry.max(T::zero());
        Self {
            params,
            d1,
            d2,
            sqrt_t: t.sqrt(),
            df_domestic: (-params.rate_domestic * t).exp(),
            df_foreign: (-params.rate_foreign * t).exp(),
        }
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &GarmanKohlhagenParams<T> {
        &self.params
    }

    /// d1 term.
    #[inline]
    pub fn d1(&self) -> T {
        self.d1
    }

    /// d2 term.
    #[inline]
    pub fn d2(&self) -> T {
        self.d2
    }

    /// True when the time to expiry is not positive.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.params.expiry <= T::zero()
    }

    fn is_degenerate(&self) -> bool {
        self.is_expired() || self.params.volatility <= T::zero()
    }

    /// Forward rate.
    #[inline]
    pub fn forward(&self) -> T {
        self.params.forward()
    }

    /// Premium per unit of foreign notional.
    pub fn price(&self, option_type: FxOptionType) -> T {
        let p = &self.params;
        if self.is_expired() {
            return option_type.intrinsic(p.spot, p.strike);
        }
        let nd1 = norm_cdf(self.d1);
        let nd2 = norm_cdf(self.d2);
        match option_type {
            FxOptionType::Call => p.spot * self.df_foreign * nd1 - p.strike * self.df_domestic * nd2,
            FxOptionType::Put => {
                p.strike * self.df_domestic * (T::one() - nd2)
                    - p.spot * self.df_foreign * (T::one() - nd1)
            }
        }
    }

    /// Spot delta.
    ///
    /// At expiry: call 1 if S > K else 0; put −1 if S < K else 0.
    pub fn delta(&self, option_type: FxOptionType) -> T {
        let p = &self.params;
        if self.is_expired() {
            return match option_type {
                FxOptionType::Call if p.spot > p.strike => T::one(),
                FxOptionType::Put if p.spot < p.strike => -T::one(),
                _ => T::zero(),
            };
        }
        let nd1 = norm_cdf(self.d1);
        match option_type {
            FxOptionType::Call => self.df_foreign * nd1,
            FxOptionType::Put => self.df_foreign * (nd1 - T::one()),
        }
    }

    /// Gamma, identical for calls and puts.
    pub fn gamma(&self) -> T {
        if self.is_degenerate() {
            return T::zero();
        }
        let p = &self.params;
        self.df_foreign * norm_pdf(self.d1) / (p.spot * p.volatility * self.sqrt_t)
    }

    /// Vega per 1% (0.01) volatility move.
    pub fn vega(&self) -> T {
        if self.is_expired() {
            return T::zero();
        }
        self.params.spot * self.df_foreign * norm_pdf(self.d1) * self.sqrt_t * cst::<T>(0.01)
    }

    /// Theta per calendar day (annual theta / 365).
    pub fn theta(&self, option_type: FxOptionType) -> T {
        if self.is_expired() {
            return T::zero();
        }
        let p = &self.params;
        let nd1 = norm_cdf(self.d1);
        let nd2 = norm_cdf(self.d2);
        let term1 = -(p.spot * self.df_foreign * norm_pdf(self.d1) * p.volatility)
            / (cst::<T>(2.0) * self.sqrt_t);
        let annual = match option_type {
            FxOptionType::Call => {
                term1 + p.rate_foreign * p.spot * self.df_foreign * nd1
                    - p.rate_domestic * p.strike * self.df_domestic * nd2
            }
            FxOptionType::Put => {
                term1 - p.rate_foreign * p.spot * self.df_foreign * (T::one() - nd1)
                    + p.rate_domestic * p.strike * self.df_domestic * (T::one() - nd2)
            }
        };
        annual / cst::<T>(365.0)
    }

    /// Domestic rho per 1% rate move.
    pub fn rho_domestic(&self, option_type: FxOptionType) -> T {
        if self.is_expired() {
            return T::zero();
        }
        let p = &self.params;
        let nd2 = norm_cdf(self.d2);
        let scale = p.strike * p.expiry * self.df_domestic * cst::<T>(0.01);
        match option_type {
            FxOptionType::Call => scale * nd2,
            FxOptionType::Put => -scale * (T::one() - nd2),
        }
    }

    /// Foreign rho per 1% rate move.
    pub fn rho_foreign(&self, option_type: FxOptionType) -> T {
        if self.is_expired() {
            return T::zero();
        }
        let p = &self.params;
        let nd1 = norm_cdf(self.d1);
        let scale = p.spot * p.expiry * self.df_foreign * cst::<T>(0.01);
        match option_type {
            FxOptionType::Call => -scale * nd1,
            FxOptionType::Put => scale * (T::one() - nd1),
        }
    }

    /// Every Greek at once.
    pub fn greeks(&self, option_type: FxOptionType) -> Greeks<T> {
        Greeks {
            delta: self.delta(option_type),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(option_type),
            rho_domestic: self.rho_domestic(option_type),
            rho_foreign: self.rho_foreign(option_type),
        }
    }
}

/// Strike whose spot delta equals `delta` at volatility `vol`.
///
/// `delta` is signed: positive for calls (0.25), negative for puts (−0.25).
/// Returns `spot` when `t <= 0`.
///
/// # Errors
///
/// `AnalyticalError::ProbabilityOutOfDomain` when the delta, undone by the
/// foreign discount factor, is not a probability in (0, 1).
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::garman_kohlhagen::{
///     strike_from_delta, GarmanKohlhagen, GarmanKohlhagenParams,
/// };
/// use pricer_models::instruments::fx::FxOptionType;
///
/// let k = strike_from_delta(1.0850, 0.25, 0.053, 0.03, 0.08, 0.25, FxOptionType::Call).unwrap();
/// let params = GarmanKohlhagenParams::new(1.0850, k, 0.053, 0.03, 0.08, 0.25).unwrap();
/// let delta = GarmanKohlhagen::new(params).delta(FxOptionType::Call);
/// assert!((delta - 0.25).abs() < 1e-9);
/// ```
pub fn strike_from_delta(
    spot: f64,
    delta: f64,
    rate_domestic: f64,
    rate_foreign: f64,
    vol: f64,
    t: f64,
    option_type: FxOptionType,
) -> Result<f64, AnalyticalError> {
    if t <= 0.0 {
        return Ok(spot);
    }
    let df_foreign = (-rate_foreign * t).exp();
    let probability = match option_type {
        FxOptionType::Call => delta / df_foreign,
        FxOptionType::Put => delta / df_foreign + 1.0,
    };
    let d1 = norm_inv_cdf(probability)?;
    let ln_s_over_k = d1 * vol * t.sqrt() - (rate_domestic - rate_foreign + 0.5 * vol * vol) * t;
    Ok(spot * (-ln_s_over_k).exp())
}

/// Option Greeks.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T = f64> {
    /// Spot delta
    pub delta: T,
    /// Gamma
    pub gamma: T,
    /// Vega per 1% vol
    pub vega: T,
    /// Theta per calendar day
    pub theta: T,
    /// Domestic rho per 1% rate
    pub rho_domestic: T,
    /// Foreign rho per 1% rate
    pub rho_foreign: T,
}

/// Inputs for pricing one FX vanilla option.
///
/// Rates and volatility are decimals. The notional is in the currency named
/// by `notional_currency`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParams {
    /// Spot rate
    pub spot: f64,
    /// Strike
    pub strike: f64,
    /// Domestic (quote currency) rate
    pub domestic_rate: f64,
    /// Foreign (base currency) rate
    pub foreign_rate: f64,
    /// Implied volatility
    pub volatility: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Call or put
    pub option_type: FxOptionType,
    /// Notional amount
    pub notional: f64,
    /// Currency of the notional
    pub notional_currency: NotionalCurrency,
}

impl OptionParams {
    /// Validated parameters.
    ///
    /// # Errors
    ///
    /// See [`OptionParams::validate`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        volatility: f64,
        time_to_expiry: f64,
        option_type: FxOptionType,
        notional: f64,
        notional_currency: NotionalCurrency,
    ) -> Result<Self, AnalyticalError> {
        let params = Self {
            spot,
            strike,
            domestic_rate,
            foreign_rate,
            volatility,
            time_to_expiry,
            option_type,
            notional,
            notional_currency,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks spot, strike, volatility and notional.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        if !(self.notional > 0.0) || !self.notional.is_finite() {
            return Err(AnalyticalError::InvalidNotional {
                notional: self.notional,
            });
        }
        self.kernel_params().map(|_| ())
    }

    /// Same trade with a different volatility and time to expiry.
    pub fn with_market(&self, volatility: f64, time_to_expiry: f64) -> Self {
        Self {
            volatility,
            time_to_expiry,
            ..*self
        }
    }

    fn kernel_params(&self) -> Result<GarmanKohlhagenParams<f64>, AnalyticalError> {
        GarmanKohlhagenParams::new(
            self.spot,
            self.strike,
            self.domestic_rate,
            self.foreign_rate,
            self.volatility,
            self.time_to_expiry,
        )
    }

    /// Pricer for these parameters.
    pub fn model(&self) -> Result<GarmanKohlhagen<f64>, AnalyticalError> {
        Ok(GarmanKohlhagen::new(self.kernel_params()?))
    }

    /// Premium per unit of foreign notional.
    pub fn unit_premium(&self) -> Result<f64, AnalyticalError> {
        Ok(self.model()?.price(self.option_type))
    }
}

/// Full pricing output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Premium for the whole notional, in notional terms
    pub premium: f64,
    /// Premium as a percentage (of foreign notional, or per domestic unit)
    pub premium_pct: f64,
    /// Unit premium in pips of the pair
    pub premium_pips: f64,
    /// Outright forward
    pub forward: f64,
    /// Greeks per unit of foreign notional
    pub greeks: Greeks,
    /// d1 term
    pub d1: f64,
    /// d2 term
    pub d2: f64,
}

/// Prices an option and computes every Greek.
///
/// - foreign notional: `premium = unit·N`, `premium_pct = unit/S·100`
/// - domestic notional: `premium = unit·N/S`, `premium_pct = unit·100`
///
/// `premium_pips` is the unit premium times `pip_scale` (10000, or 100 for
/// yen-quoted pairs).
///
/// # Errors
///
/// Any [`OptionParams::validate`] failure.
pub fn calculate_all(params: &OptionParams, pip_scale: f64) -> Result<PricingResult, AnalyticalError> {
    params.validate()?;
    let model = params.model()?;
    let unit = model.price(params.option_type);
    let (premium, premium_pct) = match params.notional_currency {
        NotionalCurrency::For => (unit * params.notional, unit / params.spot * 100.0),
        NotionalCurrency::Dom => (unit * params.notional / params.spot, unit * 100.0),
    };
    Ok(PricingResult {
        premium,
        premium_pct,
        premium_pips: unit * pip_scale,
        forward: model.forward(),
        greeks: model.greeks(params.option_type),
        d1: model.d1(),
        d2: model.d2(),
    })
}

/// Delta hedge amount in foreign currency, signed by trade direction.
///
/// A domestic notional is first converted at spot.
///
/// # Errors
///
/// Any [`OptionParams::validate`] failure.
pub fn delta_hedge(params: &OptionParams, direction: Direction) -> Result<f64, AnalyticalError> {
    params.validate()?;
    let delta = params.model()?.delta(params.option_type);
    let foreign_notional = match params.notional_currency {
        NotionalCurrency::For => params.notional,
        NotionalCurrency::Dom => params.notional / params.spot,
    };
    Ok(delta * foreign_notional * direction.hedge_sign())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn create_test_params() -> GarmanKohlhagenParams<f64> {
        GarmanKohlhagenParams::new(
            1.10, // spot
            1.12, // strike
            0.03, // domestic rate
            0.01, // foreign rate
            0.15, // volatility
            1.0,  // expiry
        )
        .unwrap()
    }

    fn option(option_type: FxOptionType, notional_currency: NotionalCurrency) -> OptionParams {
        OptionParams::new(
            1.0850, 1.0950, 0.053, 0.03, 0.08, 0.25, option_type, 1_000_000.0, notional_currency,
        )
        .unwrap()
    }

    #[test]
    fn test_params_invalid_inputs() {
        assert!(matches!(
            GarmanKohlhagenParams::new(0.0, 1.12, 0.03, 0.01, 0.15, 1.0),
            Err(AnalyticalError::InvalidSpot { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.10, -1.0, 0.03, 0.01, 0.15, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
        assert!(matches!(
            GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, -0.15, 1.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_d1_d2_degenerate_inputs() {
        assert_eq!(d1_d2(1.1_f64, 1.0, 0.03, 0.01, 0.15, 0.0), (0.0, 0.0));
        assert_eq!(d1_d2(1.1_f64, 1.0, 0.03, 0.01, 0.0, 1.0), (0.0, 0.0));
        let (d1, d2) = d1_d2(1.1_f64, 1.0, 0.03, 0.01, 0.15, 1.0);
        assert_relative_eq!(d1 - d2, 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate() {
        let params = create_test_params();
        assert_relative_eq!(params.forward(), 1.10 * 0.02_f64.exp(), epsilon = 1e-12);
        assert_eq!(forward(1.10_f64, 0.03, 0.01, 0.0), 1.10);
    }

    #[test]
    fn test_put_call_parity() {
        let params = create_test_params();
        let model = GarmanKohlhagen::new(params);
        let call = model.price(FxOptionType::Call);
        let put = model.price(FxOptionType::Put);
        let forward_diff = 1.10 * (-0.01_f64).exp() - 1.12 * (-0.03_f64).exp();
        assert!((call - put - forward_diff).abs() < 1e-10);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let params = GarmanKohlhagenParams::new(1.10, 1.05, 0.03, 0.01, 0.15, 0.0).unwrap();
        let model = GarmanKohlhagen::new(params);
        assert_relative_eq!(model.price(FxOptionType::Call), 0.05, epsilon = 1e-12);
        assert_eq!(model.price(FxOptionType::Put), 0.0);
        assert_eq!(model.delta(FxOptionType::Call), 1.0);
        assert_eq!(model.delta(FxOptionType::Put), 0.0);
        assert_eq!(model.gamma(), 0.0);
        assert_eq!(model.vega(), 0.0);
        assert_eq!(model.theta(FxOptionType::Call), 0.0);
        assert_eq!(model.rho_domestic(FxOptionType::Put), 0.0);

        let params = GarmanKohlhagenParams::new(1.00, 1.05, 0.03, 0.01, 0.15, -0.1).unwrap();
        let model = GarmanKohlhagen::new(params);
        assert_eq!(model.delta(FxOptionType::Put), -1.0);
        assert_eq!(model.delta(FxOptionType::Call), 0.0);
    }

    #[test]
    fn test_delta_bounds() {
        let model = GarmanKohlhagen::new(create_test_params());
        let df_foreign = (-0.01_f64).exp();
        let call = model.delta(FxOptionType::Call);
        let put = model.delta(FxOptionType::Put);
        assert!(call > 0.0 && call < df_foreign);
        assert!(put < 0.0 && put > -df_foreign);
        assert_relative_eq!(call - put, df_foreign, epsilon = 1e-12);
    }

    #[test]
    fn test_gamma_vega_match_finite_differences() {
        let h = 1e-5;
        let bump = |spot: f64, vol: f64| {
            let p = GarmanKohlhagenParams::new(spot, 1.12, 0.03, 0.01, vol, 1.0).unwrap();
            GarmanKohlhagen::new(p)
        };
        let model = bump(1.10, 0.15);
        let fd_gamma = (bump(1.10 + h, 0.15).delta(FxOptionType::Call)
            - bump(1.10 - h, 0.15).delta(FxOptionType::Call))
            / (2.0 * h);
        assert_relative_eq!(model.gamma(), fd_gamma, max_relative = 1e-4);

        let fd_vega = (bump(1.10, 0.15 + h).price(FxOptionType::Put)
            - bump(1.10, 0.15 - h).price(FxOptionType::Put))
            / (2.0 * h)
            * 0.01;
        assert_relative_eq!(model.vega(), fd_vega, max_relative = 1e-4);
    }

    #[test]
    fn test_rhos_match_finite_differences() {
        let h = 1e-6;
        let price = |rd: f64, rf: f64| {
            let p = GarmanKohlhagenParams::new(1.10, 1.12, rd, rf, 0.15, 1.0).unwrap();
            GarmanKohlhagen::new(p).price(FxOptionType::Call)
        };
        let model = GarmanKohlhagen::new(create_test_params());
        let fd_rd = (price(0.03 + h, 0.01) - price(0.03 - h, 0.01)) / (2.0 * h) * 0.01;
        let fd_rf = (price(0.03, 0.01 + h) - price(0.03, 0.01 - h)) / (2.0 * h) * 0.01;
        assert_relative_eq!(model.rho_domestic(FxOptionType::Call), fd_rd, max_relative = 1e-4);
        assert_relative_eq!(model.rho_foreign(FxOptionType::Call), fd_rf, max_relative = 1e-4);
    }

    #[test]
    fn test_theta_is_daily_time_decay() {
        let price_at = |t: f64| {
            let p = GarmanKohlhagenParams::new(1.10, 1.12, 0.03, 0.01, 0.15, t).unwrap();
            GarmanKohlhagen::new(p).price(FxOptionType::Call)
        };
        let model = GarmanKohlhagen::new(create_test_params());
        let one_day = 1.0 / 365.0;
        let fd = (price_at(1.0 - one_day) - price_at(1.0 + one_day)) / 2.0;
        assert_relative_eq!(model.theta(FxOptionType::Call), fd, max_relative = 1e-3);
        assert!(model.theta(FxOptionType::Call) < 0.0);
    }

    #[test]
    fn test_strike_from_delta_round_trip() {
        for (delta, option_type) in [
            (0.25, FxOptionType::Call),
            (0.10, FxOptionType::Call),
            (-0.25, FxOptionType::Put),
            (-0.10, FxOptionType::Put),
        ] {
            let k = strike_from_delta(1.0850, delta, 0.053, 0.03, 0.09, 0.5, option_type).unwrap();
            let p = GarmanKohlhagenParams::new(1.0850, k, 0.053, 0.03, 0.09, 0.5).unwrap();
            assert_relative_eq!(GarmanKohlhagen::new(p).delta(option_type), delta, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_strike_from_delta_ordering_and_errors() {
        let k25c = strike_from_delta(1.0850, 0.25, 0.053, 0.03, 0.08, 0.25, FxOptionType::Call).unwrap();
        let k25p = strike_from_delta(1.0850, -0.25, 0.053, 0.03, 0.08, 0.25, FxOptionType::Put).unwrap();
        assert!(k25p < 1.0850 && 1.0850 < k25c);
        assert_eq!(
            strike_from_delta(1.0850, 0.25, 0.053, 0.03, 0.08, 0.0, FxOptionType::Call).unwrap(),
            1.0850
        );
        assert!(matches!(
            strike_from_delta(1.0850, 1.2, 0.053, 0.03, 0.08, 0.25, FxOptionType::Call),
            Err(AnalyticalError::ProbabilityOutOfDomain { .. })
        ));
        assert!(matches!(
            strike_from_delta(1.0850, 0.25, 0.053, 0.03, 0.08, 0.25, FxOptionType::Put),
            Err(AnalyticalError::ProbabilityOutOfDomain { .. })
        ));
    }

    #[test]
    fn test_calculate_all_notional_conventions() {
        let foreign = calculate_all(&option(FxOptionType::Call, NotionalCurrency::For), 10_000.0).unwrap();
        let domestic = calculate_all(&option(FxOptionType::Call, NotionalCurrency::Dom), 10_000.0).unwrap();
        let unit = foreign.premium / 1_000_000.0;

        assert_relative_eq!(foreign.premium_pct, unit / 1.0850 * 100.0, epsilon = 1e-12);
        assert_relative_eq!(domestic.premium, unit * 1_000_000.0 / 1.0850, epsilon = 1e-6);
        assert_relative_eq!(domestic.premium_pct, unit * 100.0, epsilon = 1e-12);
        assert_relative_eq!(foreign.premium_pips, unit * 10_000.0, epsilon = 1e-9);
        assert_eq!(foreign.greeks, domestic.greeks);
    }

    #[test]
    fn test_calculate_all_jpy_pip_scale() {
        let params = OptionParams::new(
            149.50, 150.0, 0.005, 0.053, 0.10, 0.5, FxOptionType::Put, 1_000_000.0,
            NotionalCurrency::For,
        )
        .unwrap();
        let result = calculate_all(&params, 100.0).unwrap();
        let unit = params.unit_premium().unwrap();
        assert_relative_eq!(result.premium_pips, unit * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_delta_hedge_signs() {
        let call = option(FxOptionType::Call, NotionalCurrency::For);
        let delta = call.model().unwrap().delta(FxOptionType::Call);
        assert_relative_eq!(
            delta_hedge(&call, Direction::ClientBuys).unwrap(),
            delta * 1_000_000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            delta_hedge(&call, Direction::ClientSells).unwrap(),
            -delta * 1_000_000.0,
            epsilon = 1e-6
        );
        let dom = option(FxOptionType::Call, NotionalCurrency::Dom);
        assert_relative_eq!(
            delta_hedge(&dom, Direction::ClientBuys).unwrap(),
            delta * 1_000_000.0 / 1.0850,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_option_params_rejects_bad_notional() {
        let err = OptionParams::new(
            1.0850, 1.09, 0.05, 0.03, 0.08, 0.25, FxOptionType::Call, 0.0, NotionalCurrency::For,
        )
        .unwrap_err();
        assert_eq!(err, AnalyticalError::InvalidNotional { notional: 0.0 });
    }

    #[test]
    fn test_with_market_keeps_trade() {
        let original = option(FxOptionType::Put, NotionalCurrency::For);
        let shifted = original.with_market(0.1, 0.2);
        assert_eq!(shifted.strike, original.strike);
        assert_eq!(shifted.option_type, FxOptionType::Put);
        assert_eq!(shifted.volatility, 0.1);
        assert_eq!(shifted.time_to_expiry, 0.2);
    }
}
