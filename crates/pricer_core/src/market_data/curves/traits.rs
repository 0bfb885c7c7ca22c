//! Yield curve trait definition.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Discount factor and rate queries on a term structure.
///
/// # Contract
///
/// - `discount_factor(t)` returns D(t) for maturity `t >= 0`
/// - `zero_rate(t)` returns the continuously compounded zero rate
/// - `forward_rate(t1, t2)` returns the forward rate between `t1 < t2`
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{RateCurve, YieldCurve};
/// use pricer_core::types::{Currency, Tenor};
///
/// let mut curve = RateCurve::new(Currency::USD);
/// curve.add_rate("1Y".parse::<Tenor>().unwrap(), 0.05).unwrap();
///
/// let df = curve.discount_factor(1.0).unwrap();
/// assert!((df - (-0.05_f64).exp()).abs() < 1e-12);
/// assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor `D(t) = exp(-r(t)·t)`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::InvalidMaturity` if `t < 0`, plus any error from
    /// the underlying rate lookup.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Zero rate `r(t) = -ln(D(t)) / t`; requires `t > 0`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        let df = self.discount_factor(t)?;
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(-df.ln() / t)
    }

    /// Forward rate `f(t1, t2) = -ln(D(t2) / D(t1)) / (t2 - t1)`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        Ok(-(df2 / df1).ln() / dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantCurve {
        rate: f64,
    }

    impl YieldCurve<f64> for ConstantCurve {
        fn discount_factor(&self, t: f64) -> Result<f64, MarketDataError> {
            if t < 0.0 {
                return Err(MarketDataError::InvalidMaturity { t });
            }
            Ok((-self.rate * t).exp())
        }
    }

    #[test]
    fn test_default_zero_rate() {
        let curve = ConstantCurve { rate: 0.05 };
        assert!((curve.zero_rate(1.0).unwrap() - 0.05).abs() < 1e-10);
        assert_eq!(
            curve.zero_rate(0.0).unwrap_err(),
            MarketDataError::InvalidMaturity { t: 0.0 }
        );
    }

    #[test]
    fn test_default_forward_rate() {
        let curve = ConstantCurve { rate: 0.05 };
        assert!((curve.forward_rate(1.0, 2.0).unwrap() - 0.05).abs() < 1e-10);
        assert!(matches!(
            curve.forward_rate(2.0, 1.0),
            Err(MarketDataError::InvalidMaturity { .. })
        ));
    }
}
