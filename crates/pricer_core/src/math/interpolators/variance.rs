//! Total-variance interpolation for volatility term structures.

use super::linear::{check_points, linear_interpolate};
use crate::types::InterpolationError;
use num_traits::Float;

/// Interpolates volatility through total variance `σ²·t`.
///
/// Each pillar is converted to total variance, the variance is linearly
/// interpolated (or extrapolated, per `extrapolate`) at `t`, and the result
/// is converted back with `sqrt(var / t)`. With a flat σ the output equals
/// that σ at every time.
///
/// Degenerate queries fall back to the first pillar vol: `t <= 0`, or an
/// interpolated variance that is not positive. A pillar time returns that
/// pillar's vol exactly.
///
/// # Errors
///
/// Same input validation as [`linear_interpolate`].
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::variance_interpolate;
///
/// let ts = [0.25, 1.0];
/// let vols = [0.10, 0.10];
/// let v: f64 = variance_interpolate(0.6, &ts, &vols, true).unwrap();
/// assert!((v - 0.10).abs() < 1e-12);
///
/// // Not the naive vol average: variance is linear in time.
/// let v: f64 = variance_interpolate(0.5, &[0.25, 1.0], &[0.20, 0.10], true).unwrap();
/// let expected = ((0.01 + (0.01 - 0.01) / 0.75 * 0.25) / 0.5_f64).sqrt();
/// assert!((v - expected).abs() < 1e-12);
/// ```
pub fn variance_interpolate<T: Float>(
    t: T,
    ts: &[T],
    vols: &[T],
    extrapolate: bool,
) -> Result<T, InterpolationError> {
    check_points(ts, vols)?;
    if ts.len() == 1 || t <= T::zero() {
        return Ok(vols[0]);
    }
    if let Some(i) = ts.iter().position(|&ti| ti == t) {
        return Ok(vols[i]);
    }

    let variances: Vec<T> = ts
        .iter()
        .zip(vols.iter())
        .map(|(&ti, &vi)| vi * vi * ti)
        .collect();
    let variance = linear_interpolate(t, ts, &variances, extrapolate)?;
    if variance <= T::zero() {
        return Ok(vols[0]);
    }
    Ok((variance / t).sqrt())
}
