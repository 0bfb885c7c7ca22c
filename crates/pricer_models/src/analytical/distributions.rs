//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//! - `norm_inv_cdf`: Inverse CDF, used to turn delta quotes into strikes
//!
//! `norm_cdf` and `norm_pdf` are generic over `T: Float` so the pricing
//! kernels can run on `Dual64` for automatic differentiation.

use num_traits::Float;

use super::error::AnalyticalError;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Converts an `f64` constant into `T`.
#[inline]
pub(crate) fn cst<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function approximation using Horner's method.
///
/// Uses the Abramowitz and Stegun approximation (formula 7.1.26) which provides
/// maximum error of 1.5e-7 for all x.
///
/// # Mathematical Definition
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    // Abramowitz and Stegun constants (7.1.26)
    let a1 = cst::<T>(0.254829592);
    let a2 = cst::<T>(-0.284496736);
    let a3 = cst::<T>(1.421413741);
    let a4 = cst::<T>(-1.453152027);
    let a5 = cst::<T>(1.061405429);
    let p = cst::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        cst::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) as `0.5 · erfc(−x/√2)`.
///
/// # Accuracy
/// Absolute error below 1.5e-7 for all finite x.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    cst::<T>(0.5) * erfc_approx(-x / cst::<T>(SQRT_2))
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    cst::<T>(FRAC_1_SQRT_2PI) * (cst::<T>(-0.5) * x * x).exp()
}

// Acklam's rational approximation coefficients.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];
const P_LOW: f64 = 0.024_25;
const P_HIGH: f64 = 1.0 - P_LOW;

fn acklam(p: f64) -> f64 {
    let tail = |q: f64| {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };
    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Inverse of [`norm_cdf`].
///
/// Acklam's rational approximation followed by one Halley step against
/// [`norm_cdf`], so that `norm_cdf(norm_inv_cdf(p))` reproduces `p` to
/// well below the CDF's own approximation error.
///
/// # Errors
///
/// `AnalyticalError::ProbabilityOutOfDomain` unless `0 < p < 1`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::{norm_cdf, norm_inv_cdf};
///
/// let x = norm_inv_cdf(0.25).unwrap();
/// assert!((norm_cdf(x) - 0.25).abs() < 1e-12);
/// assert!(norm_inv_cdf(1.0).is_err());
/// ```
pub fn norm_inv_cdf(p: f64) -> Result<f64, AnalyticalError> {
    if !(p > 0.0 && p < 1.0) {
        return Err(AnalyticalError::ProbabilityOutOfDomain { probability: p });
    }
    let x = acklam(p);
    let e = norm_cdf(x) - p;
    let u = e / norm_pdf(x);
    Ok(x - u / (1.0 + 0.5 * x * u))
}
