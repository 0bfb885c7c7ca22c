//! Analytical pricing formulas for European FX options.
//!
//! This module provides:
//! - Standard normal CDF, PDF and inverse CDF
//! - Garman-Kohlhagen prices and Greeks (Delta, Gamma, Vega, Theta, both Rhos)
//! - Delta-to-strike inversion used by the volatility smile
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the kernels run on `f64` and on `Dual64`
//! - **Expiry conventions**: intrinsic price and indicator delta at `t <= 0`

pub mod distributions;
pub mod error;
pub mod garman_kohlhagen;

pub use distributions::{norm_cdf, norm_inv_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use garman_kohlhagen::{
    calculate_all, d1_d2, delta_hedge, forward, strike_from_delta, GarmanKohlhagen,
    GarmanKohlhagenParams, Greeks, OptionParams, PricingResult,
};
