//! Interpolation kernels for curves and volatility surfaces.
//!
//! ## Free functions
//!
//! One-shot helpers over sorted pillars, each taking an `extrapolate` flag
//! that chooses between boundary extrapolation and clamping:
//!
//! - [`linear_interpolate`] and [`find_bracketing_indices`]
//! - [`variance_interpolate`]: linear in total variance `σ²·t`
//! - [`cubic_spline_interpolate`]: natural cubic spline with linear fallback
//! - [`interpolate_2d`]: two-pass linear on a grid
//!
//! ## Interpolator types
//!
//! - [`LinearInterpolator`], [`CubicSplineInterpolator`]: implement [`Interpolator`]
//! - [`BilinearInterpolator`]: fixed 2D grid
//! - [`ScatteredLinearInterpolator`]: triangulated scattered points
//!
//! All 1D kernels are generic over `T: num_traits::Float`, so `f64` and
//! `num_dual::Dual64` both work.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y: f64 = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod bilinear;
mod cubic_spline;
mod linear;
mod scattered;
mod traits;
mod variance;

pub use bilinear::{interpolate_2d, BilinearInterpolator};
pub use cubic_spline::{cubic_spline_interpolate, CubicSplineInterpolator};
pub use linear::{find_bracketing_indices, linear_interpolate, LinearInterpolator};
pub use scattered::ScatteredLinearInterpolator;
pub use traits::Interpolator;
pub use variance::variance_interpolate;
