//! Dual number alias for forward-mode automatic differentiation.
//!
//! The generic `T: Float` kernels (interpolators, Garman-Kohlhagen) accept
//! this type, so analytic Greeks can be cross-checked against derivatives
//! propagated through the price formula.
//!
//! ```
//! use pricer_core::types::dual::DualNumber;
//!
//! let x = DualNumber::new(2.0, 1.0);
//! let y = x * x;
//! assert_eq!(y.re, 4.0);
//! assert_eq!(y.eps, 4.0);
//! ```

/// `num_dual::Dual64`: `re` holds the value, `eps` the derivative.
pub type DualNumber = num_dual::Dual64;
