//! # pricer_core: Foundation types and market data for FX option pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Currency, currency pair, tenor and ACT/365 time types (`types`)
//! - Structured errors and the error taxonomy (`types::error`)
//! - Interpolation kernels: linear, total variance, cubic spline, 2D and
//!   scattered (`math::interpolators`)
//! - Rate and forward curves, implied deposit rates, market snapshots
//!   (`market_data`)
//!
//! ## Dependencies
//!
//! Layer 1 has no dependencies on other pricer_* crates:
//! - num-traits: generic numerical kernels over `T: Float`
//! - num-dual: dual numbers for derivative checks (optional)
//! - chrono: dates
//! - thiserror: error derives
//! - serde: serialisation (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::interpolators::variance_interpolate;
//! use pricer_core::types::{CurrencyPair, Tenor};
//!
//! let pair: CurrencyPair = "USD/JPY".parse().unwrap();
//! assert_eq!(pair.pip_scale(), 100.0);
//!
//! let tenor: Tenor = "6M".parse().unwrap();
//! assert_eq!(tenor.years(), 0.5);
//!
//! let vol: f64 = variance_interpolate(0.5, &[0.25, 1.0], &[0.08, 0.08], true).unwrap();
//! assert!((vol - 0.08).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): `types::dual::DualNumber` and dual-number tests
//! - `serde` (default): serialisation for types, snapshots and errors' categories

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
