//! Market data: curves, implied deposit rates and snapshots.
//!
//! # Components
//!
//! - [`curves`]: [`RateCurve`] and [`ForwardCurve`] with the [`YieldCurve`] trait
//! - [`FxRates`]: domestic/foreign rates and forward for one expiry
//! - [`MarketSnapshot`]: the per-pair input contract
//! - [`MarketDataError`]: failures with their tenor and value
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{MarketSnapshot, QuoteUnits, YieldCurve};
//!
//! let mut snapshot = MarketSnapshot::new("USDJPY".parse().unwrap(), 149.50);
//! snapshot.quote_units = QuoteUnits::Decimal;
//! snapshot.usd_rates.insert("1Y".parse().unwrap(), 0.049);
//! snapshot.forward_points.insert("1Y".parse().unwrap(), -650.0);
//!
//! let usd = snapshot.usd_curve().unwrap();
//! assert!((usd.discount_factor(1.0).unwrap() - (-0.049_f64).exp()).abs() < 1e-12);
//!
//! // USD is the base currency: the yen rate is implied.
//! let rates = snapshot.fx_rates(1.0).unwrap();
//! assert!(rates.domestic_rate < rates.foreign_rate);
//! ```

pub mod curves;
pub mod error;
mod fx_rates;
mod snapshot;

pub use curves::{ForwardCurve, RateCurve, YieldCurve};
pub use error::MarketDataError;
pub use fx_rates::{implied_rate, outright_forward, FxCurves, FxRates};
pub use snapshot::{MarketSnapshot, QuoteUnits, SmileQuote};
