//! Instrument conventions.
//!
//! - [`fx`]: option type, trade direction and notional currency of FX vanilla options

pub mod fx;
