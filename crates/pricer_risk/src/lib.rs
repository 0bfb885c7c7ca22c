//! # Pricer Risk (L3: Scenarios)
//!
//! Historical-shock analysis of FX vanilla options.
//!
//! This crate provides:
//! - Market data deltas between two dated snapshots of a pair
//! - Application of a delta to the current market, with expiry checks
//! - Strike-aware repricing under the shocked market
//! - A time-decay-only counterfactual and the resulting P&L split
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/  - MarketDataDelta,         │
//! │                ShockCalculator, ShockPnl│
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │  pricer_models (L2) / pricer_core (L1)  │
//! │  GK pricer, smiles, curves, snapshots   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_risk::scenarios::{MarketDataDelta, ScenarioError, ShockCalculator};
//!
//! let snapshot = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0850);
//! let delta = MarketDataDelta::calculate(
//!     &snapshot,
//!     &snapshot,
//!     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//! )
//! .unwrap();
//!
//! // A 2-week option does not survive a 30-day window.
//! let err = ShockCalculator::apply_shock(&snapshot, &delta, 14).unwrap_err();
//! assert!(matches!(err, ScenarioError::OptionExpired { .. }));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod scenarios;

pub use scenarios::{
    run_scenario, MarketDataDelta, Position, ScenarioError, ShockCalculator, ShockPnl,
    ShockedMarketData,
};
