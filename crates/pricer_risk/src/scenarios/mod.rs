//! Historical shock scenarios.
//!
//! ## Flow
//!
//! ```text
//! start snapshot ─┐
//!                 ├─ MarketDataDelta ─┐
//! end snapshot ───┘                   ├─ ShockCalculator ─ ShockedMarketData ─ reprice_shocked ─┐
//! current snapshot ───────────────────┘                                                         ├─ ShockPnl
//!                  └──────────────── hold_market (time only) ─── reprice_time_decay ────────────┘
//! ```

mod delta;
mod error;
mod reprice;
mod shock;

pub use delta::{MarketDataDelta, VolDiff, MIN_SHOCKED_ATM};
pub use error::ScenarioError;
pub use reprice::{
    reprice_shocked, reprice_time_decay, run_scenario, Position, RepricedPosition,
    ScenarioOutcome, ShockPnl, RATIO_EPSILON,
};
pub use shock::{ShockCalculator, ShockedMarketData};
