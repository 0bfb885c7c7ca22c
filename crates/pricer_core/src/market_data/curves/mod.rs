//! Interest rate and forward curves.
//!
//! - [`YieldCurve`]: discount factor, zero rate and forward rate queries
//! - [`RateCurve`]: tenor-keyed rates for one currency
//! - [`ForwardCurve`]: tenor-keyed outright forwards for one pair
//!
//! Both curves move through the same states as pillars are added: empty
//! (queries fail), flat with one pillar, linear with two, natural cubic
//! spline with three or more. Outside the pillar range values are clamped.

mod forward;
mod pillars;
mod rate;
mod traits;

pub use forward::ForwardCurve;
pub use rate::RateCurve;
pub use traits::YieldCurve;

pub(crate) use rate::pillar_time;
