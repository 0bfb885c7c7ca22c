//! FX volatility smiles and surfaces.
//!
//! Market smiles are quoted per tenor as ATM, risk reversals and
//! butterflies at 25 and 10 delta. [`VolSmile`] turns a quote into five
//! `(strike, vol)` pillars by inverting the Garman-Kohlhagen delta, and
//! [`VolSurface`] stitches the smiles together in total variance.

mod error;
mod smile;
mod surface;

pub use error::VolSurfaceError;
pub use smile::{SmilePillar, SmileStrikes, VolSmile, VolSmileData};
pub use surface::{VolSurface, MAX_VOL, MIN_VOL};
