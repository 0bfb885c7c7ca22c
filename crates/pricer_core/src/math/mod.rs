//! Numerical building blocks shared by the curve and surface code.

pub mod interpolators;
