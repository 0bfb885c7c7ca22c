//! # Pricer Models (L2: Business Logic)
//!
//! FX vanilla option pricing on top of the `pricer_core` market data.
//!
//! This crate provides:
//! - Garman-Kohlhagen prices and Greeks, generic over `T: Float`
//! - Delta-to-strike inversion through the inverse normal CDF
//! - FX option conventions (call/put, client direction, notional currency)
//! - Volatility smiles built from ATM/RR/BF quotes and a surface over tenors
//!
//! ## Design Principles
//!
//! - **Static dispatch**: generic kernels, no trait objects on the hot path
//! - **Typed errors** that map onto the `pricer_core` error taxonomy
//! - **Explicit market inputs**: no default vols or rates are assumed

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod volatility;
