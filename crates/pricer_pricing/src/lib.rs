//! # Pricer Pricing (L4: Orchestration)
//!
//! Turns pricing requests into priced trades, premium quotes and shock
//! reports against market snapshots from a pluggable provider.
//!
//! This crate provides:
//! - Requests with strike conventions (ATMF, ATMS, absolute, delta) and
//!   expiries given as tenors, dates or day counts
//! - Snapshot providers: a mock fixture and a JSON file store
//! - A market context resolving each request to rates, strike and vol
//! - Sessions pricing trades, replaying historical shocks and listing surfaces
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L4)           │
//! ├─────────────────────────────────────────┤
//! │  request/   - PricingRequest, StrikeSpec│
//! │  provider/  - Mock, JSON file           │
//! │  context    - MarketContext             │
//! │  session    - PricingSession            │
//! │  report     - PriceReport, ShockReport  │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │  pricer_risk (L3)                       │
//! │  pricer_models (L2) / pricer_core (L1)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_pricing::{
//!     Expiry, MockSnapshotProvider, PriceFormat, PremiumCurrency, PricingRequest,
//!     PricingSession, StrikeSpec,
//! };
//!
//! let session = PricingSession::new(MockSnapshotProvider::new());
//! let request = PricingRequest::new("EURUSD".parse().unwrap(), "3M".parse().unwrap())
//!     .with_strike(StrikeSpec::parse("25DC").unwrap());
//!
//! let report = session.price(&request).unwrap();
//! let quote = report.premium_quote(PriceFormat::Pips, PremiumCurrency::Domestic);
//! assert!(report.strike > report.forward);
//! assert!(quote.price > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod context;
pub mod error;
pub mod provider;
pub mod report;
pub mod request;
pub mod session;

pub use context::{price_resolved, MarketContext, ResolvedTrade};
pub use error::{PricingSessionError, ProviderError};
pub use provider::{JsonFileProvider, MarketSnapshotProvider, MockSnapshotProvider};
pub use report::{PremiumCurrency, PremiumQuote, PriceFormat, PriceReport, ShockReport, SurfaceRow};
pub use request::{Expiry, PricingRequest, ResolvedExpiry, StrikeSpec};
pub use session::PricingSession;
