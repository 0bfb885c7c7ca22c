//! Market snapshot providers.
//!
//! A session never reaches for a global feed: the provider is handed to
//! [`PricingSession::new`](crate::PricingSession::new) and queried per
//! request.

mod file;
mod mock;

pub use file::JsonFileProvider;
pub use mock::{MockSnapshotProvider, MOCK_TENORS};

use chrono::NaiveDate;
use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::CurrencyPair;

use crate::error::ProviderError;

/// Source of complete market snapshots for a currency pair.
pub trait MarketSnapshotProvider: Send + Sync {
    /// Latest snapshot of `pair`.
    fn snapshot(&self, pair: &CurrencyPair) -> Result<MarketSnapshot, ProviderError>;

    /// Snapshot of `pair` as of the close of `date`.
    fn historical_snapshot(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<MarketSnapshot, ProviderError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

impl<P: MarketSnapshotProvider + ?Sized> MarketSnapshotProvider for Box<P> {
    fn snapshot(&self, pair: &CurrencyPair) -> Result<MarketSnapshot, ProviderError> {
        (**self).snapshot(pair)
    }

    fn historical_snapshot(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<MarketSnapshot, ProviderError> {
        (**self).historical_snapshot(pair, date)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
