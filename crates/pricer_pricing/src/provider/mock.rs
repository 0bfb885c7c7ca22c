//! Synthetic snapshots for running without a market data connection.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveDate, Utc};
use pricer_core::market_data::{MarketSnapshot, QuoteUnits, SmileQuote};
use pricer_core::types::{CurrencyPair, Tenor};
use tracing::{debug, warn};

use super::MarketSnapshotProvider;
use crate::error::ProviderError;

/// Pillars carried by the mock term structure.
pub const MOCK_TENORS: [&str; 10] = ["1W", "2W", "1M", "2M", "3M", "6M", "9M", "1Y", "18M", "2Y"];

/// Spot used for pairs without a fixture.
const PLACEHOLDER_SPOT: f64 = 1.0000;

/// Quotes for one pillar, in percent (forward points in pips).
#[derive(Debug, Clone, Copy)]
struct PillarQuotes {
    forward_points: f64,
    usd_rate: f64,
    smile: SmileQuote,
}

/// Mock market data provider.
///
/// Every pair shares one EURUSD-shaped term structure and differs only by
/// spot. Historical requests return recorded snapshots when present and
/// otherwise the same fixture dated to the requested day, which makes
/// every delta flat apart from the elapsed time.
///
/// # Examples
///
/// ```
/// use pricer_pricing::{MarketSnapshotProvider, MockSnapshotProvider};
///
/// let provider = MockSnapshotProvider::new();
/// let snapshot = provider.snapshot(&"USDJPY".parse().unwrap()).unwrap();
/// assert_eq!(snapshot.spot, 149.50);
/// assert_eq!(snapshot.tenors().len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct MockSnapshotProvider {
    as_of: NaiveDate,
    spots: HashMap<String, f64>,
    term_structure: BTreeMap<Tenor, PillarQuotes>,
    tenors: Vec<Tenor>,
    history: HashMap<(String, NaiveDate), MarketSnapshot>,
}

impl Default for MockSnapshotProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSnapshotProvider {
    /// Mock provider dated today with every mock pillar.
    pub fn new() -> Self {
        let mut provider = Self {
            as_of: Utc::now().date_naive(),
            spots: HashMap::new(),
            term_structure: BTreeMap::new(),
            tenors: Vec::new(),
            history: HashMap::new(),
        };
        provider.initialize_default_data();
        provider
    }

    /// Initialize default market data
    fn initialize_default_data(&mut self) {
        self.spots.insert("EURUSD".to_string(), 1.0850);
        self.spots.insert("GBPUSD".to_string(), 1.2650);
        self.spots.insert("USDJPY".to_string(), 149.50);
        self.spots.insert("AUDUSD".to_string(), 0.6550);
        self.spots.insert("USDCAD".to_string(), 1.3550);
        self.spots.insert("USDCHF".to_string(), 0.8850);

        // (forward points, USD rate %, ATM %, RR25 %, BF25 %, BF10 %)
        let rows: [(f64, f64, f64, f64, f64, f64); 10] = [
            (2.5, 5.30, 8.5, -0.30, 0.15, 0.40),
            (5.0, 5.31, 8.3, -0.35, 0.18, 0.45),
            (12.0, 5.32, 8.0, -0.40, 0.20, 0.50),
            (25.0, 5.33, 7.8, -0.45, 0.22, 0.55),
            (38.0, 5.34, 7.6, -0.50, 0.25, 0.60),
            (78.0, 5.20, 7.5, -0.60, 0.30, 0.70),
            (120.0, 5.05, 7.4, -0.70, 0.35, 0.80),
            (165.0, 4.90, 7.3, -0.80, 0.40, 0.90),
            (250.0, 4.60, 7.2, -0.90, 0.45, 1.00),
            (340.0, 4.40, 7.1, -1.00, 0.50, 1.10),
        ];
        for (label, (pts, usd, atm, rr25, bf25, bf10)) in MOCK_TENORS.iter().zip(rows) {
            let Ok(tenor) = label.parse::<Tenor>() else {
                continue;
            };
            self.term_structure.insert(
                tenor,
                PillarQuotes {
                    forward_points: pts,
                    usd_rate: usd,
                    smile: SmileQuote {
                        atm,
                        rr25,
                        bf25,
                        rr10: 2.0 * rr25,
                        bf10,
                    },
                },
            );
            self.tenors.push(tenor);
        }
    }

    /// Same provider dated `as_of`.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Restricts snapshots to `tenors`; pillars without mock quotes are dropped.
    pub fn with_tenors(mut self, tenors: &[Tenor]) -> Self {
        self.tenors = tenors
            .iter()
            .filter(|tenor| {
                let known = self.term_structure.contains_key(tenor);
                if !known {
                    warn!(tenor = %tenor, "no mock quotes for tenor, dropping pillar");
                }
                known
            })
            .copied()
            .collect();
        self
    }

    /// Records the snapshot returned for `(snapshot.pair, date)`.
    pub fn insert_historical(&mut self, date: NaiveDate, mut snapshot: MarketSnapshot) {
        snapshot.as_of = Some(date);
        self.history.insert((snapshot.pair.code(), date), snapshot);
    }

    /// Valuation date of current snapshots.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    fn spot(&self, pair: &CurrencyPair) -> f64 {
        match self.spots.get(&pair.code()) {
            Some(&spot) => spot,
            None => {
                debug!(pair = %pair, spot = PLACEHOLDER_SPOT, "no mock spot for pair");
                PLACEHOLDER_SPOT
            }
        }
    }

    fn build(&self, pair: &CurrencyPair, as_of: NaiveDate) -> MarketSnapshot {
        let mut snapshot = MarketSnapshot::new(*pair, self.spot(pair));
        snapshot.as_of = Some(as_of);
        snapshot.quote_units = QuoteUnits::Percent;
        for tenor in &self.tenors {
            if let Some(quotes) = self.term_structure.get(tenor) {
                snapshot.forward_points.insert(*tenor, quotes.forward_points);
                snapshot.usd_rates.insert(*tenor, quotes.usd_rate);
                snapshot.smiles.insert(*tenor, quotes.smile);
            }
        }
        snapshot
    }
}

impl MarketSnapshotProvider for MockSnapshotProvider {
    fn snapshot(&self, pair: &CurrencyPair) -> Result<MarketSnapshot, ProviderError> {
        Ok(self.build(pair, self.as_of))
    }

    fn historical_snapshot(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<MarketSnapshot, ProviderError> {
        if let Some(recorded) = self.history.get(&(pair.code(), date)) {
            return Ok(recorded.clone());
        }
        debug!(pair = %pair, %date, "no recorded history, using mock fixture");
        Ok(self.build(pair, date))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
