//! Market moves between two historical snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use pricer_core::market_data::{MarketDataError, MarketSnapshot, SmileQuote};
use pricer_core::types::Tenor;
use tracing::{debug, warn};

use super::error::ScenarioError;

/// Absolute smile quote changes for one tenor, in decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolDiff {
    /// ATM change
    pub atm: f64,
    /// 25-delta risk reversal change
    pub rr25: f64,
    /// 10-delta risk reversal change
    pub rr10: f64,
    /// 25-delta butterfly change
    pub bf25: f64,
    /// 10-delta butterfly change
    pub bf10: f64,
}

impl VolDiff {
    fn between(start: &SmileQuote, end: &SmileQuote) -> Self {
        Self {
            atm: end.atm - start.atm,
            rr25: end.rr25 - start.rr25,
            rr10: end.rr10 - start.rr10,
            bf25: end.bf25 - start.bf25,
            bf10: end.bf10 - start.bf10,
        }
    }

    /// Applies the change to a decimal smile.
    ///
    /// ATM is floored at 0.001 and butterflies at zero; risk reversals
    /// move freely.
    pub fn apply(&self, quote: &SmileQuote) -> SmileQuote {
        SmileQuote {
            atm: (quote.atm + self.atm).max(MIN_SHOCKED_ATM),
            rr25: quote.rr25 + self.rr25,
            bf25: (quote.bf25 + self.bf25).max(0.0),
            rr10: quote.rr10 + self.rr10,
            bf10: (quote.bf10 + self.bf10).max(0.0),
        }
    }
}

/// Floor applied to a shocked ATM vol.
pub const MIN_SHOCKED_ATM: f64 = 0.001;

/// Differences between a start and an end snapshot of one pair.
///
/// Rate and vol diffs are absolute decimals whatever the quote units of the
/// two snapshots. Forward points and spot move by relative change.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketDataDelta {
    /// Start of the historical window
    pub start_date: NaiveDate,
    /// End of the historical window
    pub end_date: NaiveDate,
    /// Calendar days between the two dates
    pub time_diff_days: i64,
    /// Spot at the start
    pub spot_start: f64,
    /// Spot at the end
    pub spot_end: f64,
    /// Relative spot change
    pub spot_pct_change: f64,
    /// Relative forward-point change per tenor
    pub forward_points_pct: BTreeMap<Tenor, f64>,
    /// Absolute USD rate change per tenor
    pub rate_diffs: BTreeMap<Tenor, f64>,
    /// Smile quote changes per tenor
    pub vol_diffs: BTreeMap<Tenor, VolDiff>,
    /// Tenors quoted in only one snapshot, shortest first
    pub skipped_tenors: Vec<Tenor>,
}

impl MarketDataDelta {
    /// Market moves from `start` to `end`.
    ///
    /// A tenor quoted in only one snapshot produces no diff for that
    /// quote, is logged, and is listed in `skipped_tenors`.
    ///
    /// # Errors
    ///
    /// * `ScenarioError::InvalidDateRange` when `end_date < start_date`
    /// * `ScenarioError::MarketData` when the snapshots are of different pairs
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use pricer_core::market_data::MarketSnapshot;
    /// use pricer_risk::scenarios::MarketDataDelta;
    ///
    /// let start = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0800);
    /// let end = MarketSnapshot::new("EURUSD".parse().unwrap(), 1.0908);
    /// let delta = MarketDataDelta::calculate(
    ///     &start,
    ///     &end,
    ///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    ///     NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(delta.time_diff_days, 14);
    /// assert!((delta.spot_pct_change - 0.01).abs() < 1e-12);
    /// ```
    pub fn calculate(
        start: &MarketSnapshot,
        end: &MarketSnapshot,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ScenarioError> {
        if end_date < start_date {
            return Err(ScenarioError::InvalidDateRange {
                start: start_date.to_string(),
                end: end_date.to_string(),
            });
        }
        if start.pair != end.pair {
            return Err(MarketDataError::InvalidSnapshot(format!(
                "cannot compare {} with {}",
                start.pair, end.pair
            ))
            .into());
        }

        let mut skipped = BTreeSet::new();

        let forward_points_pct = paired(
            &start.forward_points,
            &end.forward_points,
            "forward points",
            &mut skipped,
            |&s, &e| if s == 0.0 { 0.0 } else { (e - s) / s.abs() },
        );

        let start_rates = decimal_rates(start);
        let end_rates = decimal_rates(end);
        let rate_diffs = paired(&start_rates, &end_rates, "USD rate", &mut skipped, |s, e| e - s);

        let vol_diffs = paired(
            &start.decimal_smiles(),
            &end.decimal_smiles(),
            "smile",
            &mut skipped,
            VolDiff::between,
        );

        let spot_pct_change = if start.spot > 0.0 {
            (end.spot - start.spot) / start.spot
        } else {
            0.0
        };

        let delta = Self {
            start_date,
            end_date,
            time_diff_days: (end_date - start_date).num_days(),
            spot_start: start.spot,
            spot_end: end.spot,
            spot_pct_change,
            forward_points_pct,
            rate_diffs,
            vol_diffs,
            skipped_tenors: skipped.into_iter().collect(),
        };
        debug!(
            pair = %start.pair,
            days = delta.time_diff_days,
            spot_pct = delta.spot_pct_change,
            avg_vol_change = delta.avg_vol_change(),
            avg_rate_change = delta.avg_rate_change(),
            "market data delta"
        );
        Ok(delta)
    }

    /// As [`MarketDataDelta::calculate`], but a tenor quoted in only one
    /// snapshot is an error.
    ///
    /// # Errors
    ///
    /// `ScenarioError::IncompleteSnapshot` listing the skipped tenors.
    pub fn calculate_strict(
        start: &MarketSnapshot,
        end: &MarketSnapshot,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, ScenarioError> {
        let delta = Self::calculate(start, end, start_date, end_date)?;
        if delta.skipped_tenors.is_empty() {
            Ok(delta)
        } else {
            Err(ScenarioError::IncompleteSnapshot {
                tenors: delta.skipped_tenors.iter().map(Tenor::to_string).collect(),
            })
        }
    }

    /// Same window with every market move set to zero.
    pub fn time_only(&self) -> Self {
        Self {
            spot_end: self.spot_start,
            spot_pct_change: 0.0,
            forward_points_pct: BTreeMap::new(),
            rate_diffs: BTreeMap::new(),
            vol_diffs: BTreeMap::new(),
            skipped_tenors: Vec::new(),
            ..self.clone()
        }
    }

    /// Relative forward-point change of a tenor, zero when not measured.
    pub fn forward_points_change(&self, tenor: &Tenor) -> f64 {
        self.forward_points_pct.get(tenor).copied().unwrap_or(0.0)
    }

    /// Rate change of a tenor, zero when not measured.
    pub fn rate_change(&self, tenor: &Tenor) -> f64 {
        self.rate_diffs.get(tenor).copied().unwrap_or(0.0)
    }

    /// Smile change of a tenor, zero when not measured.
    pub fn vol_change(&self, tenor: &Tenor) -> VolDiff {
        self.vol_diffs.get(tenor).copied().unwrap_or_default()
    }

    /// Mean ATM change across tenors.
    pub fn avg_vol_change(&self) -> f64 {
        mean(self.vol_diffs.values().map(|d| d.atm))
    }

    /// Mean rate change across tenors.
    pub fn avg_rate_change(&self) -> f64 {
        mean(self.rate_diffs.values().copied())
    }

    /// True when no market quote moved.
    pub fn is_flat(&self) -> bool {
        self.spot_pct_change == 0.0
            && self.forward_points_pct.values().all(|&v| v == 0.0)
            && self.rate_diffs.values().all(|&v| v == 0.0)
            && self.vol_diffs.values().all(|d| *d == VolDiff::default())
    }
}

fn decimal_rates(snapshot: &MarketSnapshot) -> BTreeMap<Tenor, f64> {
    snapshot
        .usd_rates
        .keys()
        .filter_map(|tenor| snapshot.usd_rate(tenor).map(|r| (*tenor, r)))
        .collect()
}

/// Applies `diff` to every tenor present on both sides and records the
/// others in `skipped`.
fn paired<V, D>(
    start: &BTreeMap<Tenor, V>,
    end: &BTreeMap<Tenor, V>,
    what: &str,
    skipped: &mut BTreeSet<Tenor>,
    diff: impl Fn(&V, &V) -> D,
) -> BTreeMap<Tenor, D> {
    for tenor in start.keys().filter(|t| !end.contains_key(t)) {
        warn!(tenor = %tenor, quote = what, side = "end", "tenor missing, no shock applied");
        skipped.insert(*tenor);
    }
    for tenor in end.keys().filter(|t| !start.contains_key(t)) {
        warn!(tenor = %tenor, quote = what, side = "start", "tenor missing, no shock applied");
        skipped.insert(*tenor);
    }
    start
        .iter()
        .filter_map(|(tenor, s)| end.get(tenor).map(|e| (*tenor, diff(s, e))))
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
