//! Snapshots stored as JSON documents on disk.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pricer_core::market_data::{MarketDataError, MarketSnapshot};
use pricer_core::types::CurrencyPair;
use tracing::debug;

use super::MarketSnapshotProvider;
use crate::error::ProviderError;

/// Reads snapshots from a directory.
///
/// Layout:
///
/// ```text
/// <dir>/EURUSD.json              latest snapshot
/// <dir>/EURUSD_2024-03-01.json   close of 2024-03-01
/// ```
///
/// Each file is a serialised [`MarketSnapshot`]. Loaded snapshots are
/// validated, and the pair in the file must match the file name.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    dir: PathBuf,
}

impl JsonFileProvider {
    /// Provider over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Snapshot directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the latest snapshot of `pair`.
    pub fn snapshot_path(&self, pair: &CurrencyPair) -> PathBuf {
        self.dir.join(format!("{}.json", pair.code()))
    }

    /// Path of the snapshot of `pair` on `date`.
    pub fn historical_path(&self, pair: &CurrencyPair, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", pair.code(), date.format("%Y-%m-%d")))
    }

    /// Writes `snapshot` where [`Self::snapshot`] (or, with a date,
    /// [`Self::historical_snapshot`]) will find it.
    ///
    /// # Errors
    ///
    /// `ProviderError::Io` if the directory or file cannot be written.
    pub fn store(
        &self,
        snapshot: &MarketSnapshot,
        date: Option<NaiveDate>,
    ) -> Result<PathBuf, ProviderError> {
        let path = match date {
            Some(date) => self.historical_path(&snapshot.pair, date),
            None => self.snapshot_path(&snapshot.pair),
        };
        let io_error = |source: std::io::Error| ProviderError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(&io_error)?;
        let json = serde_json::to_string_pretty(snapshot).map_err(|source| ProviderError::Parse {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(&io_error)?;
        Ok(path)
    }

    fn load(
        &self,
        path: PathBuf,
        pair: &CurrencyPair,
        date: Option<NaiveDate>,
    ) -> Result<MarketSnapshot, ProviderError> {
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ProviderError::NotFound {
                    pair: pair.code(),
                    date,
                })
            }
            Err(source) => return Err(ProviderError::Io { path, source }),
        };
        let mut snapshot: MarketSnapshot =
            serde_json::from_str(&text).map_err(|source| ProviderError::Parse {
                path: path.clone(),
                source,
            })?;
        if snapshot.pair != *pair {
            return Err(ProviderError::Invalid(MarketDataError::InvalidSnapshot(format!(
                "{} holds {} rather than {}",
                path.display(),
                snapshot.pair,
                pair
            ))));
        }
        snapshot.validate()?;
        if date.is_some() {
            snapshot.as_of = date;
        }
        debug!(path = %path.display(), tenors = snapshot.tenors().len(), "loaded snapshot");
        Ok(snapshot)
    }
}

impl MarketSnapshotProvider for JsonFileProvider {
    fn snapshot(&self, pair: &CurrencyPair) -> Result<MarketSnapshot, ProviderError> {
        self.load(self.snapshot_path(pair), pair, None)
    }

    fn historical_snapshot(
        &self,
        pair: &CurrencyPair,
        date: NaiveDate,
    ) -> Result<MarketSnapshot, ProviderError> {
        self.load(self.historical_path(pair, date), pair, Some(date))
    }

    fn name(&self) -> &str {
        "file"
    }
}
