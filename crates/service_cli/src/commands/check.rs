//! Check command implementation
//!
//! Validates the configuration and the market data of each configured pair.

use pricer_pricing::{MarketContext, PricingSession};
use tracing::{info, warn};

use super::{pair_or_default, session};
use crate::config::FxPricerConfig;
use crate::{CliError, Result};

/// Run the check command
pub fn run(config: &FxPricerConfig, pair: Option<&str>) -> Result<()> {
    println!("Configuration: ok");
    println!("  source:      {:?}", config.market_data.source);
    println!("  log level:   {}", config.log_level);

    let pairs = match pair {
        Some(pair) => vec![pair_or_default(Some(pair), config)?],
        None => config.pairs(),
    };
    let session = session(config);
    let mut failures = 0;
    for pair in &pairs {
        match check_pair(&session, pair) {
            Ok(line) => println!("{:<7} ok      {}", pair.to_string(), line),
            Err(e) => {
                failures += 1;
                warn!(%pair, error = %e, "market data check failed");
                println!("{:<7} FAILED  {}", pair.to_string(), e);
            }
        }
    }
    info!(pairs = pairs.len(), failures, "check complete");
    if failures > 0 {
        return Err(CliError::CheckFailed {
            failed: failures,
            checked: pairs.len(),
        });
    }
    Ok(())
}

fn check_pair(
    session: &PricingSession,
    pair: &pricer_core::types::CurrencyPair,
) -> std::result::Result<String, pricer_pricing::PricingSessionError> {
    let context: MarketContext = session.context(pair)?;
    let grid = context.surface_grid()?;
    let snapshot = context.snapshot();
    let tenors: Vec<String> = snapshot.tenors().iter().map(|t| t.to_string()).collect();
    Ok(format!(
        "spot {} as of {} | {} pillars: {}",
        snapshot.spot,
        snapshot
            .as_of
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        grid.len(),
        tenors.join(" ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_pricing::MockSnapshotProvider;

    #[test]
    fn test_check_pair_reports_pillars() {
        let session = PricingSession::new(MockSnapshotProvider::new());
        let line = check_pair(&session, &"EURUSD".parse().unwrap()).unwrap();
        assert!(line.starts_with("spot 1.085"));
        assert!(line.contains("10 pillars"));
    }

    #[test]
    fn test_check_cross_pair_fails() {
        let session = PricingSession::new(MockSnapshotProvider::new());
        assert!(check_pair(&session, &"EURGBP".parse().unwrap()).is_err());
    }
}
