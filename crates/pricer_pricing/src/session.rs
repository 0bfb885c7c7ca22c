//! Pricing sessions: a provider plus the orchestration around it.

use chrono::NaiveDate;
use pricer_core::types::CurrencyPair;
use pricer_risk::scenarios::{run_scenario, MarketDataDelta};
use tracing::{info, instrument};

use crate::context::MarketContext;
use crate::error::PricingSessionError;
use crate::provider::MarketSnapshotProvider;
use crate::report::{PriceReport, ShockReport, SurfaceRow};
use crate::request::PricingRequest;

/// Prices requests against snapshots from an injected provider.
///
/// Every call fetches a fresh snapshot and builds its own
/// [`MarketContext`]; nothing is cached between calls.
///
/// # Examples
///
/// ```
/// use pricer_pricing::{Expiry, MockSnapshotProvider, PricingRequest, PricingSession};
///
/// let session = PricingSession::new(MockSnapshotProvider::new());
/// let request = PricingRequest::new("EURUSD".parse().unwrap(), Expiry::Days(91));
/// let report = session.price(&request).unwrap();
/// assert!(report.result.premium > 0.0);
/// ```
pub struct PricingSession {
    provider: Box<dyn MarketSnapshotProvider>,
    strict_deltas: bool,
}

impl PricingSession {
    /// Session over `provider`.
    pub fn new<P: MarketSnapshotProvider + 'static>(provider: P) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    /// Session over an already boxed provider.
    pub fn from_boxed(provider: Box<dyn MarketSnapshotProvider>) -> Self {
        Self {
            provider,
            strict_deltas: false,
        }
    }

    /// Fail shock runs whose historical snapshots do not quote the same
    /// tenors, instead of skipping the unmatched tenors.
    pub fn with_strict_deltas(mut self, strict: bool) -> Self {
        self.strict_deltas = strict;
        self
    }

    /// The provider.
    pub fn provider(&self) -> &dyn MarketSnapshotProvider {
        self.provider.as_ref()
    }

    /// Context over the latest snapshot of `pair`.
    pub fn context(&self, pair: &CurrencyPair) -> Result<MarketContext, PricingSessionError> {
        let snapshot = self.provider.snapshot(pair)?;
        MarketContext::new(snapshot)
    }

    /// Prices `request` in the latest market.
    ///
    /// # Errors
    ///
    /// Provider, market data, surface and pricer failures. A missing rate
    /// or vol is an error, never a default.
    #[instrument(skip_all, fields(pair = %request.pair, expiry = %request.expiry, strike = %request.strike))]
    pub fn price(&self, request: &PricingRequest) -> Result<PriceReport, PricingSessionError> {
        let report = self.context(&request.pair)?.price(request)?;
        info!(
            premium = report.result.premium,
            vol = report.volatility,
            strike = report.strike,
            "priced"
        );
        Ok(report)
    }

    /// Prices `request` now, then replays the market moves between
    /// `start_date` and `end_date` on it.
    ///
    /// # Errors
    ///
    /// As [`Self::price`], plus `ScenarioError::OptionExpired` when the
    /// window is at least as long as the option, and, in strict mode,
    /// `ScenarioError::IncompleteSnapshot`.
    #[instrument(skip_all, fields(pair = %request.pair, %start_date, %end_date))]
    pub fn shock(
        &self,
        request: &PricingRequest,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<ShockReport, PricingSessionError> {
        let context = self.context(&request.pair)?;
        let original = context.price(request)?;

        let start = self.provider.historical_snapshot(&request.pair, start_date)?;
        let end = self.provider.historical_snapshot(&request.pair, end_date)?;
        let delta = if self.strict_deltas {
            MarketDataDelta::calculate_strict(&start, &end, start_date, end_date)?
        } else {
            MarketDataDelta::calculate(&start, &end, start_date, end_date)?
        };

        let outcome = run_scenario(&original.position(), context.snapshot(), &delta)?;
        info!(
            days = delta.time_diff_days,
            spot_move = delta.spot_pct_change,
            shocked_pnl = outcome.pnl.shocked_pnl,
            "shock applied"
        );
        Ok(ShockReport {
            start_date,
            end_date,
            original,
            delta,
            outcome,
        })
    }

    /// Pillar grid of the latest surface of `pair`.
    pub fn surface(&self, pair: &CurrencyPair) -> Result<Vec<SurfaceRow>, PricingSessionError> {
        self.context(pair)?.surface_grid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockSnapshotProvider;
    use crate::request::{Expiry, StrikeSpec};
    use approx::assert_relative_eq;
    use pricer_core::types::Tenor;
    use pricer_models::instruments::fx::FxOptionType;
    use pricer_risk::scenarios::ScenarioError;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn eurusd() -> CurrencyPair {
        "EURUSD".parse().unwrap()
    }

    fn provider() -> MockSnapshotProvider {
        MockSnapshotProvider::new().with_as_of(date(6, 3))
    }

    #[test]
    fn test_flat_history_pnl_is_decay_only() {
        let session = PricingSession::new(provider());
        let request = PricingRequest::new(eurusd(), Expiry::Days(182));
        let report = session.shock(&request, date(3, 1), date(3, 15)).unwrap();

        assert_eq!(report.delta.time_diff_days, 14);
        assert!(report.delta.is_flat());
        let pnl = report.pnl();
        assert_relative_eq!(pnl.market_pnl, 0.0, epsilon = 1e-9);
        assert_relative_eq!(pnl.shocked_pnl, pnl.decay_pnl, epsilon = 1e-9);
        // a bought option loses value as time passes
        assert!(pnl.decay_pnl < 0.0);
    }

    #[test]
    fn test_same_day_window_has_no_pnl() {
        let session = PricingSession::new(provider());
        for expiry in [
            Expiry::Days(45),
            Expiry::Years(0.6),
            Expiry::Tenor("1Y".parse().unwrap()),
        ] {
            let request = PricingRequest::new(eurusd(), expiry)
                .with_strike(StrikeSpec::parse("25DP").unwrap());
            let report = session.shock(&request, date(3, 1), date(3, 1)).unwrap();
            assert_relative_eq!(report.pnl().decay_pnl, 0.0, epsilon = 1e-6);
            assert_relative_eq!(report.pnl().shocked_pnl, 0.0, epsilon = 1e-6);
            assert_eq!(report.outcome.decay.volatility, report.original.volatility);
        }
    }

    #[test]
    fn test_recorded_selloff_moves_premium() {
        let mut provider = provider();
        let mut end = provider.snapshot(&eurusd()).unwrap();
        end.spot = 1.0850 * 0.98;
        provider.insert_historical(date(3, 15), end);

        let session = PricingSession::new(provider);
        let put = PricingRequest::new(eurusd(), Expiry::Days(91))
            .with_option_type(FxOptionType::Put);
        let report = session.shock(&put, date(3, 1), date(3, 15)).unwrap();

        assert_relative_eq!(report.delta.spot_pct_change, -0.02, epsilon = 1e-12);
        assert_relative_eq!(
            report.outcome.shocked_market.spot,
            1.0850 * 0.98,
            max_relative = 1e-12
        );
        assert!(report.pnl().market_pnl > 0.0);
    }

    #[test]
    fn test_window_longer_than_option() {
        let session = PricingSession::new(provider());
        let request = PricingRequest::new(eurusd(), Expiry::Days(30));
        let err = session.shock(&request, date(1, 2), date(3, 1)).unwrap_err();
        assert!(matches!(
            err,
            PricingSessionError::Scenario(ScenarioError::OptionExpired {
                original_days: 30,
                elapsed_days: 59
            })
        ));
    }

    #[test]
    fn test_strict_mode_rejects_mismatched_tenors() {
        let mut provider = provider();
        let mut end = provider.snapshot(&eurusd()).unwrap();
        end.smiles.remove(&"9M".parse::<Tenor>().unwrap());
        provider.insert_historical(date(3, 15), end);

        let lenient = PricingSession::new(provider.clone());
        let request = PricingRequest::new(eurusd(), Expiry::Days(182));
        let report = lenient.shock(&request, date(3, 1), date(3, 15)).unwrap();
        assert_eq!(report.delta.skipped_tenors, vec!["9M".parse::<Tenor>().unwrap()]);

        let strict = PricingSession::new(provider).with_strict_deltas(true);
        let err = strict.shock(&request, date(3, 1), date(3, 15)).unwrap_err();
        assert!(matches!(
            err,
            PricingSessionError::Scenario(ScenarioError::IncompleteSnapshot { .. })
        ));
    }

    #[test]
    fn test_delta_strike_request() {
        let session = PricingSession::new(provider());
        let request = PricingRequest::new(eurusd(), Expiry::Tenor("1Y".parse().unwrap()))
            .with_strike(StrikeSpec::parse("25DC").unwrap());
        let report = session.price(&request).unwrap();
        assert_eq!(report.expiry_days, 365);
        assert!(report.strike > report.forward);
        assert!(report.result.greeks.delta < 0.30 && report.result.greeks.delta > 0.20);
    }

    #[test]
    fn test_surface_grid() {
        let session = PricingSession::new(provider());
        let grid = session.surface(&eurusd()).unwrap();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0].tenor, "1W".parse::<Tenor>().unwrap());
    }
}
