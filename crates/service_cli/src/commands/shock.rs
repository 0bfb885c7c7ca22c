//! Shock command implementation
//!
//! Replays the market moves between two historical dates on a trade priced
//! in today's market and splits the P&L into market moves and time decay.

use chrono::NaiveDate;
use pricer_pricing::ShockReport;
use tracing::info;

use super::{print_json, session, TradeArgs};
use crate::config::FxPricerConfig;
use crate::{CliError, Result};

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|e| CliError::InvalidArgument(format!("date '{}': {}", text, e)))
}

/// Run the shock command
pub fn run(
    config: &FxPricerConfig,
    trade: &TradeArgs,
    start: &str,
    end: &str,
    strict: bool,
    json: bool,
) -> Result<()> {
    let request = trade.request(config)?;
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    let session = session(config).with_strict_deltas(strict);
    info!(provider = session.provider().name(), %start, %end, "Starting shock...");

    let report = session.shock(&request, start, end)?;
    if json {
        print_json(&report)
    } else {
        print!("{}", render(&report));
        Ok(())
    }
}

/// Shock summary table.
pub fn render(report: &ShockReport) -> String {
    let delta = &report.delta;
    let market = &report.outcome.shocked_market;
    let pnl = report.pnl();
    let row = |label: &str, value: String| format!("│ {:<20} │ {:>20} │\n", label, value);

    let mut out = String::new();
    out.push_str("┌──────────────────────┬──────────────────────┐\n");
    out.push_str(&row(
        "Window",
        format!("{} → {}", report.start_date, report.end_date),
    ));
    out.push_str(&row("Days elapsed", delta.time_diff_days.to_string()));
    out.push_str(&row(
        "Spot move",
        format!("{:+.3}%", delta.spot_pct_change * 100.0),
    ));
    out.push_str(&row(
        "Avg ATM vol move",
        format!("{:+.3}%", delta.avg_vol_change() * 100.0),
    ));
    out.push_str(&row(
        "Avg USD rate move",
        format!("{:+.4}%", delta.avg_rate_change() * 100.0),
    ));
    if !delta.skipped_tenors.is_empty() {
        let skipped: Vec<String> = delta.skipped_tenors.iter().map(|t| t.to_string()).collect();
        out.push_str(&row("Skipped tenors", skipped.join(",")));
    }
    out.push_str("├──────────────────────┼──────────────────────┤\n");
    out.push_str(&row("Spot", format!("{:.5} → {:.5}", report.original.spot, market.spot)));
    out.push_str(&row(
        "Expiry (days)",
        format!("{} → {}", market.original_expiry_days, market.shocked_expiry_days),
    ));
    out.push_str(&row(
        "Volatility",
        format!(
            "{:.3}% → {:.3}%",
            report.original.volatility * 100.0,
            report.outcome.shocked.volatility * 100.0
        ),
    ));
    out.push_str("├──────────────────────┼──────────────────────┤\n");
    out.push_str(&row("Original premium", format!("{:.2}", pnl.original_premium)));
    out.push_str(&row("Shocked premium", format!("{:.2}", pnl.shocked_premium)));
    out.push_str(&row("Decay-only premium", format!("{:.2}", pnl.decay_premium)));
    out.push_str(&row("Shocked P&L", format!("{:+.2}", pnl.shocked_pnl)));
    out.push_str(&row("Decay P&L", format!("{:+.2}", pnl.decay_pnl)));
    out.push_str(&row("Market P&L", format!("{:+.2}", pnl.market_pnl)));
    out.push_str(&row(
        "Shock / decay",
        pnl.shock_to_decay_ratio
            .map(|r| format!("{:.2}x", r))
            .unwrap_or_else(|| "n/a".to_string()),
    ));
    out.push_str("└──────────────────────┴──────────────────────┘\n");
    out
}
