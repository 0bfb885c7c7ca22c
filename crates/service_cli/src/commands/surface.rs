//! Surface command implementation
//!
//! Lists every pillar of a pair's smile with its rates, vols and strikes.

use pricer_core::types::CurrencyPair;
use pricer_pricing::SurfaceRow;
use tracing::info;

use super::{pair_or_default, print_json, session};
use crate::config::FxPricerConfig;
use crate::Result;

/// Run the surface command
pub fn run(config: &FxPricerConfig, pair: Option<&str>, json: bool) -> Result<()> {
    let pair = pair_or_default(pair, config)?;
    let rows = session(config).surface(&pair)?;
    info!(%pair, pillars = rows.len(), "surface built");
    if json {
        print_json(&rows)
    } else {
        print!("{}", render(&pair, &rows));
        Ok(())
    }
}

/// One line per pillar: vols in percent, strikes in pair precision.
pub fn render(pair: &CurrencyPair, rows: &[SurfaceRow]) -> String {
    let decimals = if pair.pip_scale() == 100.0 { 3 } else { 5 };
    let mut out = format!(
        "{:<5} {:>5} {:>9} {:>8} {:>8} | {:>6} {:>6} {:>6} {:>6} {:>6} | {:>10} {:>10} {:>10} {:>10} {:>10}\n",
        "Tenor", "Days", "Forward", "Dom %", "For %", "10P", "25P", "ATM", "25C", "10C", "K 10P",
        "K 25P", "K ATM", "K 25C", "K 10C"
    );
    for row in rows {
        out.push_str(&format!(
            "{:<5} {:>5} {:>9.*} {:>8.4} {:>8.4} |",
            row.tenor.to_string(),
            row.days,
            decimals,
            row.forward,
            row.domestic_rate * 100.0,
            row.foreign_rate * 100.0
        ));
        for vol in row.vols {
            out.push_str(&format!(" {:>6.3}", vol * 100.0));
        }
        out.push_str(" |");
        for strike in row.strikes {
            out.push_str(&format!(" {:>10.*}", decimals, strike));
        }
        out.push('\n');
    }
    out
}
