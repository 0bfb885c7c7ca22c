//! Price command implementation
//!
//! Prices a single FX vanilla option and prints premium, greeks and the
//! market inputs used.

use pricer_models::instruments::fx::NotionalCurrency;
use pricer_pricing::{PremiumCurrency, PremiumQuote, PriceFormat, PriceReport};
use serde::Serialize;
use tracing::info;

use super::{print_json, session, QuoteArgs, TradeArgs};
use crate::config::FxPricerConfig;
use crate::Result;

#[derive(Serialize)]
struct PriceOutput<'a> {
    report: &'a PriceReport,
    quote: PremiumQuote,
}

/// Run the price command
pub fn run(config: &FxPricerConfig, trade: &TradeArgs, quote: &QuoteArgs, json: bool) -> Result<()> {
    let request = trade.request(config)?;
    let (format, currency) = quote.resolve(config)?;
    let session = session(config);
    info!(provider = session.provider().name(), "Starting pricing...");

    let report = session.price(&request)?;
    if json {
        print_json(&PriceOutput {
            report: &report,
            quote: report.premium_quote(format, currency),
        })
    } else {
        print!("{}", render(&report, format, currency));
        Ok(())
    }
}

/// Table of one priced trade.
pub fn render(report: &PriceReport, format: PriceFormat, currency: PremiumCurrency) -> String {
    let request = &report.request;
    let quote = report.premium_quote(format, currency);
    let greeks = &report.result.greeks;
    let notional_ccy = match request.notional_currency {
        NotionalCurrency::For => request.pair.base(),
        NotionalCurrency::Dom => request.pair.quote(),
    };
    let row = |label: &str, value: String| format!("│ {:<16} │ {:>22} │\n", label, value);

    let mut out = String::new();
    out.push_str("┌──────────────────┬────────────────────────┐\n");
    out.push_str(&row("Pair", request.pair.to_string()));
    out.push_str(&row("Direction", request.direction.to_string()));
    out.push_str(&row("Type", request.option_type.to_string()));
    out.push_str(&row(
        "Notional",
        format!("{:.0} {}", request.notional, notional_ccy),
    ));
    out.push_str(&row(
        "Expiry",
        format!("{} ({}d)", request.expiry, report.expiry_days),
    ));
    out.push_str("├──────────────────┼────────────────────────┤\n");
    out.push_str(&row("Spot", format!("{:.5}", report.spot)));
    out.push_str(&row("Fwd points", format!("{:.2}", report.forward_points)));
    out.push_str(&row("Forward", format!("{:.5}", report.forward)));
    out.push_str(&row(
        "Strike",
        format!("{:.5} ({})", report.strike, request.strike),
    ));
    out.push_str(&row("Volatility", format!("{:.3}%", report.volatility * 100.0)));
    out.push_str(&row(
        &format!("{} rate", request.pair.quote()),
        format!("{:.4}%", report.domestic_rate * 100.0),
    ));
    out.push_str(&row(
        &format!("{} rate", request.pair.base()),
        format!("{:.4}%", report.foreign_rate * 100.0),
    ));
    out.push_str("├──────────────────┼────────────────────────┤\n");
    out.push_str(&row(
        &format!("Price ({})", format),
        format!("{:.4}", quote.price),
    ));
    out.push_str(&row(
        "Premium",
        format!("{:.2} {}", quote.amount, quote.currency),
    ));
    out.push_str(&row("Delta", format!("{:.4}", greeks.delta)));
    out.push_str(&row("Hedge", format!("{:.0} {}", report.hedge, request.pair.base())));
    out.push_str(&row("Gamma", format!("{:.2}", report.notional_gamma())));
    out.push_str(&row("Vega (1%)", format!("{:.2}", report.notional_vega())));
    out.push_str(&row("Theta (1d)", format!("{:.6}", greeks.theta)));
    out.push_str(&row("Rho dom", format!("{:.6}", greeks.rho_domestic)));
    out.push_str(&row("Rho for", format!("{:.6}", greeks.rho_foreign)));
    out.push_str("└──────────────────┴────────────────────────┘\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::TradeArgs;
    use pricer_pricing::{MockSnapshotProvider, PricingSession};

    #[test]
    fn test_render_lists_inputs_and_premium() {
        let config = FxPricerConfig::default();
        let request = TradeArgs::default().request(&config).unwrap();
        let report = PricingSession::new(MockSnapshotProvider::new())
            .price(&request)
            .unwrap();

        let table = render(&report, PriceFormat::Pips, PremiumCurrency::Domestic);
        assert!(table.contains("EURUSD"));
        assert!(table.contains("Price (pips)"));
        assert!(table.contains("USD rate"));
        assert!(table.contains("EUR rate"));
        assert!(table.contains("ATMF"));
        assert_eq!(table.lines().count(), 25);
    }
}
