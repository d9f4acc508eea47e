//! Full valuation of a few large caps against the live FMP API.
//!
//! This example demonstrates:
//! - Building a `ValuationRequest` with explicit peers and a WACC floor
//! - Running the pipeline once per ticker
//! - Reading ready sections and reporting failed ones
//!
//! Requires `FMP_API_KEY` in the environment or a `.env` file.

use tasador::fmp::FmpClient;
use tasador::{ValuationRequest, run};

/// Tickers to value, each with its peer set.
const UNIVERSE: &[(&str, &str)] = &[
    ("AAPL", "MSFT,GOOGL,META"),
    ("KO", "PEP,MDLZ,KDP"),
    ("JNJ", "PFE,MRK,ABBV"),
];

#[tokio::main]
async fn main() {
    if let Err(e) = run_all().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_all() -> Result<(), Box<dyn std::error::Error>> {
    let client = FmpClient::from_env()?;

    println!(
        "{:<6} {:>10} {:>10} {:>8} {:>10} {:>8} {:>10}",
        "Ticker", "Price", "DCF", "WACC", "P/E impl", "LBO IRR", "Failures"
    );
    println!("{}", "─".repeat(70));

    for (ticker, peers) in UNIVERSE {
        let mut request = ValuationRequest::new(*ticker);
        request.peers = Some((*peers).to_string());

        let report = run(&client, &request).await?;

        let dcf_price = report.equity_bridge.ready().map(|b| b.implied_price);
        let wacc = report.discount_rate.ready().map(|d| d.wacc);
        let pe_price = report.comparables.ready().and_then(|c| {
            c.implied
                .iter()
                .find(|v| v.multiple == tasador::comps::Multiple::PriceToEarnings)
                .map(|v| v.implied_price)
        });
        let irr = report.lbo.ready().map(|l| l.irr);

        println!(
            "{:<6} {:>10} {:>10} {:>8} {:>10} {:>8} {:>10}",
            ticker,
            fmt(report.price, 2),
            fmt(dcf_price, 2),
            fmt(wacc.map(|w| w * 100.0), 2),
            fmt(pe_price, 2),
            fmt(irr.map(|r| r * 100.0), 1),
            report.failures().len(),
        );

        for (section, message) in report.failures() {
            println!("       {section}: {message}");
        }
    }

    Ok(())
}

fn fmt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.decimals$}"))
}
