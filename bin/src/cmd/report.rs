//! Report command implementation.

use crate::args::OutputFormat;
use crate::cmd::{comps, dcf, forecast, lbo, wacc};
use crate::output::{banner, heading, pct, print_json, print_section};
use anyhow::Result;
use tasador::fmp::FmpClient;
use tasador::{ValuationReport, ValuationRequest};

/// Run the full valuation of `request.ticker`.
pub(crate) async fn run(request: ValuationRequest, format: OutputFormat) -> Result<()> {
    let client = FmpClient::from_env()?;
    let report = tasador::run(&client, &request).await?;

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => render(&report),
    }
}

fn render(report: &ValuationReport) -> Result<()> {
    banner("Valuation Report");
    println!("Ticker:   {}", report.ticker);
    if let Some(name) = &report.company_name {
        println!("Company:  {name}");
    }
    if let Some(price) = report.price {
        println!("Price:    {price:.2}");
    }
    println!("Peers:    {}", report.peers.join(", "));
    println!();

    print_section("MARKET", &report.market, |m| {
        heading("MARKET");
        println!("Risk-free rate:   {}", pct(m.risk_free_rate));
        println!("Market return:    {}", pct(m.market_return));
        println!("Beta:             {:.2}\n", m.beta);
        Ok(())
    })?;
    print_section("FORECAST", &report.forecast, forecast::render_forecast)?;
    print_section("FREE CASH FLOW", &report.cash_flows, |c| {
        forecast::render_cash_flows(c)
    })?;
    print_section("DISCOUNT RATE", &report.discount_rate, wacc::render)?;
    print_section("DCF", &report.dcf, |d| {
        dcf::render(&d.free_cash_flows, &d.valuation)
    })?;
    print_section("EQUITY BRIDGE", &report.equity_bridge, |b| {
        dcf::render_bridge(b, report.price);
        Ok(())
    })?;
    print_section("LEVERAGED BUYOUT", &report.lbo, lbo::render)?;
    print_section("COMPARABLES", &report.comparables, comps::render)?;

    let failures = report.failures();
    if !failures.is_empty() {
        println!("{} of 8 sections unavailable; set RUST_LOG=debug for details.", failures.len());
    }
    Ok(())
}
