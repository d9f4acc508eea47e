//! WACC command implementation.

use crate::args::OutputFormat;
use crate::output::{banner, pct, print_frame, print_json};
use anyhow::Result;
use tasador::ValuationRequest;
use tasador::fmp::FmpClient;
use tasador::model::{DiscountRateProfile, compute_wacc};
use tasador::tables;

/// Compute the discount rate of `request.ticker`.
pub(crate) async fn run(request: ValuationRequest, format: OutputFormat) -> Result<()> {
    let client = FmpClient::from_env()?;
    let ticker = request.symbol();

    let (company, market) = tokio::join!(
        client.company_data(&ticker, 1),
        client.market_snapshot(&ticker, &request.market_index, request.market_lookback_years),
    );
    let profile = compute_wacc(&company?.statement(), &market?, &request.wacc_config())?;

    match format {
        OutputFormat::Json => print_json(&profile),
        OutputFormat::Text => {
            banner("Discount Rate");
            println!("Ticker:   {ticker}");
            println!("Index:    {} ({}y lookback)", request.market_index, request.market_lookback_years);
            println!();
            render(&profile)
        }
    }
}

pub(crate) fn render(profile: &DiscountRateProfile) -> Result<()> {
    print_frame("DISCOUNT RATE", tables::discount_rate_frame(profile))?;
    println!(
        "Synthetic rating {} (spread {}), WACC {}\n",
        profile.credit_rating,
        pct(profile.credit_spread),
        pct(profile.wacc)
    );
    Ok(())
}
