//! The valuation models on hand-written inputs, no network needed.
//!
//! This example demonstrates:
//! - Forecasting a one-year statement and building free cash flows
//! - Discounting them and bridging to a share price
//! - A leveraged buyout with a paydown schedule
//! - Black-Scholes pricing with a volatility estimate

use tasador::model::{
    EquityBridge, ForecastConfig, LboInputs, OptionKind, black_scholes, build_cash_flows,
    discount_cash_flows, evaluate_lbo, forecast, historical_volatility,
};
use tasador::{FinancialStatement, LineItem, StatementYear, tables};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let year = StatementYear::new("2024-12-31")
        .with(LineItem::Revenue, 10_000.0)
        .with(LineItem::NetIncome, 1_200.0)
        .with(LineItem::DepreciationAndAmortization, 400.0)
        .with(LineItem::NetReceivables, 1_500.0)
        .with(LineItem::Inventory, 900.0)
        .with(LineItem::AccountPayables, 1_100.0)
        .with(LineItem::PropertyPlantEquipmentNet, 3_000.0);
    let statement = FinancialStatement::new("DEMO", vec![year]);

    // Statement forecast and free cash flows
    let projection = forecast(&statement, &ForecastConfig::default().with_growth_rate(0.06))?;
    let cash_flows = build_cash_flows(&projection)?;
    println!("{}", tables::forecast_frame(&projection)?);
    println!("{}", tables::cash_flow_frame(&cash_flows)?);

    // DCF and equity bridge
    let fcf: Vec<f64> = cash_flows.iter().map(|r| r.fcf).collect();
    let valuation = discount_cash_flows(&fcf, 0.085, 0.025)?;
    println!("{}", tables::dcf_frame(&fcf, &valuation)?);
    let bridge = EquityBridge::new("DEMO", valuation.total_value, 2_000.0, 500.0, 800.0)?;
    println!(
        "EV {:.0}, equity {:.0}, implied price {:.2}\n",
        valuation.total_value, bridge.equity_value, bridge.implied_price
    );

    // LBO at 9x entry, exit at 8x with 5% EBITDA growth
    let ebitda = 1_800.0;
    let deal = LboInputs::new(9.0 * ebitda, ebitda)
        .with_ebitda_growth(0.05)
        .with_paydown(vec![500.0; 5]);
    let lbo = evaluate_lbo(&deal)?;
    println!("{}", tables::lbo_frame(&lbo)?);
    println!("MOIC {:.2}x, IRR {:.1}%\n", lbo.moic, lbo.irr * 100.0);

    // Option on a synthetic price path
    let closes: Vec<f64> = (0..60)
        .map(|i| 100.0 * (1.0 + 0.01 * (f64::from(i) * 0.7).sin()))
        .collect();
    let sigma = historical_volatility(&closes).unwrap_or(0.25);
    let call = black_scholes(100.0, 105.0, 0.25, 0.04, sigma, OptionKind::Call)?;
    println!(
        "σ = {:.1}%: call {:.2}, delta {:.3}, vega {:.2}",
        sigma * 100.0,
        call.price,
        call.delta,
        call.vega
    );

    Ok(())
}
