//! Forecast command implementation.

use crate::args::OutputFormat;
use crate::output::{banner, pct, print_frame, print_json};
use anyhow::Result;
use serde::Serialize;
use tasador::ValuationRequest;
use tasador::fmp::FmpClient;
use tasador::model::{CashFlowRecord, StatementForecast, build_cash_flows, forecast};
use tasador::tables;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ForecastOutput<'a> {
    forecast: &'a StatementForecast,
    cash_flows: &'a [CashFlowRecord],
}

/// Forecast the statements of `request.ticker` and build its free cash flows.
pub(crate) async fn run(request: ValuationRequest, format: OutputFormat) -> Result<()> {
    let client = FmpClient::from_env()?;
    let company = client
        .company_data(&request.symbol(), request.history_years)
        .await?;

    let projection = forecast(&company.statement(), &request.forecast_config())?;
    let cash_flows = build_cash_flows(&projection)?;

    match format {
        OutputFormat::Json => print_json(&ForecastOutput {
            forecast: &projection,
            cash_flows: &cash_flows,
        }),
        OutputFormat::Text => {
            banner("Statement Forecast");
            println!("Ticker:   {}", projection.symbol);
            println!("Base:     {}", projection.base_period);
            println!();
            render_forecast(&projection)?;
            render_cash_flows(&cash_flows)
        }
    }
}

pub(crate) fn render_forecast(projection: &StatementForecast) -> Result<()> {
    print_frame(
        &format!(
            "FORECAST ({} years, revenue growth {})",
            projection.horizon,
            pct(projection.growth_rate)
        ),
        tables::forecast_frame(projection),
    )
}

pub(crate) fn render_cash_flows(cash_flows: &[CashFlowRecord]) -> Result<()> {
    print_frame("FREE CASH FLOW", tables::cash_flow_frame(cash_flows))
}
