//! Report sections as Polars frames.
//!
//! Every table is built from an already-computed section, so the frames only
//! reshape values; nothing is recomputed here. Columns use snake_case names.

use polars::prelude::*;
use tasador_comps::{Comparables, ImpliedValuation, Multiple};
use tasador_model::{
    CashFlowRecord, DcfValuation, DiscountRateProfile, LboResult, StatementForecast,
};

fn years(n: usize, first: u32) -> Vec<u32> {
    (first..).take(n).collect()
}

fn snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Revenue and every projected item, one row per year (0 = base year).
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn forecast_frame(forecast: &StatementForecast) -> PolarsResult<DataFrame> {
    let mut columns = vec![
        Column::new("year".into(), years(forecast.revenue.len(), 0)),
        Column::new("revenue".into(), forecast.revenue.clone()),
    ];
    for (item, series) in &forecast.series {
        columns.push(Column::new(snake(item.as_str()).into(), series.values.clone()));
    }
    DataFrame::new(columns)
}

/// The free cash flow build.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn cash_flow_frame(records: &[CashFlowRecord]) -> PolarsResult<DataFrame> {
    let col = |f: fn(&CashFlowRecord) -> f64| records.iter().map(f).collect::<Vec<f64>>();
    df! {
        "year" => years(records.len(), 1),
        "net_income" => col(|r| r.net_income),
        "inc_depreciation" => col(|r| r.inc_depreciation),
        "inc_receivables" => col(|r| r.inc_receivables),
        "inc_inventory" => col(|r| r.inc_inventory),
        "inc_payables" => col(|r| r.inc_payables),
        "cf_operations" => col(|r| r.cf_operations),
        "capex" => col(|r| r.capex),
        "fcf" => col(|r| r.fcf),
    }
}

/// WACC inputs as metric/value rows.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn discount_rate_frame(profile: &DiscountRateProfile) -> PolarsResult<DataFrame> {
    let rows = [
        ("risk_free_rate", profile.risk_free_rate),
        ("beta", profile.beta),
        ("market_return", profile.market_return),
        ("cost_of_equity", profile.cost_of_equity),
        ("interest_coverage_ratio", profile.interest_coverage_ratio),
        ("credit_spread", profile.credit_spread),
        ("cost_of_debt", profile.cost_of_debt),
        ("tax_rate", profile.tax_rate),
        ("debt_weight", profile.debt_weight),
        ("equity_weight", profile.equity_weight),
        ("wacc", profile.wacc),
    ];
    df! {
        "metric" => rows.iter().map(|(m, _)| *m).collect::<Vec<_>>(),
        "value" => rows.iter().map(|(_, v)| *v).collect::<Vec<_>>(),
    }
}

/// Projected and discounted free cash flow per year.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn dcf_frame(free_cash_flows: &[f64], valuation: &DcfValuation) -> PolarsResult<DataFrame> {
    df! {
        "year" => years(free_cash_flows.len(), 1),
        "fcf" => free_cash_flows.to_vec(),
        "discounted_fcf" => valuation.discounted_fcf.clone(),
    }
}

/// The debt schedule of a buyout.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn lbo_frame(lbo: &LboResult) -> PolarsResult<DataFrame> {
    let s = &lbo.schedule;
    df! {
        "year" => years(s.len(), 1),
        "ebitda" => s.iter().map(|y| y.ebitda).collect::<Vec<_>>(),
        "opening_debt" => s.iter().map(|y| y.opening_debt).collect::<Vec<_>>(),
        "interest" => s.iter().map(|y| y.interest).collect::<Vec<_>>(),
        "paydown" => s.iter().map(|y| y.paydown).collect::<Vec<_>>(),
        "closing_debt" => s.iter().map(|y| y.closing_debt).collect::<Vec<_>>(),
    }
}

/// One row per peer; undefined values are null.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn comparables_frame(comps: &Comparables) -> PolarsResult<DataFrame> {
    let rows = &comps.rows;
    let col = |m: Multiple| rows.iter().map(|r| r.multiple(m)).collect::<Vec<Option<f64>>>();
    df! {
        "ticker" => rows.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        "market_cap" => rows.iter().map(|r| r.market_cap).collect::<Vec<_>>(),
        "enterprise_value" => rows.iter().map(|r| r.enterprise_value).collect::<Vec<_>>(),
        "pe" => col(Multiple::PriceToEarnings),
        "ev_ebitda" => col(Multiple::EvToEbitda),
        "ev_revenue" => col(Multiple::EvToRevenue),
        "pb" => col(Multiple::PriceToBook),
    }
}

/// Mean, median and count of each multiple.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn summary_frame(comps: &Comparables) -> PolarsResult<DataFrame> {
    let stats: Vec<_> = Multiple::ALL
        .iter()
        .map(|m| (m.label(), comps.summary.get(*m)))
        .collect();
    df! {
        "multiple" => stats.iter().map(|(l, _)| *l).collect::<Vec<_>>(),
        "mean" => stats.iter().map(|(_, s)| s.mean).collect::<Vec<_>>(),
        "median" => stats.iter().map(|(_, s)| s.median).collect::<Vec<_>>(),
        "count" => stats
            .iter()
            .map(|(_, s)| u32::try_from(s.count).unwrap_or(u32::MAX))
            .collect::<Vec<_>>(),
    }
}

/// Prices implied by the peer medians.
///
/// # Errors
///
/// Returns a Polars error if the frame cannot be assembled.
pub fn implied_frame(implied: &[ImpliedValuation]) -> PolarsResult<DataFrame> {
    df! {
        "multiple" => implied.iter().map(|v| v.multiple.label()).collect::<Vec<_>>(),
        "peer_median" => implied.iter().map(|v| v.peer_median).collect::<Vec<_>>(),
        "subject_metric" => implied.iter().map(|v| v.subject_metric).collect::<Vec<_>>(),
        "implied_price" => implied.iter().map(|v| v.implied_price).collect::<Vec<_>>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use tasador_comps::{PeerFinancials, build_comparables};
    use tasador_core::{FinancialStatement, LineItem, StatementYear};
    use tasador_model::{
        ForecastConfig, LboInputs, build_cash_flows, discount_cash_flows, evaluate_lbo, forecast,
    };

    fn statement() -> FinancialStatement {
        let year = StatementYear::new("2024-12-31")
            .with(LineItem::Revenue, 1000.0)
            .with(LineItem::NetIncome, 100.0)
            .with(LineItem::DepreciationAndAmortization, 50.0)
            .with(LineItem::NetReceivables, 150.0)
            .with(LineItem::Inventory, 80.0)
            .with(LineItem::AccountPayables, 120.0)
            .with(LineItem::PropertyPlantEquipmentNet, 400.0);
        FinancialStatement::new("ACME", vec![year])
    }

    #[test]
    fn test_snake_case_names() {
        assert_eq!(snake("netIncome"), "net_income");
        assert_eq!(snake("propertyPlantEquipmentNet"), "property_plant_equipment_net");
        assert_eq!(snake("revenue"), "revenue");
    }

    #[test]
    fn test_forecast_and_cash_flow_frames() {
        let f = forecast(&statement(), &ForecastConfig::default().with_growth_rate(0.1)).unwrap();
        let frame = forecast_frame(&f).unwrap();
        assert_eq!(frame.height(), 6);
        assert_eq!(frame.width(), 2 + f.series.len());
        let revenue = frame.column("revenue").unwrap().as_materialized_series().f64().unwrap();
        assert_relative_eq!(revenue.get(1).unwrap(), 1100.0, max_relative = 1e-12);

        let records = build_cash_flows(&f).unwrap();
        let frame = cash_flow_frame(&records).unwrap();
        assert_eq!(frame.height(), 5);
        let fcf = frame.column("fcf").unwrap().as_materialized_series().f64().unwrap();
        assert_relative_eq!(fcf.get(0).unwrap(), records[0].fcf);
    }

    #[test]
    fn test_dcf_and_lbo_frames() {
        let fcf = vec![100.0; 5];
        let valuation = discount_cash_flows(&fcf, 0.08, 0.03).unwrap();
        let frame = dcf_frame(&fcf, &valuation).unwrap();
        assert_eq!(frame.shape(), (5, 3));
        let discounted = frame
            .column("discounted_fcf")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap();
        assert_relative_eq!(discounted.get(0).unwrap(), 100.0 / 1.08, max_relative = 1e-12);

        let lbo = evaluate_lbo(&LboInputs::new(1000.0, 100.0)).unwrap();
        let frame = lbo_frame(&lbo).unwrap();
        assert_eq!(frame.shape(), (5, 6));
    }

    #[test]
    fn test_comparables_frames_keep_nulls() {
        let financials: HashMap<String, PeerFinancials> = [
            PeerFinancials::new("AAA")
                .with_price(10.0)
                .with_market_cap(1000.0)
                .with_net_income(50.0),
            PeerFinancials::new("BBB").with_price(20.0).with_market_cap(2000.0),
        ]
        .into_iter()
        .map(|f| (f.ticker.clone(), f))
        .collect();
        let comps = build_comparables(&["AAA".to_string(), "BBB".to_string()], &financials);

        let frame = comparables_frame(&comps).unwrap();
        assert_eq!(frame.height(), 2);
        assert_eq!(frame.column("pe").unwrap().null_count(), 1);
        assert_eq!(frame.column("ev_ebitda").unwrap().null_count(), 2);

        let summary = summary_frame(&comps).unwrap();
        assert_eq!(summary.height(), 4);
        let median = summary.column("median").unwrap().as_materialized_series().f64().unwrap();
        assert_relative_eq!(median.get(0).unwrap(), 20.0);
        assert!(median.get(1).is_none());
    }
}
