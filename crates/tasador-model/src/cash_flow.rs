//! Free cash flow from a statement forecast.
//!
//! For each forecast year, with `prev` the year before (the base year for the
//! first forecast year):
//!
//! ```text
//! CFOperations = netIncome + ΔD&A - Δreceivables - Δinventory + Δpayables
//! CAPEX        = (PPE[year] - PPE[prev]) + D&A[year]
//! FCF          = CFOperations + CAPEX
//! ```

use crate::forecast::StatementForecast;
use serde::{Deserialize, Serialize};
use tasador_core::{DomainError, LineItem, Result};

/// Derived cash flow for one forecast year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowRecord {
    /// Forecast year, starting at 1.
    pub year: usize,
    /// Forecast net income.
    pub net_income: f64,
    /// Change in depreciation and amortization.
    pub inc_depreciation: f64,
    /// Change in receivables.
    pub inc_receivables: f64,
    /// Change in inventory.
    pub inc_inventory: f64,
    /// Change in payables.
    pub inc_payables: f64,
    /// Cash flow from operations.
    #[serde(rename = "CFOperations")]
    pub cf_operations: f64,
    /// Change in net PP&E plus the depreciation add-back.
    #[serde(rename = "CAPEX")]
    pub capex: f64,
    /// Free cash flow.
    #[serde(rename = "FCF")]
    pub fcf: f64,
}

struct Paths<'a> {
    net_income: &'a [f64],
    depreciation: &'a [f64],
    receivables: &'a [f64],
    inventory: &'a [f64],
    payables: &'a [f64],
    ppe: &'a [f64],
}

/// Build one [`CashFlowRecord`] per forecast year, in year order.
///
/// # Errors
///
/// - [`tasador_core::DataError::MissingField`] when a series the build needs
///   was not forecast
/// - [`DomainError::InvalidHorizon`] when a series is shorter than the
///   forecast horizon
pub fn build_cash_flows(forecast: &StatementForecast) -> Result<Vec<CashFlowRecord>> {
    let paths = Paths {
        net_income: &forecast.series(LineItem::NetIncome)?.values,
        depreciation: &forecast.series(LineItem::DepreciationAndAmortization)?.values,
        receivables: &forecast.series(LineItem::NetReceivables)?.values,
        inventory: &forecast.series(LineItem::Inventory)?.values,
        payables: &forecast.series(LineItem::AccountPayables)?.values,
        ppe: &forecast.series(LineItem::PropertyPlantEquipmentNet)?.values,
    };

    let horizon = forecast.horizon;
    let all = [
        paths.net_income,
        paths.depreciation,
        paths.receivables,
        paths.inventory,
        paths.payables,
        paths.ppe,
    ];
    if all.iter().any(|path| path.len() <= horizon) {
        return Err(DomainError::InvalidHorizon(horizon).into());
    }

    let delta = |path: &[f64], year: usize| path[year] - path[year - 1];

    Ok((1..=horizon)
        .map(|year| {
            let net_income = paths.net_income[year];
            let inc_depreciation = delta(paths.depreciation, year);
            let inc_receivables = delta(paths.receivables, year);
            let inc_inventory = delta(paths.inventory, year);
            let inc_payables = delta(paths.payables, year);

            let cf_operations =
                net_income + inc_depreciation - inc_receivables - inc_inventory + inc_payables;
            let capex = delta(paths.ppe, year) + paths.depreciation[year];

            CashFlowRecord {
                year,
                net_income,
                inc_depreciation,
                inc_receivables,
                inc_inventory,
                inc_payables,
                cf_operations,
                capex,
                fcf: cf_operations + capex,
            }
        })
        .collect())
}

/// The FCF column of `records`.
#[must_use]
pub fn free_cash_flows(records: &[CashFlowRecord]) -> Vec<f64> {
    records.iter().map(|r| r.fcf).collect()
}
