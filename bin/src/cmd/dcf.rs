//! DCF command implementation.

use crate::args::OutputFormat;
use crate::output::{heading, money, pct, print_frame, print_json};
use anyhow::{Result, bail};
use serde::Serialize;
use tasador::model::{DcfValuation, EquityBridge, discount_cash_flows, project_fcf};
use tasador::tables;

/// Where the cash flows come from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FcfSource {
    /// FCF for years 1..=N as given.
    Explicit(Vec<f64>),
    /// The last FCF grown at a flat rate.
    Simple { last: f64, growth: f64, years: usize },
}

impl FcfSource {
    fn cash_flows(&self) -> Vec<f64> {
        match self {
            Self::Explicit(fcf) => fcf.clone(),
            Self::Simple {
                last,
                growth,
                years,
            } => project_fcf(*last, *growth, *years),
        }
    }
}

/// Balance sheet inputs for the equity bridge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BridgeInputs {
    pub(crate) debt: f64,
    pub(crate) cash: f64,
    pub(crate) shares: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DcfOutput {
    free_cash_flows: Vec<f64>,
    valuation: DcfValuation,
    equity_bridge: Option<EquityBridge>,
}

fn value(
    source: &FcfSource,
    wacc: f64,
    terminal_growth: f64,
    bridge: Option<BridgeInputs>,
) -> Result<DcfOutput> {
    let free_cash_flows = source.cash_flows();
    if free_cash_flows.is_empty() {
        bail!("no cash flows: pass --fcf or --last-fcf");
    }
    let valuation = discount_cash_flows(&free_cash_flows, wacc, terminal_growth)?;
    let equity_bridge = bridge
        .map(|b| EquityBridge::new("input", valuation.total_value, b.debt, b.cash, b.shares))
        .transpose()?;
    Ok(DcfOutput {
        free_cash_flows,
        valuation,
        equity_bridge,
    })
}

/// Discount a cash flow series without touching the network.
pub(crate) fn run(
    source: &FcfSource,
    wacc: f64,
    terminal_growth: f64,
    bridge: Option<BridgeInputs>,
    format: OutputFormat,
) -> Result<()> {
    let output = value(source, wacc, terminal_growth, bridge)?;
    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            crate::output::banner("Discounted Cash Flow");
            render(&output.free_cash_flows, &output.valuation)?;
            if let Some(b) = &output.equity_bridge {
                render_bridge(b, None);
            }
            Ok(())
        }
    }
}

pub(crate) fn render(free_cash_flows: &[f64], valuation: &DcfValuation) -> Result<()> {
    print_frame(
        &format!(
            "DCF (WACC {}, terminal growth {})",
            pct(valuation.discount_rate),
            pct(valuation.terminal_growth)
        ),
        tables::dcf_frame(free_cash_flows, valuation),
    )?;
    println!("{:<28} {:>16}", "Sum of discounted FCF", money(valuation.sum_discounted_fcf()));
    println!("{:<28} {:>16}", "Terminal value", money(valuation.terminal_value));
    println!(
        "{:<28} {:>16}",
        "Discounted terminal value",
        money(valuation.discounted_terminal_value)
    );
    println!("{}", "─".repeat(45));
    println!("{:<28} {:>16}", "Enterprise value", money(valuation.total_value));
    println!("Terminal value share: {}\n", pct(valuation.terminal_share()));
    Ok(())
}

pub(crate) fn render_bridge(bridge: &EquityBridge, market_price: Option<f64>) {
    heading("EQUITY BRIDGE");
    println!("{:<28} {:>16}", "Enterprise value", money(bridge.enterprise_value));
    println!("{:<28} {:>16}", "Less total debt", money(bridge.total_debt));
    println!("{:<28} {:>16}", "Plus cash", money(bridge.cash));
    println!("{:<28} {:>16}", "Equity value", money(bridge.equity_value));
    println!("{:<28} {:>16}", "Shares outstanding", money(bridge.shares_outstanding));
    println!("{:<28} {:>16.2}", "Implied price", bridge.implied_price);
    if let Some(price) = market_price {
        println!("{:<28} {:>16.2}", "Market price", price);
        if let Some(upside) = bridge.upside(price) {
            println!("{:<28} {:>16}", "Upside", pct(upside));
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_explicit_series() {
        let out = value(&FcfSource::Explicit(vec![100.0; 5]), 0.08, 0.03, None).unwrap();
        assert_relative_eq!(out.valuation.terminal_value, 2060.0, max_relative = 1e-12);
        assert_relative_eq!(out.valuation.total_value, 1801.2723895973395, max_relative = 1e-12);
        assert!(out.equity_bridge.is_none());
    }

    #[test]
    fn test_simple_series_with_bridge() {
        let source = FcfSource::Simple {
            last: 100.0,
            growth: 0.0,
            years: 5,
        };
        let bridge = BridgeInputs {
            debt: 300.0,
            cash: 100.0,
            shares: 10.0,
        };
        let out = value(&source, 0.08, 0.03, Some(bridge)).unwrap();
        assert_eq!(out.free_cash_flows, vec![100.0; 5]);
        let b = out.equity_bridge.unwrap();
        assert_relative_eq!(b.equity_value, 1801.2723895973395 - 200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(value(&FcfSource::Explicit(Vec::new()), 0.08, 0.03, None).is_err());
        assert!(value(&FcfSource::Explicit(vec![100.0]), 0.03, 0.03, None).is_err());
    }
}
