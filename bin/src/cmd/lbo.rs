//! LBO command implementation.

use crate::args::OutputFormat;
use crate::output::{banner, money, pct, print_frame, print_json};
use anyhow::{Result, bail};
use tasador::model::{LboInputs, LboResult, evaluate_lbo};
use tasador::tables;

/// Entry inputs from either EBITDA or revenue and margin.
pub(crate) fn inputs(
    price: f64,
    ebitda: Option<f64>,
    revenue_margin: Option<(f64, f64)>,
) -> Result<LboInputs> {
    match (ebitda, revenue_margin) {
        (Some(ebitda), _) => Ok(LboInputs::new(price, ebitda)),
        (None, Some((revenue, margin))) => Ok(LboInputs::from_margin(price, revenue, margin)),
        (None, None) => bail!("pass --ebitda, or --revenue with --margin"),
    }
}

/// Evaluate a buyout without touching the network.
pub(crate) fn run(inputs: &LboInputs, format: OutputFormat) -> Result<()> {
    let result = evaluate_lbo(inputs)?;
    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            banner("Leveraged Buyout");
            println!("Purchase price:   {}", money(inputs.purchase_price));
            println!(
                "Financing:        {} debt at {}",
                pct(inputs.debt_fraction),
                pct(inputs.interest_rate)
            );
            println!("Exit multiple:    {:.1}x", inputs.exit_multiple);
            println!();
            render(&result)
        }
    }
}

pub(crate) fn render(result: &LboResult) -> Result<()> {
    print_frame("DEBT SCHEDULE", tables::lbo_frame(result))?;
    println!("{:<24} {:>16}", "Debt", money(result.debt));
    println!("{:<24} {:>16}", "Equity", money(result.equity));
    println!("{:<24} {:>16}", "Exit EBITDA", money(result.exit_ebitda));
    println!("{:<24} {:>16}", "Exit EV", money(result.exit_ev));
    println!("{:<24} {:>16}", "Remaining debt", money(result.remaining_debt));
    println!("{:<24} {:>16}", "Equity at exit", money(result.equity_at_exit));
    println!("{:<24} {:>16}", "Total interest", money(result.total_interest()));
    println!("{:<24} {:>15.2}x", "MOIC", result.moic);
    println!("{:<24} {:>16}", "IRR", pct(result.irr));
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_margin_inputs() {
        // 25% margin on 1000 revenue, 8x exit, no growth
        let result = evaluate_lbo(&inputs(1000.0, None, Some((1000.0, 0.25))).unwrap()).unwrap();
        assert_relative_eq!(result.debt, 600.0);
        assert_relative_eq!(result.equity, 400.0);
        assert_relative_eq!(result.exit_ev, 2000.0);
        assert_relative_eq!(result.irr, 3.5_f64.powf(0.2) - 1.0, max_relative = 1e-9);
    }

    #[test]
    fn test_ebitda_wins() {
        let i = inputs(1000.0, Some(100.0), None).unwrap();
        assert_relative_eq!(i.entry_ebitda, 100.0);
        assert!(inputs(1000.0, None, None).is_err());
    }
}
