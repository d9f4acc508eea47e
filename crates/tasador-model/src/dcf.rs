//! Discounted cash flow valuation.

use serde::{Deserialize, Serialize};
use tasador_core::{DomainError, Result};

/// Present value of a free cash flow path plus its terminal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfValuation {
    /// Discount rate applied.
    pub discount_rate: f64,
    /// Perpetual growth after the last forecast year.
    pub terminal_growth: f64,
    /// `FCF[i] / (1 + wacc)^i` for i = 1..=N.
    pub discounted_fcf: Vec<f64>,
    /// Gordon-growth value at year N.
    pub terminal_value: f64,
    /// Terminal value discounted N years.
    pub discounted_terminal_value: f64,
    /// Sum of discounted FCF plus the discounted terminal value.
    pub total_value: f64,
}

impl DcfValuation {
    /// Sum of the discounted explicit-period cash flows.
    #[must_use]
    pub fn sum_discounted_fcf(&self) -> f64 {
        self.discounted_fcf.iter().sum()
    }

    /// Share of the total value coming from the terminal value.
    #[must_use]
    pub fn terminal_share(&self) -> f64 {
        self.discounted_terminal_value / self.total_value
    }
}

/// Discount `fcf` (years 1..=N) at `wacc` with a perpetual growth tail.
///
/// ```text
/// TV    = FCF[N] * (1 + g) / (wacc - g)
/// total = Σ FCF[i] / (1 + wacc)^i + TV / (1 + wacc)^N
/// ```
///
/// # Errors
///
/// - [`DomainError::InvalidHorizon`] when `fcf` is empty
/// - [`DomainError::TerminalGrowthNotBelowDiscountRate`] when `wacc <= g`
/// - [`DomainError::InvalidInput`] for non-finite inputs or `wacc <= -1`
pub fn discount_cash_flows(fcf: &[f64], wacc: f64, terminal_growth: f64) -> Result<DcfValuation> {
    let Some(&last) = fcf.last() else {
        return Err(DomainError::InvalidHorizon(0).into());
    };
    if !wacc.is_finite() || !terminal_growth.is_finite() || fcf.iter().any(|x| !x.is_finite()) {
        return Err(DomainError::InvalidInput("non-finite DCF input".to_string()).into());
    }
    if wacc <= -1.0 {
        return Err(DomainError::InvalidInput(format!("discount rate {wacc} <= -100%")).into());
    }
    if wacc <= terminal_growth {
        return Err(DomainError::TerminalGrowthNotBelowDiscountRate {
            discount_rate: wacc,
            growth: terminal_growth,
        }
        .into());
    }

    let factor = 1.0 + wacc;
    let discounted_fcf: Vec<f64> = fcf
        .iter()
        .zip(1..)
        .map(|(cf, year)| cf / factor.powi(year))
        .collect();

    let horizon = i32::try_from(fcf.len())
        .map_err(|_| DomainError::InvalidHorizon(fcf.len()))?;
    let terminal_value = last * (1.0 + terminal_growth) / (wacc - terminal_growth);
    let discounted_terminal_value = terminal_value / factor.powi(horizon);
    let total_value = discounted_fcf.iter().sum::<f64>() + discounted_terminal_value;

    Ok(DcfValuation {
        discount_rate: wacc,
        terminal_growth,
        discounted_fcf,
        terminal_value,
        discounted_terminal_value,
        total_value,
    })
}

/// Flat-growth FCF path: `last_fcf * (1 + growth)^i` for i = 1..=years.
#[must_use]
pub fn project_fcf(last_fcf: f64, growth: f64, years: usize) -> Vec<f64> {
    std::iter::successors(Some(last_fcf * (1.0 + growth)), |prev| {
        Some(prev * (1.0 + growth))
    })
    .take(years)
    .collect()
}

/// Simple-mode DCF: project the last FCF at a flat rate, then discount.
///
/// # Errors
///
/// See [`discount_cash_flows`]. A zero `years` is an invalid horizon.
pub fn simple_dcf(
    last_fcf: f64,
    fcf_growth: f64,
    wacc: f64,
    terminal_growth: f64,
    years: usize,
) -> Result<DcfValuation> {
    discount_cash_flows(&project_fcf(last_fcf, fcf_growth, years), wacc, terminal_growth)
}

/// Enterprise value to per-share equity value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityBridge {
    /// DCF enterprise value.
    pub enterprise_value: f64,
    /// Total debt.
    pub total_debt: f64,
    /// Cash and cash equivalents.
    pub cash: f64,
    /// `EV - debt + cash`.
    pub equity_value: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
    /// Equity value per share.
    pub implied_price: f64,
}

impl EquityBridge {
    /// Bridge `enterprise_value` to an implied share price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPositiveShares`] when `shares_outstanding`
    /// is not positive.
    pub fn new(
        symbol: &str,
        enterprise_value: f64,
        total_debt: f64,
        cash: f64,
        shares_outstanding: f64,
    ) -> Result<Self> {
        if shares_outstanding.is_nan() || shares_outstanding <= 0.0 {
            return Err(DomainError::NonPositiveShares {
                symbol: symbol.to_string(),
                shares: shares_outstanding,
            }
            .into());
        }
        let equity_value = enterprise_value - total_debt + cash;
        Ok(Self {
            enterprise_value,
            total_debt,
            cash,
            equity_value,
            shares_outstanding,
            implied_price: equity_value / shares_outstanding,
        })
    }

    /// Upside of the implied price over `market_price`, as a decimal.
    #[must_use]
    pub fn upside(&self, market_price: f64) -> Option<f64> {
        (market_price > 0.0).then(|| self.implied_price / market_price - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tasador_core::{ErrorKind, TasadorError};

    #[test]
    fn test_reference_valuation() {
        let v = discount_cash_flows(&[100.0; 5], 0.08, 0.03).unwrap();
        assert_relative_eq!(v.terminal_value, 2060.0, max_relative = 1e-12);
        assert_relative_eq!(v.sum_discounted_fcf(), 399.271_003_707_808_4, max_relative = 1e-12);
        assert_relative_eq!(
            v.discounted_terminal_value,
            1_402.001_385_889_531,
            max_relative = 1e-12
        );
        assert_relative_eq!(v.total_value, 1_801.272_389_597_339_5, max_relative = 1e-12);
        assert_eq!(v.discounted_fcf.len(), 5);
        assert_relative_eq!(v.discounted_fcf[0], 100.0 / 1.08);
    }

    #[test]
    fn test_deterministic() {
        let a = discount_cash_flows(&[100.0; 5], 0.08, 0.03).unwrap();
        let b = discount_cash_flows(&[100.0; 5], 0.08, 0.03).unwrap();
        assert_eq!(a.total_value.to_bits(), b.total_value.to_bits());
    }

    #[test]
    fn test_rejects_growth_at_or_above_wacc() {
        let err = discount_cash_flows(&[100.0; 5], 0.03, 0.03).unwrap_err();
        assert_eq!(
            err,
            TasadorError::Domain(DomainError::TerminalGrowthNotBelowDiscountRate {
                discount_rate: 0.03,
                growth: 0.03,
            })
        );
        let err = discount_cash_flows(&[100.0; 5], 0.03, 0.05).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_rejects_empty_and_non_finite() {
        assert!(matches!(
            discount_cash_flows(&[], 0.08, 0.03),
            Err(TasadorError::Domain(DomainError::InvalidHorizon(0)))
        ));
        assert!(discount_cash_flows(&[100.0, f64::NAN], 0.08, 0.03).is_err());
    }

    #[test]
    fn test_project_fcf() {
        let path = project_fcf(100.0, 0.1, 3);
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path[0], 110.0, max_relative = 1e-12);
        assert_relative_eq!(path[2], 133.1, max_relative = 1e-12);
        assert!(project_fcf(100.0, 0.1, 0).is_empty());
    }

    #[test]
    fn test_simple_dcf_matches_explicit_path() {
        let simple = simple_dcf(100.0, 0.0, 0.08, 0.03, 5).unwrap();
        let explicit = discount_cash_flows(&[100.0; 5], 0.08, 0.03).unwrap();
        assert_relative_eq!(simple.total_value, explicit.total_value, max_relative = 1e-12);
    }

    #[test]
    fn test_equity_bridge() {
        let bridge = EquityBridge::new("ACME", 1800.0, 300.0, 100.0, 50.0).unwrap();
        assert_relative_eq!(bridge.equity_value, 1600.0);
        assert_relative_eq!(bridge.implied_price, 32.0);
        assert_relative_eq!(bridge.upside(40.0).unwrap(), -0.2, max_relative = 1e-12);
        assert!(bridge.upside(0.0).is_none());
    }

    #[test]
    fn test_equity_bridge_needs_shares() {
        let err = EquityBridge::new("ACME", 1800.0, 300.0, 100.0, 0.0).unwrap_err();
        assert!(matches!(
            err,
            TasadorError::Domain(DomainError::NonPositiveShares { .. })
        ));
        assert!(EquityBridge::new("ACME", 1800.0, 300.0, 100.0, f64::NAN).is_err());
    }
}
