//! Leveraged buyout returns.
//!
//! The sponsor funds `purchase_price * (1 - debt_fraction)` with equity,
//! grows EBITDA at a flat rate and exits at a multiple of final-year EBITDA.
//! Debt is only repaid through an explicit paydown schedule.

use serde::{Deserialize, Serialize};
use tasador_core::{DomainError, Result};

/// Default share of the purchase price funded with debt.
pub const DEFAULT_DEBT_FRACTION: f64 = 0.6;
/// Default interest rate on acquisition debt.
pub const DEFAULT_INTEREST_RATE: f64 = 0.08;
/// Default exit EV/EBITDA multiple.
pub const DEFAULT_EXIT_MULTIPLE: f64 = 8.0;
/// Default holding period in years.
pub const DEFAULT_HOLDING_YEARS: usize = 5;

/// Deal assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LboInputs {
    /// Enterprise purchase price.
    pub purchase_price: f64,
    /// Share of the price funded with debt (default: 0.6)
    pub debt_fraction: f64,
    /// Annual interest rate on the debt (default: 0.08)
    pub interest_rate: f64,
    /// EBITDA at entry.
    pub entry_ebitda: f64,
    /// Annual EBITDA growth (default: 0)
    pub ebitda_growth: f64,
    /// EV/EBITDA at exit (default: 8)
    pub exit_multiple: f64,
    /// Holding period in years (default: 5)
    pub horizon: usize,
    /// Debt repaid in each year, starting with year 1. Missing years repay nothing.
    #[serde(default)]
    pub paydown: Vec<f64>,
}

impl LboInputs {
    /// Deal with the default structure.
    #[must_use]
    pub const fn new(purchase_price: f64, entry_ebitda: f64) -> Self {
        Self {
            purchase_price,
            debt_fraction: DEFAULT_DEBT_FRACTION,
            interest_rate: DEFAULT_INTEREST_RATE,
            entry_ebitda,
            ebitda_growth: 0.0,
            exit_multiple: DEFAULT_EXIT_MULTIPLE,
            horizon: DEFAULT_HOLDING_YEARS,
            paydown: Vec::new(),
        }
    }

    /// Deal whose entry EBITDA is `revenue * margin`.
    #[must_use]
    pub const fn from_margin(purchase_price: f64, revenue: f64, margin: f64) -> Self {
        Self::new(purchase_price, revenue * margin)
    }

    /// Set the debt fraction.
    #[must_use]
    pub const fn with_debt_fraction(mut self, debt_fraction: f64) -> Self {
        self.debt_fraction = debt_fraction;
        self
    }

    /// Set the interest rate.
    #[must_use]
    pub const fn with_interest_rate(mut self, interest_rate: f64) -> Self {
        self.interest_rate = interest_rate;
        self
    }

    /// Set the EBITDA growth rate.
    #[must_use]
    pub const fn with_ebitda_growth(mut self, ebitda_growth: f64) -> Self {
        self.ebitda_growth = ebitda_growth;
        self
    }

    /// Set the exit multiple.
    #[must_use]
    pub const fn with_exit_multiple(mut self, exit_multiple: f64) -> Self {
        self.exit_multiple = exit_multiple;
        self
    }

    /// Set the holding period.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the yearly debt paydown schedule.
    #[must_use]
    pub fn with_paydown(mut self, paydown: Vec<f64>) -> Self {
        self.paydown = paydown;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(DomainError::InvalidHorizon(0).into());
        }
        let scalars = [
            self.purchase_price,
            self.debt_fraction,
            self.interest_rate,
            self.entry_ebitda,
            self.ebitda_growth,
            self.exit_multiple,
        ];
        if scalars.iter().any(|x| !x.is_finite()) {
            return Err(DomainError::InvalidInput("non-finite LBO input".to_string()).into());
        }
        if self.debt_fraction < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "debt fraction {} is negative",
                self.debt_fraction
            ))
            .into());
        }
        if self.paydown.len() > self.horizon {
            return Err(DomainError::InvalidInput(format!(
                "paydown schedule has {} years for a {}-year hold",
                self.paydown.len(),
                self.horizon
            ))
            .into());
        }
        if self.paydown.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(
                DomainError::InvalidInput("paydown amounts must be non-negative".to_string())
                    .into(),
            );
        }
        Ok(())
    }
}

/// One year of the debt schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LboYear {
    /// Year of the hold, starting at 1.
    pub year: usize,
    /// Projected EBITDA.
    pub ebitda: f64,
    /// Debt at the start of the year.
    pub opening_debt: f64,
    /// `opening_debt * interest_rate`.
    pub interest: f64,
    /// Debt repaid during the year.
    pub paydown: f64,
    /// Debt at the end of the year.
    pub closing_debt: f64,
}

/// Sponsor returns for a deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LboResult {
    /// Acquisition debt.
    pub debt: f64,
    /// Sponsor equity.
    pub equity: f64,
    /// Year-by-year EBITDA and debt.
    pub schedule: Vec<LboYear>,
    /// EBITDA in the exit year.
    pub exit_ebitda: f64,
    /// `exit_ebitda * exit_multiple`.
    pub exit_ev: f64,
    /// Debt outstanding at exit.
    pub remaining_debt: f64,
    /// `exit_ev - remaining_debt`.
    pub equity_at_exit: f64,
    /// Multiple on invested capital.
    pub moic: f64,
    /// Annualized sponsor return; -1 is a total loss.
    pub irr: f64,
}

impl LboResult {
    /// Interest paid over the hold.
    #[must_use]
    pub fn total_interest(&self) -> f64 {
        self.schedule.iter().map(|y| y.interest).sum()
    }
}

/// Evaluate a buyout.
///
/// ```text
/// debt   = price * debt_fraction
/// equity = price - debt
/// exitEV = EBITDA[N] * exit_multiple
/// IRR    = ((exitEV - remaining_debt) / equity)^(1/N) - 1
/// ```
///
/// Paydown in any year is capped at the debt outstanding.
///
/// # Errors
///
/// - [`DomainError::InvalidHorizon`] for a zero holding period
/// - [`DomainError::NonPositiveEquity`] when debt covers the whole price
/// - [`DomainError::InvalidInput`] for non-finite inputs, a negative debt
///   fraction or a malformed paydown schedule
pub fn evaluate_lbo(inputs: &LboInputs) -> Result<LboResult> {
    inputs.validate()?;

    let debt = inputs.purchase_price * inputs.debt_fraction;
    let equity = inputs.purchase_price - debt;
    if equity <= 0.0 {
        return Err(DomainError::NonPositiveEquity { equity }.into());
    }

    let mut schedule = Vec::with_capacity(inputs.horizon);
    let mut ebitda = inputs.entry_ebitda;
    let mut outstanding = debt;
    for year in 1..=inputs.horizon {
        ebitda *= 1.0 + inputs.ebitda_growth;
        let opening_debt = outstanding;
        let paydown = inputs
            .paydown
            .get(year - 1)
            .copied()
            .unwrap_or_default()
            .min(opening_debt);
        outstanding = opening_debt - paydown;
        schedule.push(LboYear {
            year,
            ebitda,
            opening_debt,
            interest: opening_debt * inputs.interest_rate,
            paydown,
            closing_debt: outstanding,
        });
    }

    let exit_ebitda = ebitda;
    let exit_ev = exit_ebitda * inputs.exit_multiple;
    let remaining_debt = outstanding;
    let equity_at_exit = exit_ev - remaining_debt;
    let moic = equity_at_exit / equity;
    let irr = if equity_at_exit <= 0.0 {
        -1.0
    } else {
        moic.powf(1.0 / inputs.horizon as f64) - 1.0
    };

    Ok(LboResult {
        debt,
        equity,
        schedule,
        exit_ebitda,
        exit_ev,
        remaining_debt,
        equity_at_exit,
        moic,
        irr,
    })
}
