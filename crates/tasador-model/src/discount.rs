//! Discount rate: CAPM cost of equity, credit-spread cost of debt and WACC.

use serde::{Deserialize, Serialize};
use tasador_core::{DomainError, FinancialStatement, LineItem, MarketSnapshot, Result};

/// Default effective tax rate.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// One row of the interest-coverage to credit-spread table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditBucket {
    /// The bucket applies when coverage is strictly above this value.
    pub min_coverage: f64,
    /// Spread over the risk-free rate.
    pub spread: f64,
    /// Synthetic rating.
    pub rating: &'static str,
}

const fn bucket(min_coverage: f64, spread: f64, rating: &'static str) -> CreditBucket {
    CreditBucket {
        min_coverage,
        spread,
        rating,
    }
}

/// Synthetic rating table for large non-financial firms, strictly descending.
pub const CREDIT_SPREADS: [CreditBucket; 14] = [
    bucket(8.5, 0.0063, "AAA"),
    bucket(6.5, 0.0078, "AA"),
    bucket(5.5, 0.0098, "A+"),
    bucket(4.25, 0.0108, "A"),
    bucket(3.0, 0.0122, "A-"),
    bucket(2.5, 0.0156, "BBB"),
    bucket(2.25, 0.02, "BB+"),
    bucket(2.0, 0.024, "BB"),
    bucket(1.75, 0.0351, "B+"),
    bucket(1.5, 0.0421, "B"),
    bucket(1.25, 0.0515, "B-"),
    bucket(0.8, 0.082, "CCC"),
    bucket(0.65, 0.0864, "CC"),
    bucket(0.2, 0.1134, "C"),
];

/// Spread applied when coverage falls through every bucket.
pub const DEFAULT_SPREAD: CreditBucket = bucket(f64::NEG_INFINITY, 0.1512, "D");

/// Rating and spread for an interest coverage ratio.
///
/// The first bucket whose threshold `icr` exceeds wins. Infinite coverage
/// (no interest expense) lands in the top bucket; NaN falls through to `D`.
#[must_use]
pub fn credit_spread(icr: f64) -> CreditBucket {
    CREDIT_SPREADS
        .iter()
        .find(|b| icr > b.min_coverage)
        .copied()
        .unwrap_or(DEFAULT_SPREAD)
}

/// `(EBITDA - D&A) / interest expense`, or +∞ without interest expense.
#[must_use]
pub fn interest_coverage(ebitda: f64, depreciation: f64, interest_expense: f64) -> f64 {
    if interest_expense == 0.0 {
        f64::INFINITY
    } else {
        (ebitda - depreciation) / interest_expense
    }
}

/// CAPM: `rf + beta * (rm - rf)`.
#[must_use]
pub fn cost_of_equity(market: &MarketSnapshot) -> f64 {
    market.risk_free_rate + market.beta * (market.market_return - market.risk_free_rate)
}

/// Configuration for [`compute_wacc`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaccConfig {
    /// Effective tax rate (default: 0.21)
    pub tax_rate: f64,
}

impl Default for WaccConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

impl WaccConfig {
    /// Override the tax rate.
    #[must_use]
    pub const fn with_tax_rate(mut self, tax_rate: f64) -> Self {
        self.tax_rate = tax_rate;
        self
    }
}

/// Every intermediate of the WACC calculation.
///
/// `interest_coverage_ratio` is +∞ for a company with no interest expense,
/// which JSON renders as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRateProfile {
    /// Risk-free rate.
    pub risk_free_rate: f64,
    /// Equity beta.
    pub beta: f64,
    /// Expected market return.
    pub market_return: f64,
    /// CAPM cost of equity.
    pub cost_of_equity: f64,
    /// Operating income over interest expense.
    pub interest_coverage_ratio: f64,
    /// Synthetic rating from the coverage table.
    pub credit_rating: String,
    /// Spread over the risk-free rate.
    pub credit_spread: f64,
    /// Pre-tax cost of debt.
    pub cost_of_debt: f64,
    /// Effective tax rate.
    pub tax_rate: f64,
    /// `D / (D + E)` at book value.
    pub debt_weight: f64,
    /// `1 - debt_weight`.
    pub equity_weight: f64,
    /// Weighted average cost of capital.
    #[serde(rename = "WACC")]
    pub wacc: f64,
}

/// WACC from the latest statement year and a market snapshot.
///
/// ```text
/// ke   = rf + beta * (rm - rf)
/// kd   = rf + spread(ICR)
/// WACC = kd * (1 - t) * wd + ke * we
/// ```
///
/// # Errors
///
/// - [`tasador_core::DataError::MissingField`] when EBITDA, D&A, interest
///   expense, total debt or stockholders' equity is absent
/// - [`DomainError::ZeroCapital`] when debt plus equity is zero
/// - [`DomainError::InvalidInput`] for a tax rate outside `[0, 1]` or
///   non-finite market inputs
pub fn compute_wacc(
    statement: &FinancialStatement,
    market: &MarketSnapshot,
    config: &WaccConfig,
) -> Result<DiscountRateProfile> {
    if !(0.0..=1.0).contains(&config.tax_rate) {
        return Err(
            DomainError::InvalidInput(format!("tax rate {} outside [0, 1]", config.tax_rate))
                .into(),
        );
    }
    if ![market.risk_free_rate, market.market_return, market.beta]
        .iter()
        .all(|x| x.is_finite())
    {
        return Err(DomainError::InvalidInput(format!("non-finite market inputs {market:?}")).into());
    }

    let ebitda = statement.latest_value(LineItem::Ebitda)?;
    let depreciation = statement.latest_value(LineItem::DepreciationAndAmortization)?;
    let interest_expense = statement.latest_value(LineItem::InterestExpense)?;
    let total_debt = statement.latest_value(LineItem::TotalDebt)?;
    let total_equity = statement.latest_value(LineItem::TotalStockholdersEquity)?;

    let capital = total_debt + total_equity;
    if capital == 0.0 {
        return Err(DomainError::ZeroCapital {
            symbol: statement.symbol().to_string(),
        }
        .into());
    }

    let cost_of_equity = cost_of_equity(market);
    let interest_coverage_ratio = interest_coverage(ebitda, depreciation, interest_expense);
    let bucket = credit_spread(interest_coverage_ratio);
    let cost_of_debt = market.risk_free_rate + bucket.spread;

    let debt_weight = total_debt / capital;
    let equity_weight = 1.0 - debt_weight;
    let wacc =
        cost_of_debt * (1.0 - config.tax_rate) * debt_weight + cost_of_equity * equity_weight;

    tracing::debug!(
        symbol = statement.symbol(),
        rating = bucket.rating,
        wacc,
        "discount rate computed"
    );

    Ok(DiscountRateProfile {
        risk_free_rate: market.risk_free_rate,
        beta: market.beta,
        market_return: market.market_return,
        cost_of_equity,
        interest_coverage_ratio,
        credit_rating: bucket.rating.to_string(),
        credit_spread: bucket.spread,
        cost_of_debt,
        tax_rate: config.tax_rate,
        debt_weight,
        equity_weight,
        wacc,
    })
}
