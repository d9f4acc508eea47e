//! Data types for FMP API responses.
//!
//! Provider schemas vary between companies and API versions, so every numeric
//! field is optional. A field the provider omitted (or sent as `null`) stays
//! `None` and is never read as zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tasador_core::{FinancialStatement, LineItem, StatementYear};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Reporting period (FY, Q1, ...).
    #[serde(default)]
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Cost of revenue (COGS).
    #[serde(default)]
    pub cost_of_revenue: Option<f64>,
    /// Gross profit.
    #[serde(default)]
    pub gross_profit: Option<f64>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<f64>,
    /// EBITDA.
    #[serde(default)]
    pub ebitda: Option<f64>,
    /// Depreciation and amortization.
    #[serde(default)]
    pub depreciation_and_amortization: Option<f64>,
    /// Interest expense.
    #[serde(default)]
    pub interest_expense: Option<f64>,
    /// Income before tax.
    #[serde(default)]
    pub income_before_tax: Option<f64>,
    /// Income tax expense.
    #[serde(default)]
    pub income_tax_expense: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
    /// Earnings per share (diluted).
    #[serde(default)]
    pub eps_diluted: Option<f64>,
    /// Weighted average shares outstanding.
    #[serde(default)]
    pub weighted_average_shs_out: Option<f64>,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Reporting period.
    #[serde(default)]
    pub period: String,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
    /// Net receivables.
    #[serde(default)]
    pub net_receivables: Option<f64>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Option<f64>,
    /// Net property, plant and equipment.
    #[serde(default)]
    pub property_plant_equipment_net: Option<f64>,
    /// Total assets.
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Accounts payable.
    #[serde(default)]
    pub account_payables: Option<f64>,
    /// Total liabilities.
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Reporting period.
    #[serde(default)]
    pub period: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure (negative for cash spent).
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

impl CashFlowStatement {
    /// Operating cash flow plus (negative) capital expenditure.
    ///
    /// Falls back to the reported free cash flow when either leg is missing.
    #[must_use]
    pub fn derived_free_cash_flow(&self) -> Option<f64> {
        match (self.operating_cash_flow, self.capital_expenditure) {
            (Some(ocf), Some(capex)) => Some(ocf + capex),
            _ => self.free_cash_flow,
        }
    }
}

/// Company profile from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Equity beta.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Market capitalization.
    #[serde(default, alias = "mktCap")]
    pub market_cap: Option<f64>,
    /// Reporting currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange code.
    #[serde(default)]
    pub exchange: Option<String>,
    /// Sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
}

/// Enterprise value breakdown from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseValues {
    /// Period date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Share price used.
    #[serde(default)]
    pub stock_price: Option<f64>,
    /// Shares outstanding.
    #[serde(default)]
    pub number_of_shares: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub market_capitalization: Option<f64>,
    /// Cash subtracted in the bridge (reported as a positive amount).
    #[serde(default)]
    pub minus_cash_and_cash_equivalents: Option<f64>,
    /// Debt added in the bridge.
    #[serde(default)]
    pub add_total_debt: Option<f64>,
    /// Enterprise value.
    #[serde(default)]
    pub enterprise_value: Option<f64>,
}

/// One entry of the peer list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerEntry {
    /// Peer ticker symbol.
    pub symbol: String,
    /// Peer name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub mkt_cap: Option<f64>,
}

/// US treasury yields in percent, one record per day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreasuryRate {
    /// Observation date.
    pub date: String,
    /// 3-month yield.
    #[serde(default)]
    pub month3: Option<f64>,
    /// 1-year yield.
    #[serde(default)]
    pub year1: Option<f64>,
    /// 10-year yield.
    #[serde(default)]
    pub year10: Option<f64>,
    /// 30-year yield.
    #[serde(default)]
    pub year30: Option<f64>,
}

/// Historical price data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Everything fetched for one company in a single pass.
#[derive(Debug, Clone, Default)]
pub struct CompanyData {
    /// Ticker symbol.
    pub symbol: String,
    /// Income statements (most recent first).
    pub income_statements: Vec<IncomeStatement>,
    /// Balance sheets (most recent first).
    pub balance_sheets: Vec<BalanceSheet>,
    /// Cash flow statements (most recent first).
    pub cash_flows: Vec<CashFlowStatement>,
    /// Company profile, if the endpoint returned one.
    pub profile: Option<CompanyProfile>,
    /// Enterprise values (most recent first).
    pub enterprise_values: Vec<EnterpriseValues>,
}

impl CompanyData {
    /// Get the most recent income statement.
    #[must_use]
    pub fn latest_income(&self) -> Option<&IncomeStatement> {
        self.income_statements.first()
    }

    /// Get the most recent balance sheet.
    #[must_use]
    pub fn latest_balance(&self) -> Option<&BalanceSheet> {
        self.balance_sheets.first()
    }

    /// Get the most recent cash flow statement.
    #[must_use]
    pub fn latest_cash_flow(&self) -> Option<&CashFlowStatement> {
        self.cash_flows.first()
    }

    /// Get the most recent enterprise value record.
    #[must_use]
    pub fn latest_enterprise_values(&self) -> Option<&EnterpriseValues> {
        self.enterprise_values.first()
    }

    /// Current share price from the profile, else the enterprise-value record.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.profile
            .as_ref()
            .and_then(|p| p.price)
            .or_else(|| self.latest_enterprise_values().and_then(|ev| ev.stock_price))
    }

    /// Market capitalization from the profile, else the enterprise-value record.
    #[must_use]
    pub fn market_cap(&self) -> Option<f64> {
        self.profile
            .as_ref()
            .and_then(|p| p.market_cap)
            .or_else(|| {
                self.latest_enterprise_values()
                    .and_then(|ev| ev.market_capitalization)
            })
    }

    /// Equity beta from the profile.
    #[must_use]
    pub fn beta(&self) -> Option<f64> {
        self.profile.as_ref().and_then(|p| p.beta)
    }

    /// Shares outstanding, reported or implied by market cap and price.
    #[must_use]
    pub fn shares_outstanding(&self) -> Option<f64> {
        if let Some(shares) = self
            .latest_enterprise_values()
            .and_then(|ev| ev.number_of_shares)
        {
            return Some(shares);
        }
        match (self.market_cap(), self.price()) {
            (Some(cap), Some(price)) if price != 0.0 => Some(cap / price),
            _ => None,
        }
    }

    /// Enterprise value, reported or rebuilt as market cap + debt - cash.
    #[must_use]
    pub fn enterprise_value(&self) -> Option<f64> {
        if let Some(ev) = self
            .latest_enterprise_values()
            .and_then(|ev| ev.enterprise_value)
        {
            return Some(ev);
        }
        let balance = self.latest_balance()?;
        Some(self.market_cap()? + balance.total_debt? - balance.cash_and_cash_equivalents?)
    }

    /// Most recent free cash flow (operating cash flow + capital expenditure).
    #[must_use]
    pub fn last_free_cash_flow(&self) -> Option<f64> {
        self.latest_cash_flow()
            .and_then(CashFlowStatement::derived_free_cash_flow)
    }

    /// Merge income statement, balance sheet and cash flow into one yearly
    /// statement keyed by the income statement's fiscal dates.
    ///
    /// Balance sheet and cash flow records are matched by date, falling back
    /// to the same position when no date matches.
    #[must_use]
    pub fn statement(&self) -> FinancialStatement {
        let years = self
            .income_statements
            .iter()
            .enumerate()
            .map(|(i, income)| {
                let balance = self
                    .balance_sheets
                    .iter()
                    .find(|b| b.date == income.date)
                    .or_else(|| self.balance_sheets.get(i));
                let cash = self
                    .cash_flows
                    .iter()
                    .find(|c| c.date == income.date)
                    .or_else(|| self.cash_flows.get(i));

                let mut year = StatementYear::new(income.date.clone());
                year.insert_opt(LineItem::Revenue, income.revenue);
                year.insert_opt(LineItem::NetIncome, income.net_income);
                year.insert_opt(
                    LineItem::DepreciationAndAmortization,
                    income.depreciation_and_amortization,
                );
                year.insert_opt(LineItem::Ebitda, income.ebitda);
                year.insert_opt(LineItem::InterestExpense, income.interest_expense);
                year.insert_opt(LineItem::IncomeTaxExpense, income.income_tax_expense);
                year.insert_opt(LineItem::IncomeBeforeTax, income.income_before_tax);

                if let Some(b) = balance {
                    year.insert_opt(LineItem::NetReceivables, b.net_receivables);
                    year.insert_opt(LineItem::Inventory, b.inventory);
                    year.insert_opt(LineItem::AccountPayables, b.account_payables);
                    year.insert_opt(
                        LineItem::PropertyPlantEquipmentNet,
                        b.property_plant_equipment_net,
                    );
                    year.insert_opt(LineItem::TotalDebt, b.total_debt);
                    year.insert_opt(
                        LineItem::TotalStockholdersEquity,
                        b.total_stockholders_equity,
                    );
                    year.insert_opt(
                        LineItem::CashAndCashEquivalents,
                        b.cash_and_cash_equivalents,
                    );
                }
                if let Some(c) = cash {
                    year.insert_opt(LineItem::OperatingCashFlow, c.operating_cash_flow);
                    year.insert_opt(LineItem::CapitalExpenditure, c.capital_expenditure);
                }
                year
            })
            .collect();

        FinancialStatement::new(self.symbol.clone(), years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_and_null_fields_stay_absent() {
        let json = r#"{
            "date": "2024-12-31",
            "symbol": "ACME",
            "period": "FY",
            "revenue": 1000.0,
            "netIncome": null
        }"#;
        let income: IncomeStatement = serde_json::from_str(json).unwrap();
        assert_eq!(income.revenue, Some(1000.0));
        assert!(income.net_income.is_none());
        assert!(income.ebitda.is_none());
        assert_eq!(
            income.parsed_date(),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_profile_market_cap_alias() {
        let json = r#"{"symbol": "ACME", "price": 10.0, "mktCap": 5000.0, "beta": 1.2}"#;
        let profile: CompanyProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.market_cap, Some(5000.0));
        assert_eq!(profile.beta, Some(1.2));
    }

    fn company() -> CompanyData {
        CompanyData {
            symbol: "ACME".to_string(),
            income_statements: vec![
                IncomeStatement {
                    date: "2024-12-31".to_string(),
                    revenue: Some(1100.0),
                    net_income: Some(110.0),
                    ..Default::default()
                },
                IncomeStatement {
                    date: "2023-12-31".to_string(),
                    revenue: Some(1000.0),
                    ..Default::default()
                },
            ],
            balance_sheets: vec![
                BalanceSheet {
                    date: "2023-12-31".to_string(),
                    inventory: Some(40.0),
                    ..Default::default()
                },
                BalanceSheet {
                    date: "2024-12-31".to_string(),
                    inventory: Some(50.0),
                    total_debt: Some(300.0),
                    cash_and_cash_equivalents: Some(100.0),
                    ..Default::default()
                },
            ],
            cash_flows: vec![CashFlowStatement {
                date: "2024-12-31".to_string(),
                operating_cash_flow: Some(150.0),
                capital_expenditure: Some(-40.0),
                free_cash_flow: Some(999.0),
                ..Default::default()
            }],
            profile: Some(CompanyProfile {
                symbol: "ACME".to_string(),
                price: Some(20.0),
                market_cap: Some(2000.0),
                beta: Some(1.1),
                ..Default::default()
            }),
            enterprise_values: Vec::new(),
        }
    }

    #[test]
    fn test_statement_merges_by_date() {
        let statement = company().statement();
        assert_eq!(statement.len(), 2);
        assert_eq!(statement.latest_value(LineItem::Inventory).unwrap(), 50.0);
        assert_eq!(statement.value(1, LineItem::Inventory).unwrap(), 40.0);
        assert_eq!(
            statement.latest_value(LineItem::OperatingCashFlow).unwrap(),
            150.0
        );
        assert!(statement.value(1, LineItem::NetIncome).is_err());
        assert!(statement.value(1, LineItem::OperatingCashFlow).is_err());
    }

    #[test]
    fn test_derived_market_values() {
        let data = company();
        assert_relative_eq!(data.shares_outstanding().unwrap(), 100.0);
        assert_relative_eq!(data.enterprise_value().unwrap(), 2200.0);
        assert_relative_eq!(data.last_free_cash_flow().unwrap(), 110.0);
    }

    #[test]
    fn test_reported_enterprise_value_wins() {
        let mut data = company();
        data.enterprise_values.push(EnterpriseValues {
            date: "2024-12-31".to_string(),
            number_of_shares: Some(95.0),
            enterprise_value: Some(2500.0),
            ..Default::default()
        });
        assert_relative_eq!(data.shares_outstanding().unwrap(), 95.0);
        assert_relative_eq!(data.enterprise_value().unwrap(), 2500.0);
    }

    #[test]
    fn test_enterprise_value_needs_cash() {
        let mut data = company();
        data.balance_sheets[1].cash_and_cash_equivalents = None;
        assert!(data.enterprise_value().is_none());

        data.balance_sheets[1].total_debt = None;
        data.balance_sheets[1].cash_and_cash_equivalents = Some(100.0);
        assert!(data.enterprise_value().is_none());
    }
}
