//! Common types used throughout the Tasador toolkit.
//!
//! This module defines the yearly financial-statement model. A statement is an
//! ordered sequence of fiscal years, most recent first, where each year maps
//! [`LineItem`]s to values. Items the provider did not report are simply absent
//! from the map; lookups surface them as [`DataError::MissingField`] rather
//! than reading them as zero.

use crate::error::{DataError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, typically a ticker like "AAPL".
pub type Symbol = String;

/// Statement line items understood by the valuation model.
///
/// Names follow the provider's camelCase field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItem {
    /// Total revenue.
    Revenue,
    /// Net income.
    NetIncome,
    /// Depreciation and amortization.
    DepreciationAndAmortization,
    /// EBITDA.
    Ebitda,
    /// Interest expense.
    InterestExpense,
    /// Income tax expense.
    IncomeTaxExpense,
    /// Income before tax.
    IncomeBeforeTax,
    /// Net receivables.
    NetReceivables,
    /// Inventory.
    Inventory,
    /// Accounts payable.
    AccountPayables,
    /// Net property, plant and equipment.
    PropertyPlantEquipmentNet,
    /// Total debt.
    TotalDebt,
    /// Total stockholders' equity.
    TotalStockholdersEquity,
    /// Cash and cash equivalents.
    CashAndCashEquivalents,
    /// Operating cash flow.
    OperatingCashFlow,
    /// Capital expenditure (reported negative by the provider).
    CapitalExpenditure,
}

impl LineItem {
    /// Every line item, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Revenue,
        Self::NetIncome,
        Self::DepreciationAndAmortization,
        Self::Ebitda,
        Self::InterestExpense,
        Self::IncomeTaxExpense,
        Self::IncomeBeforeTax,
        Self::NetReceivables,
        Self::Inventory,
        Self::AccountPayables,
        Self::PropertyPlantEquipmentNet,
        Self::TotalDebt,
        Self::TotalStockholdersEquity,
        Self::CashAndCashEquivalents,
        Self::OperatingCashFlow,
        Self::CapitalExpenditure,
    ];

    /// The provider field name for this item.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::NetIncome => "netIncome",
            Self::DepreciationAndAmortization => "depreciationAndAmortization",
            Self::Ebitda => "ebitda",
            Self::InterestExpense => "interestExpense",
            Self::IncomeTaxExpense => "incomeTaxExpense",
            Self::IncomeBeforeTax => "incomeBeforeTax",
            Self::NetReceivables => "netReceivables",
            Self::Inventory => "inventory",
            Self::AccountPayables => "accountPayables",
            Self::PropertyPlantEquipmentNet => "propertyPlantEquipmentNet",
            Self::TotalDebt => "totalDebt",
            Self::TotalStockholdersEquity => "totalStockholdersEquity",
            Self::CashAndCashEquivalents => "cashAndCashEquivalents",
            Self::OperatingCashFlow => "operatingCashFlow",
            Self::CapitalExpenditure => "capitalExpenditure",
        }
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market inputs for the cost of equity, observed at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    /// Risk-free rate as a decimal (0.042 = 4.2%).
    pub risk_free_rate: f64,
    /// Expected market return as a decimal.
    pub market_return: f64,
    /// Equity beta of the company.
    pub beta: f64,
}

/// One fiscal year of reported line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementYear {
    /// Fiscal period label, usually the filing date (YYYY-MM-DD).
    pub date: String,
    /// Reported values; absent items are not in the map.
    pub values: BTreeMap<LineItem, f64>,
}

impl StatementYear {
    /// Create an empty year with the given period label.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, item: LineItem, value: f64) -> Self {
        self.values.insert(item, value);
        self
    }

    /// Insert a value if one is present. Non-finite values are treated as absent.
    pub fn insert_opt(&mut self, item: LineItem, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            self.values.insert(item, v);
        }
    }

    /// Look up a value, `None` when absent.
    #[must_use]
    pub fn get(&self, item: LineItem) -> Option<f64> {
        self.values.get(&item).copied()
    }

    /// Parse the period label into a date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<Date> {
        Date::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Yearly financial statement for one company, most recent year first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    symbol: Symbol,
    years: Vec<StatementYear>,
}

impl FinancialStatement {
    /// Create a statement from years ordered most recent first.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>, years: Vec<StatementYear>) -> Self {
        Self {
            symbol: symbol.into(),
            years,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All years, most recent first.
    #[must_use]
    pub fn years(&self) -> &[StatementYear] {
        &self.years
    }

    /// Number of fiscal years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the statement has no years.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// The most recent year.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Empty`] if the statement has no years.
    pub fn latest(&self) -> Result<&StatementYear> {
        self.year(0)
    }

    /// The year at `index` (0 = most recent).
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Empty`] for an empty statement and
    /// [`DataError::InsufficientHistory`] when `index` is out of range.
    pub fn year(&self, index: usize) -> Result<&StatementYear> {
        if self.years.is_empty() {
            return Err(DataError::Empty {
                symbol: self.symbol.clone(),
                what: "financial statement".to_string(),
            }
            .into());
        }
        self.years.get(index).ok_or_else(|| {
            DataError::InsufficientHistory {
                symbol: self.symbol.clone(),
                needed: index + 1,
                available: self.years.len(),
            }
            .into()
        })
    }

    /// Value of `item` in the year at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingField`] when the item was not reported,
    /// or the errors of [`Self::year`].
    pub fn value(&self, index: usize, item: LineItem) -> Result<f64> {
        let year = self.year(index)?;
        year.get(item).ok_or_else(|| self.missing(year, item))
    }

    /// Value of `item` in the most recent year.
    ///
    /// # Errors
    ///
    /// See [`Self::value`].
    pub fn latest_value(&self, item: LineItem) -> Result<f64> {
        self.value(0, item)
    }

    /// Build the error for an item absent from `year`.
    #[must_use]
    pub fn missing(&self, year: &StatementYear, item: LineItem) -> crate::TasadorError {
        DataError::MissingField {
            symbol: self.symbol.clone(),
            field: item,
            period: year.date.clone(),
        }
        .into()
    }
}
