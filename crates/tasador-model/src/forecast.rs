//! Percent-of-revenue statement forecast.
//!
//! Revenue grows at a constant rate. Every other line item present in the
//! base year is held at its base-year ratio to revenue, computed once and not
//! re-estimated:
//!
//! ```text
//! revenue[i] = revenue[i-1] * (1 + g)
//! item[i]    = revenue[i] * item[0] / revenue[0]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tasador_core::{DataError, DomainError, FinancialStatement, LineItem, Result};

/// Line items the cash flow build cannot do without.
pub const REQUIRED_ITEMS: [LineItem; 6] = [
    LineItem::NetIncome,
    LineItem::DepreciationAndAmortization,
    LineItem::NetReceivables,
    LineItem::Inventory,
    LineItem::AccountPayables,
    LineItem::PropertyPlantEquipmentNet,
];

/// Default forecast horizon in years.
pub const DEFAULT_HORIZON: usize = 5;

/// Configuration for [`forecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Revenue growth override. `None` uses the latest historical growth.
    pub growth_rate: Option<f64>,

    /// Number of forecast years (default: 5)
    pub horizon: usize,

    /// Items that must be present in the base year.
    pub required: Vec<LineItem>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            growth_rate: None,
            horizon: DEFAULT_HORIZON,
            required: REQUIRED_ITEMS.to_vec(),
        }
    }
}

impl ForecastConfig {
    /// Override the revenue growth rate.
    #[must_use]
    pub const fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = Some(growth_rate);
        self
    }

    /// Set the forecast horizon.
    #[must_use]
    pub const fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    /// Replace the set of required items.
    #[must_use]
    pub fn with_required(mut self, required: impl Into<Vec<LineItem>>) -> Self {
        self.required = required.into();
        self
    }
}

/// Forecast path of one line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSeries {
    /// The line item.
    pub item: LineItem,
    /// `item[0] / revenue[0]`, fixed for the whole horizon.
    pub ratio_to_revenue: f64,
    /// Base year at index 0, then one value per forecast year.
    pub values: Vec<f64>,
}

impl ForecastSeries {
    /// Base-year value, `None` for an empty series.
    #[must_use]
    pub fn base(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Forecast years only, excluding the base year.
    #[must_use]
    pub fn projected(&self) -> &[f64] {
        self.values.get(1..).unwrap_or_default()
    }
}

/// A full statement forecast for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementForecast {
    /// Ticker symbol.
    pub symbol: String,
    /// Period label of the base year.
    pub base_period: String,
    /// Revenue growth rate applied every year.
    pub growth_rate: f64,
    /// Number of forecast years.
    pub horizon: usize,
    /// Revenue path, base year at index 0.
    pub revenue: Vec<f64>,
    /// Non-revenue items present in the base year.
    pub series: BTreeMap<LineItem, ForecastSeries>,
}

impl StatementForecast {
    /// Series for `item`.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingField`] if the item was absent in the base
    /// year and therefore never forecast.
    pub fn series(&self, item: LineItem) -> Result<&ForecastSeries> {
        self.series.get(&item).ok_or_else(|| {
            DataError::MissingField {
                symbol: self.symbol.clone(),
                field: item,
                period: self.base_period.clone(),
            }
            .into()
        })
    }

    /// Value of `item` in `year` (0 = base year). Revenue is included.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::MissingField`] for an item that was not forecast
    /// and [`DomainError::InvalidHorizon`] for a year beyond the horizon.
    pub fn value(&self, item: LineItem, year: usize) -> Result<f64> {
        let values = if item == LineItem::Revenue {
            &self.revenue
        } else {
            &self.series(item)?.values
        };
        values
            .get(year)
            .copied()
            .ok_or_else(|| DomainError::InvalidHorizon(year).into())
    }

    /// Forecast line items in a stable order.
    pub fn items(&self) -> impl Iterator<Item = LineItem> + '_ {
        self.series.keys().copied()
    }
}

/// Revenue growth between the two most recent years.
///
/// # Errors
///
/// Returns [`DataError::InsufficientHistory`] with fewer than two years,
/// [`DataError::MissingField`] when revenue is absent, and
/// [`DataError::ZeroDenominator`] when the prior year's revenue is zero.
pub fn historical_growth(statement: &FinancialStatement) -> Result<f64> {
    let current = statement.value(0, LineItem::Revenue)?;
    let prior = statement.value(1, LineItem::Revenue)?;

    if prior == 0.0 {
        return Err(DataError::ZeroDenominator {
            symbol: statement.symbol().to_string(),
            field: LineItem::Revenue,
            period: statement.year(1)?.date.clone(),
        }
        .into());
    }

    Ok((current - prior) / prior)
}

/// Project the statement `config.horizon` years forward.
///
/// # Errors
///
/// - [`DomainError::InvalidHorizon`] when the horizon is zero
/// - [`DomainError::InvalidInput`] for a non-finite growth override
/// - [`DataError::MissingField`] when revenue or a required item is absent
/// - [`DataError::ZeroDenominator`] when base-year revenue is zero
/// - the errors of [`historical_growth`] when no override is given
pub fn forecast(
    statement: &FinancialStatement,
    config: &ForecastConfig,
) -> Result<StatementForecast> {
    if config.horizon == 0 {
        return Err(DomainError::InvalidHorizon(0).into());
    }

    let base = statement.latest()?;
    let base_revenue = base
        .get(LineItem::Revenue)
        .ok_or_else(|| statement.missing(base, LineItem::Revenue))?;

    if base_revenue == 0.0 {
        return Err(DataError::ZeroDenominator {
            symbol: statement.symbol().to_string(),
            field: LineItem::Revenue,
            period: base.date.clone(),
        }
        .into());
    }

    if let Some(&item) = config.required.iter().find(|item| base.get(**item).is_none()) {
        return Err(statement.missing(base, item));
    }

    let growth_rate = match config.growth_rate {
        Some(g) if !g.is_finite() => {
            return Err(DomainError::InvalidInput(format!("growth rate {g} is not finite")).into());
        }
        Some(g) => g,
        None => historical_growth(statement)?,
    };

    let mut revenue = Vec::with_capacity(config.horizon + 1);
    revenue.push(base_revenue);
    for i in 1..=config.horizon {
        revenue.push(revenue[i - 1] * (1.0 + growth_rate));
    }

    let series = base
        .values
        .iter()
        .filter(|(item, _)| **item != LineItem::Revenue)
        .map(|(&item, &value)| {
            let ratio_to_revenue = value / base_revenue;
            let values = std::iter::once(value)
                .chain(revenue[1..].iter().map(|r| r * ratio_to_revenue))
                .collect();
            (
                item,
                ForecastSeries {
                    item,
                    ratio_to_revenue,
                    values,
                },
            )
        })
        .collect();

    tracing::debug!(
        symbol = statement.symbol(),
        growth_rate,
        horizon = config.horizon,
        "statement forecast built"
    );

    Ok(StatementForecast {
        symbol: statement.symbol().to_string(),
        base_period: base.date.clone(),
        growth_rate,
        horizon: config.horizon,
        revenue,
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tasador_core::{ErrorKind, StatementYear, TasadorError};

    fn full_year(date: &str, revenue: f64) -> StatementYear {
        StatementYear::new(date)
            .with(LineItem::Revenue, revenue)
            .with(LineItem::NetIncome, revenue * 0.10)
            .with(LineItem::DepreciationAndAmortization, revenue * 0.05)
            .with(LineItem::NetReceivables, revenue * 0.15)
            .with(LineItem::Inventory, revenue * 0.08)
            .with(LineItem::AccountPayables, revenue * 0.12)
            .with(LineItem::PropertyPlantEquipmentNet, revenue * 0.40)
    }

    fn statement() -> FinancialStatement {
        FinancialStatement::new(
            "ACME",
            vec![full_year("2024-12-31", 1100.0), full_year("2023-12-31", 1000.0)],
        )
    }

    #[test]
    fn test_default_config() {
        let config = ForecastConfig::default();
        assert!(config.growth_rate.is_none());
        assert_eq!(config.horizon, 5);
        assert_eq!(config.required.len(), 6);
    }

    #[test]
    fn test_historical_growth() {
        assert_relative_eq!(historical_growth(&statement()).unwrap(), 0.1);
    }

    #[test]
    fn test_revenue_compounds() {
        let f = forecast(&statement(), &ForecastConfig::default()).unwrap();
        assert_eq!(f.revenue.len(), 6);
        assert_relative_eq!(f.growth_rate, 0.1);
        for i in 1..f.revenue.len() {
            assert_eq!(f.revenue[i], f.revenue[i - 1] * (1.0 + f.growth_rate));
        }
    }

    #[test]
    fn test_items_follow_revenue_ratio() {
        let f = forecast(&statement(), &ForecastConfig::default().with_growth_rate(0.05)).unwrap();
        let ppe = f.series(LineItem::PropertyPlantEquipmentNet).unwrap();
        assert_relative_eq!(ppe.ratio_to_revenue, 0.40);
        assert_eq!(ppe.values.len(), 6);
        assert_eq!(ppe.projected().len(), 5);
        for (i, value) in ppe.values.iter().enumerate() {
            assert_relative_eq!(*value, f.revenue[i] * 0.40, max_relative = 1e-12);
        }
        assert!(!f.series.contains_key(&LineItem::Revenue));
    }

    #[test]
    fn test_series_base() {
        let f = forecast(&statement(), &ForecastConfig::default().with_growth_rate(0.05)).unwrap();
        let ppe = f.series(LineItem::PropertyPlantEquipmentNet).unwrap();
        assert_relative_eq!(ppe.base().unwrap(), 440.0, max_relative = 1e-12);

        let empty = ForecastSeries {
            item: LineItem::Inventory,
            ratio_to_revenue: 0.08,
            values: Vec::new(),
        };
        assert!(empty.base().is_none());
        assert!(empty.projected().is_empty());
    }

    #[test]
    fn test_zero_growth_has_no_drift() {
        let s = statement();
        let f = forecast(&s, &ForecastConfig::default().with_growth_rate(0.0)).unwrap();
        let base = s.latest().unwrap();
        for item in f.items() {
            let expected = base.get(item).unwrap();
            for year in 0..=f.horizon {
                assert_relative_eq!(f.value(item, year).unwrap(), expected, max_relative = 1e-12);
            }
        }
        assert!(f.revenue.iter().all(|r| *r == 1100.0));
    }

    #[test]
    fn test_optional_items_forecast_when_present() {
        let base = full_year("2024-12-31", 500.0).with(LineItem::TotalDebt, 250.0);
        let s = FinancialStatement::new("ACME", vec![base]);
        let f = forecast(&s, &ForecastConfig::default().with_growth_rate(0.1)).unwrap();
        assert_relative_eq!(f.value(LineItem::TotalDebt, 1).unwrap(), 275.0, max_relative = 1e-12);
        assert!(f.series(LineItem::Ebitda).is_err());
    }

    #[test]
    fn test_missing_required_item() {
        let mut base = full_year("2024-12-31", 500.0);
        base.values.remove(&LineItem::Inventory);
        let s = FinancialStatement::new("ACME", vec![base]);

        let err = forecast(&s, &ForecastConfig::default().with_growth_rate(0.1)).unwrap_err();
        assert_eq!(
            err,
            TasadorError::Data(DataError::MissingField {
                symbol: "ACME".to_string(),
                field: LineItem::Inventory,
                period: "2024-12-31".to_string(),
            })
        );

        // Not required any more: the forecast goes ahead without it
        let config = ForecastConfig::default()
            .with_growth_rate(0.1)
            .with_required(vec![LineItem::NetIncome]);
        assert!(forecast(&s, &config).is_ok());
    }

    #[test]
    fn test_zero_base_revenue() {
        let s = FinancialStatement::new("ACME", vec![full_year("2024-12-31", 0.0)]);
        let err = forecast(&s, &ForecastConfig::default().with_growth_rate(0.1)).unwrap_err();
        assert!(matches!(
            err,
            TasadorError::Data(DataError::ZeroDenominator { field: LineItem::Revenue, .. })
        ));
    }

    #[test]
    fn test_zero_prior_revenue() {
        let s = FinancialStatement::new(
            "ACME",
            vec![full_year("2024-12-31", 100.0), full_year("2023-12-31", 0.0)],
        );
        let err = forecast(&s, &ForecastConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TasadorError::Data(DataError::ZeroDenominator { ref period, .. }) if period == "2023-12-31"
        ));
    }

    #[test]
    fn test_single_year_needs_override() {
        let s = FinancialStatement::new("ACME", vec![full_year("2024-12-31", 100.0)]);
        let err = forecast(&s, &ForecastConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TasadorError::Data(DataError::InsufficientHistory { needed: 2, available: 1, .. })
        ));
        assert!(forecast(&s, &ForecastConfig::default().with_growth_rate(0.02)).is_ok());
    }

    #[test]
    fn test_invalid_inputs() {
        let err = forecast(&statement(), &ForecastConfig::default().with_horizon(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);

        let err = forecast(&statement(), &ForecastConfig::default().with_growth_rate(f64::NAN))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);

        let f = forecast(&statement(), &ForecastConfig::default()).unwrap();
        assert!(f.value(LineItem::Revenue, 6).is_err());
    }
}
