//! Per-company trading multiples.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The trading multiples computed for every peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Multiple {
    /// Price over earnings per share.
    PriceToEarnings,
    /// Enterprise value over EBITDA.
    EvToEbitda,
    /// Enterprise value over revenue.
    EvToRevenue,
    /// Price over book value per share.
    PriceToBook,
}

impl Multiple {
    /// All multiples in display order.
    pub const ALL: [Self; 4] = [
        Self::PriceToEarnings,
        Self::EvToEbitda,
        Self::EvToRevenue,
        Self::PriceToBook,
    ];

    /// Short column label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::PriceToEarnings => "P/E",
            Self::EvToEbitda => "EV/EBITDA",
            Self::EvToRevenue => "EV/Revenue",
            Self::PriceToBook => "P/B",
        }
    }

    /// Whether the numerator is enterprise value rather than price.
    #[must_use]
    pub const fn is_enterprise(&self) -> bool {
        matches!(self, Self::EvToEbitda | Self::EvToRevenue)
    }
}

impl fmt::Display for Multiple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw market and fundamental inputs for one company.
///
/// Every field is optional; an absent input makes the multiples that need it
/// undefined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerFinancials {
    /// Ticker symbol.
    pub ticker: String,
    /// Share price.
    pub price: Option<f64>,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Latest annual revenue.
    pub revenue: Option<f64>,
    /// Latest annual EBITDA.
    pub ebitda: Option<f64>,
    /// Latest annual net income.
    pub net_income: Option<f64>,
    /// Stockholders' equity.
    pub book_value: Option<f64>,
}

impl PeerFinancials {
    /// Empty record for `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Set the share price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Set the market capitalization.
    #[must_use]
    pub const fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Set the enterprise value.
    #[must_use]
    pub const fn with_enterprise_value(mut self, enterprise_value: f64) -> Self {
        self.enterprise_value = Some(enterprise_value);
        self
    }

    /// Set revenue.
    #[must_use]
    pub const fn with_revenue(mut self, revenue: f64) -> Self {
        self.revenue = Some(revenue);
        self
    }

    /// Set EBITDA.
    #[must_use]
    pub const fn with_ebitda(mut self, ebitda: f64) -> Self {
        self.ebitda = Some(ebitda);
        self
    }

    /// Set net income.
    #[must_use]
    pub const fn with_net_income(mut self, net_income: f64) -> Self {
        self.net_income = Some(net_income);
        self
    }

    /// Set book value.
    #[must_use]
    pub const fn with_book_value(mut self, book_value: f64) -> Self {
        self.book_value = Some(book_value);
        self
    }

    /// Implied share count, `market_cap / price`.
    #[must_use]
    pub fn shares(&self) -> Option<f64> {
        ratio(self.market_cap, self.price)
    }

    /// The per-share or enterprise metric a multiple divides by.
    #[must_use]
    pub fn metric(&self, multiple: Multiple) -> Option<f64> {
        match multiple {
            Multiple::PriceToEarnings => ratio(self.net_income, self.shares()),
            Multiple::PriceToBook => ratio(self.book_value, self.shares()),
            Multiple::EvToEbitda => self.ebitda,
            Multiple::EvToRevenue => self.revenue,
        }
    }
}

/// `num / den`, undefined when either side is missing, the denominator is
/// zero, or the result is not finite.
pub(crate) fn ratio(num: Option<f64>, den: Option<f64>) -> Option<f64> {
    match (num, den) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d).filter(|r| r.is_finite()),
        _ => None,
    }
}

/// One row of the comparables table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableRow {
    /// Ticker symbol.
    pub ticker: String,
    /// Market capitalization.
    pub market_cap: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Revenue.
    pub revenue: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
    /// Net income.
    pub net_income: Option<f64>,
    /// Book value of equity.
    pub book_value: Option<f64>,
    /// Share price.
    pub price: Option<f64>,
    /// `market_cap / price`.
    pub shares: Option<f64>,
    /// Price over EPS.
    pub pe: Option<f64>,
    /// EV over EBITDA.
    pub ev_ebitda: Option<f64>,
    /// EV over revenue.
    pub ev_revenue: Option<f64>,
    /// Price over book value per share.
    pub pb: Option<f64>,
}

impl ComparableRow {
    /// Compute every multiple for one company.
    #[must_use]
    pub fn from_financials(f: &PeerFinancials) -> Self {
        Self {
            ticker: f.ticker.clone(),
            market_cap: f.market_cap,
            enterprise_value: f.enterprise_value,
            revenue: f.revenue,
            ebitda: f.ebitda,
            net_income: f.net_income,
            book_value: f.book_value,
            price: f.price,
            shares: f.shares(),
            pe: ratio(f.price, f.metric(Multiple::PriceToEarnings)),
            ev_ebitda: ratio(f.enterprise_value, f.ebitda),
            ev_revenue: ratio(f.enterprise_value, f.revenue),
            pb: ratio(f.price, f.metric(Multiple::PriceToBook)),
        }
    }

    /// Value of one multiple.
    #[must_use]
    pub const fn multiple(&self, multiple: Multiple) -> Option<f64> {
        match multiple {
            Multiple::PriceToEarnings => self.pe,
            Multiple::EvToEbitda => self.ev_ebitda,
            Multiple::EvToRevenue => self.ev_revenue,
            Multiple::PriceToBook => self.pb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peer() -> PeerFinancials {
        PeerFinancials::new("MSFT")
            .with_price(50.0)
            .with_market_cap(5_000.0)
            .with_enterprise_value(6_000.0)
            .with_revenue(2_000.0)
            .with_ebitda(600.0)
            .with_net_income(250.0)
            .with_book_value(1_000.0)
    }

    #[test]
    fn test_all_multiples() {
        let row = ComparableRow::from_financials(&peer());
        assert_relative_eq!(row.shares.unwrap(), 100.0);
        // EPS = 2.5
        assert_relative_eq!(row.pe.unwrap(), 20.0);
        assert_relative_eq!(row.ev_ebitda.unwrap(), 10.0);
        assert_relative_eq!(row.ev_revenue.unwrap(), 3.0);
        // BVPS = 10
        assert_relative_eq!(row.pb.unwrap(), 5.0);
    }

    #[test]
    fn test_missing_net_income() {
        let mut f = peer();
        f.net_income = None;
        let row = ComparableRow::from_financials(&f);
        assert!(row.pe.is_none());
        assert!(row.ev_ebitda.is_some());
    }

    #[test]
    fn test_zero_denominators() {
        let f = peer().with_ebitda(0.0).with_net_income(0.0).with_price(0.0);
        let row = ComparableRow::from_financials(&f);
        assert!(row.shares.is_none());
        assert!(row.pe.is_none());
        assert!(row.pb.is_none());
        assert!(row.ev_ebitda.is_none());
        assert_relative_eq!(row.ev_revenue.unwrap(), 3.0);
    }

    #[test]
    fn test_multiple_lookup() {
        let row = ComparableRow::from_financials(&peer());
        for m in Multiple::ALL {
            assert!(row.multiple(m).is_some(), "{m} undefined");
        }
        assert_eq!(Multiple::EvToEbitda.to_string(), "EV/EBITDA");
        assert!(Multiple::EvToRevenue.is_enterprise());
        assert!(!Multiple::PriceToBook.is_enterprise());
    }
}
