//! Peer table and summary statistics.

use crate::multiples::{ComparableRow, Multiple, PeerFinancials};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tasador_core::stats::Summary;

/// Mean, median and count per multiple over the defined values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableSummary {
    /// P/E.
    pub pe: Summary,
    /// EV/EBITDA.
    pub ev_ebitda: Summary,
    /// EV/Revenue.
    pub ev_revenue: Summary,
    /// P/B.
    pub pb: Summary,
}

impl ComparableSummary {
    /// Summarise the rows.
    #[must_use]
    pub fn from_rows(rows: &[ComparableRow]) -> Self {
        let column = |m: Multiple| {
            let values: Vec<Option<f64>> = rows.iter().map(|r| r.multiple(m)).collect();
            Summary::from_options(&values)
        };
        Self {
            pe: column(Multiple::PriceToEarnings),
            ev_ebitda: column(Multiple::EvToEbitda),
            ev_revenue: column(Multiple::EvToRevenue),
            pb: column(Multiple::PriceToBook),
        }
    }

    /// Summary for one multiple.
    #[must_use]
    pub const fn get(&self, multiple: Multiple) -> &Summary {
        match multiple {
            Multiple::PriceToEarnings => &self.pe,
            Multiple::EvToEbitda => &self.ev_ebitda,
            Multiple::EvToRevenue => &self.ev_revenue,
            Multiple::PriceToBook => &self.pb,
        }
    }
}

/// The comparables table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparables {
    /// One row per peer, in the order requested.
    pub rows: Vec<ComparableRow>,
    /// Statistics over `rows`.
    pub summary: ComparableSummary,
    /// Requested tickers with no financials.
    pub skipped: Vec<String>,
}

/// Build the comparables table for `peers`.
///
/// Rows follow the order of `peers`. Tickers missing from `financials` are
/// skipped and listed in [`Comparables::skipped`]; they never fail the table.
#[must_use]
pub fn build_comparables(
    peers: &[String],
    financials: &HashMap<String, PeerFinancials>,
) -> Comparables {
    let mut rows = Vec::with_capacity(peers.len());
    let mut skipped = Vec::new();

    for ticker in peers {
        match financials.get(ticker) {
            Some(f) => rows.push(ComparableRow::from_financials(f)),
            None => {
                tracing::warn!(%ticker, "no financials for peer, skipping");
                skipped.push(ticker.clone());
            }
        }
    }

    let summary = ComparableSummary::from_rows(&rows);
    Comparables {
        rows,
        summary,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peer(ticker: &str, price: f64, net_income: Option<f64>, ebitda: f64) -> PeerFinancials {
        let mut f = PeerFinancials::new(ticker)
            .with_price(price)
            .with_market_cap(price * 100.0)
            .with_enterprise_value(price * 120.0)
            .with_ebitda(ebitda)
            .with_revenue(ebitda * 4.0)
            .with_book_value(price * 20.0);
        f.net_income = net_income;
        f
    }

    fn universe() -> HashMap<String, PeerFinancials> {
        [
            peer("AAA", 10.0, Some(50.0), 100.0),
            peer("BBB", 20.0, None, 200.0),
            peer("CCC", 30.0, Some(100.0), 150.0),
        ]
        .into_iter()
        .map(|f| (f.ticker.clone(), f))
        .collect()
    }

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_rows_in_input_order() {
        let comps = build_comparables(&tickers(&["CCC", "AAA", "BBB"]), &universe());
        let order: Vec<&str> = comps.rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["CCC", "AAA", "BBB"]);
        assert!(comps.skipped.is_empty());
    }

    #[test]
    fn test_missing_net_income_excluded_from_summary() {
        let comps = build_comparables(&tickers(&["AAA", "BBB", "CCC"]), &universe());
        assert!(comps.rows[1].pe.is_none());

        // P/E: AAA = 10 / (50/100) = 20, CCC = 30 / (100/100) = 30
        assert_eq!(comps.summary.pe.count, 2);
        assert_relative_eq!(comps.summary.pe.mean.unwrap(), 25.0);
        assert_relative_eq!(comps.summary.pe.median.unwrap(), 25.0);

        // EV/EBITDA defined for all three: 12, 12, 24
        assert_eq!(comps.summary.ev_ebitda.count, 3);
        assert_relative_eq!(comps.summary.ev_ebitda.median.unwrap(), 12.0);
        assert_relative_eq!(comps.summary.ev_ebitda.mean.unwrap(), 16.0);
    }

    #[test]
    fn test_unknown_tickers_skipped() {
        let comps = build_comparables(&tickers(&["AAA", "ZZZ", "CCC"]), &universe());
        assert_eq!(comps.rows.len(), 2);
        assert_eq!(comps.skipped, vec!["ZZZ".to_string()]);
    }

    #[test]
    fn test_empty_peer_set() {
        let comps = build_comparables(&[], &universe());
        assert!(comps.rows.is_empty());
        for m in Multiple::ALL {
            let s = comps.summary.get(m);
            assert_eq!(s.count, 0);
            assert!(s.mean.is_none());
            assert!(s.median.is_none());
        }
    }
}
