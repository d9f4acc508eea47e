//! Subject share price implied by peer multiples.

use crate::multiples::{Multiple, PeerFinancials};
use crate::table::ComparableSummary;
use serde::{Deserialize, Serialize};
use tasador_core::{DataError, DomainError, Result};

/// Price implied by one peer median multiple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpliedValuation {
    /// The multiple applied.
    pub multiple: Multiple,
    /// Peer median of that multiple.
    pub peer_median: f64,
    /// The subject's metric (EPS, BVPS, EBITDA or revenue).
    pub subject_metric: f64,
    /// Implied price per share.
    pub implied_price: f64,
}

fn missing(subject: &PeerFinancials, field: &str) -> tasador_core::TasadorError {
    DataError::MissingMarketData {
        symbol: subject.ticker.clone(),
        field: field.to_string(),
    }
    .into()
}

/// Apply the peer median of `multiple` to the subject.
///
/// ```text
/// P/E, P/B:        median * per-share metric
/// EV multiples:    (median * metric - net debt) / shares,  net debt = EV - market cap
/// ```
///
/// # Errors
///
/// - [`DataError::Empty`] when no peer has the multiple defined
/// - [`DataError::MissingMarketData`] when a subject input is absent
/// - [`DomainError::NonPositiveShares`] when the implied share count is not
///   positive
pub fn implied_price(
    subject: &PeerFinancials,
    summary: &ComparableSummary,
    multiple: Multiple,
) -> Result<ImpliedValuation> {
    let peer_median = summary.get(multiple).median.ok_or_else(|| DataError::Empty {
        symbol: subject.ticker.clone(),
        what: format!("peer {multiple}"),
    })?;

    let shares = subject.shares().ok_or_else(|| missing(subject, "shares"))?;
    if shares <= 0.0 {
        return Err(DomainError::NonPositiveShares {
            symbol: subject.ticker.clone(),
            shares,
        }
        .into());
    }

    let (subject_metric, implied_price) = match multiple {
        Multiple::PriceToEarnings | Multiple::PriceToBook => {
            let field = if multiple == Multiple::PriceToEarnings {
                "netIncome"
            } else {
                "bookValue"
            };
            let per_share = subject
                .metric(multiple)
                .ok_or_else(|| missing(subject, field))?;
            (per_share, peer_median * per_share)
        }
        Multiple::EvToEbitda | Multiple::EvToRevenue => {
            let field = if multiple == Multiple::EvToEbitda {
                "ebitda"
            } else {
                "revenue"
            };
            let metric = subject
                .metric(multiple)
                .ok_or_else(|| missing(subject, field))?;
            let enterprise_value = subject
                .enterprise_value
                .ok_or_else(|| missing(subject, "enterpriseValue"))?;
            let market_cap = subject
                .market_cap
                .ok_or_else(|| missing(subject, "marketCap"))?;
            let net_debt = enterprise_value - market_cap;
            (metric, (peer_median * metric - net_debt) / shares)
        }
    };

    Ok(ImpliedValuation {
        multiple,
        peer_median,
        subject_metric,
        implied_price,
    })
}

/// [`implied_price`] for every multiple the data supports.
///
/// Multiples that cannot be applied are logged and left out.
#[must_use]
pub fn implied_prices(
    subject: &PeerFinancials,
    summary: &ComparableSummary,
) -> Vec<ImpliedValuation> {
    Multiple::ALL
        .into_iter()
        .filter_map(|m| match implied_price(subject, summary, m) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!(ticker = %subject.ticker, multiple = %m, error = %e, "no implied price");
                None
            }
        })
        .collect()
}
