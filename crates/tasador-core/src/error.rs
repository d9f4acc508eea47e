//! Error types for the Tasador toolkit.
//!
//! Failures fall into three families. [`DataError`] covers fetched data that is
//! missing, empty or malformed. [`DomainError`] covers formula inputs outside
//! the valid mathematical domain. Transport failures come from the data
//! provider and are carried as a message. The outer [`TasadorError`] wraps all
//! three so callers can propagate with `?` and still branch on [`ErrorKind`].

use crate::types::LineItem;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required input is absent, empty or unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A line item is absent from the fetched statement.
    #[error("{symbol}: missing field `{field}` for period {period}")]
    MissingField {
        /// Ticker symbol.
        symbol: String,
        /// The absent line item.
        field: LineItem,
        /// Fiscal period label (usually the filing date).
        period: String,
    },

    /// A line item used as a denominator is zero.
    #[error("{symbol}: field `{field}` is zero for period {period}")]
    ZeroDenominator {
        /// Ticker symbol.
        symbol: String,
        /// The zero-valued line item.
        field: LineItem,
        /// Fiscal period label.
        period: String,
    },

    /// Fewer historical years than the computation needs.
    #[error("{symbol}: need {needed} historical periods, found {available}")]
    InsufficientHistory {
        /// Ticker symbol.
        symbol: String,
        /// Periods required.
        needed: usize,
        /// Periods available.
        available: usize,
    },

    /// A market or profile value (price, beta, rate) is absent.
    #[error("{symbol}: missing market data `{field}`")]
    MissingMarketData {
        /// Ticker or series symbol.
        symbol: String,
        /// Name of the absent value.
        field: String,
    },

    /// The provider returned no records.
    #[error("{symbol}: no {what} data available")]
    Empty {
        /// Ticker symbol.
        symbol: String,
        /// What was requested (e.g. "income statement").
        what: String,
    },

    /// The provider response could not be interpreted.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// A formula input falls outside its valid domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Terminal value is undefined when the discount rate does not exceed growth.
    #[error(
        "terminal growth {growth:.4} must be below the discount rate {discount_rate:.4}"
    )]
    TerminalGrowthNotBelowDiscountRate {
        /// Discount rate (WACC).
        discount_rate: f64,
        /// Long-term growth rate.
        growth: f64,
    },

    /// Sponsor equity must be positive for a buyout return to exist.
    #[error("equity contribution must be positive, got {equity}")]
    NonPositiveEquity {
        /// Equity contribution.
        equity: f64,
    },

    /// Per-share values need a positive share count.
    #[error("{symbol}: shares outstanding must be positive, got {shares}")]
    NonPositiveShares {
        /// Ticker symbol.
        symbol: String,
        /// Share count.
        shares: f64,
    },

    /// Forecast horizon must be at least one year.
    #[error("forecast horizon must be at least one year, got {0}")]
    InvalidHorizon(usize),

    /// Debt plus equity is zero, so capital-structure weights are undefined.
    #[error("{symbol}: total debt plus equity is zero")]
    ZeroCapital {
        /// Ticker symbol.
        symbol: String,
    },

    /// Any other out-of-domain input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// The main error type for Tasador operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TasadorError {
    /// Required data is missing or malformed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A formula input is outside its valid domain.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The data provider could not be reached or refused the request.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Coarse classification of a [`TasadorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`DataError`].
    Data,
    /// See [`DomainError`].
    Domain,
    /// Provider or network failure.
    Transport,
}

impl TasadorError {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Data(_) => ErrorKind::Data,
            Self::Domain(_) => ErrorKind::Domain,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }
}

/// A specialized Result type for Tasador operations.
pub type Result<T> = std::result::Result<T, TasadorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TasadorError::from(DataError::MissingField {
            symbol: "AAPL".to_string(),
            field: LineItem::NetIncome,
            period: "2024-09-28".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "AAPL: missing field `netIncome` for period 2024-09-28"
        );

        let err = TasadorError::from(DomainError::TerminalGrowthNotBelowDiscountRate {
            discount_rate: 0.03,
            growth: 0.03,
        });
        assert_eq!(
            err.to_string(),
            "terminal growth 0.0300 must be below the discount rate 0.0300"
        );
    }

    #[test]
    fn test_error_kind() {
        let err: TasadorError = DomainError::InvalidHorizon(0).into();
        assert_eq!(err.kind(), ErrorKind::Domain);

        let err: TasadorError = DataError::Malformed("bad".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Data);

        let err = TasadorError::Transport("timeout".to_string());
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(TasadorError::Transport("fail".to_string()));
        assert!(err_result.is_err());
    }
}
