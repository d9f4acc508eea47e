//! Error types for FMP API client.

use tasador_core::{DataError, TasadorError};
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available.
    #[error("No {what} data available for {symbol}")]
    NoData {
        /// Ticker symbol.
        symbol: String,
        /// The endpoint that came back empty.
        what: String,
    },

    /// A required value is absent from an otherwise valid response.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Environment variable error.
    #[error("Environment error: {0}")]
    Env(#[from] dotenvy::Error),
}

impl From<FmpError> for TasadorError {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::Json(e) => DataError::Malformed(e.to_string()).into(),
            FmpError::SymbolNotFound(symbol) => DataError::Empty {
                symbol,
                what: "profile".to_string(),
            }
            .into(),
            FmpError::NoData { symbol, what } => DataError::Empty { symbol, what }.into(),
            FmpError::Data(e) => e.into(),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasador_core::ErrorKind;

    #[test]
    fn test_transport_classification() {
        let err: TasadorError = FmpError::RateLimitExceeded.into();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let err: TasadorError = FmpError::Api("HTTP 500".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Transport);

        let err: TasadorError = FmpError::MissingApiKey.into();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_data_classification() {
        let err: TasadorError = FmpError::NoData {
            symbol: "ZZZZ".to_string(),
            what: "income statement".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert_eq!(err.to_string(), "ZZZZ: no income statement data available");

        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: TasadorError = FmpError::Json(json_err).into();
        assert_eq!(err.kind(), ErrorKind::Data);
    }
}
