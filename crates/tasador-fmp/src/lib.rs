//! Financial Modeling Prep (FMP) API client for Tasador.
//!
//! This crate fetches the raw inputs of a valuation from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API: income
//! statements, balance sheets, cash flow statements, company profiles,
//! enterprise values, peer lists, treasury rates and index price history.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tasador_fmp::{FmpClient, FmpConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::with_config(FmpConfig::from_env()?);
//!
//!     // Statements, profile and enterprise values in one call
//!     let company = client.company_data("AAPL", 5).await?;
//!     let statement = company.statement();
//!
//!     // Risk-free rate, index return and beta
//!     let market = client.market_snapshot("AAPL", "^GSPC", 10).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! FMP_BASE_URL=https://financialmodelingprep.com/stable   # optional
//! FMP_CACHE=off                                           # optional, default on
//! ```

mod cache;
mod client;
mod config;
mod error;
mod types;

pub use cache::ResponseCache;
pub use client::FmpClient;
pub use config::{CachePolicy, DEFAULT_BASE_URL, FmpConfig};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
