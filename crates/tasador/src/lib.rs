#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tasador/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # tasador
//!
//! Statement-driven equity valuation.
//!
//! tasador is an umbrella crate that re-exports all tasador sub-crates and
//! adds the valuation pipeline that ties them together: fetch a company's
//! statements and market data, forecast the statements, derive free cash
//! flows and a discount rate, and value the company by DCF, leveraged buyout
//! and peer multiples.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tasador::fmp::FmpClient;
//! use tasador::{ValuationRequest, run};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let report = run(&client, &ValuationRequest::new("AAPL")).await?;
//!
//!     if let Some(bridge) = report.equity_bridge.ready() {
//!         println!("DCF price: {:.2}", bridge.implied_price);
//!     }
//!     for (section, message) in report.failures() {
//!         eprintln!("{section}: {message}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`base`] - Errors, statement model and summary statistics
//! - [`fmp`] - Financial Modeling Prep client
//! - [`model`] - Forecast, cash flows, WACC, DCF, LBO and option pricing
//! - [`comps`] - Peer multiples and implied prices
//! - [`pipeline`] - One valuation pass with per-section failures
//! - [`tables`] - Report sections as Polars frames
//!
//! ## Failure Model
//!
//! Each report section is either ready or failed with a kind (data, domain
//! or transport) and a message. A failed section only affects the sections
//! computed from it:
//!
//! ```text
//! statement ─┬─> forecast ─> cash flows ─┐
//!            ├─> discount rate ──────────┴─> DCF ─> equity bridge
//!            └─> LBO
//! peers ─────────> comparables
//! ```

/// Version information for the tasador crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;
pub mod tables;

// ============================================================================
// Core
// ============================================================================

/// Error taxonomy, statement model and statistics.
///
/// Every fallible operation in tasador returns [`Result`], whose error is a
/// [`TasadorError`] of one of three kinds:
///
/// - **Data**: an input is missing, empty or malformed
/// - **Domain**: the inputs violate a model precondition
/// - **Transport**: the provider could not be reached or refused the call
pub mod base {
    pub use tasador_core::*;
}

pub use tasador_core::{
    DataError, DomainError, ErrorKind, FinancialStatement, LineItem, MarketSnapshot, Result,
    StatementYear, TasadorError,
};

// ============================================================================
// Data Provider
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get an API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add it to `.env`
///
/// ## Example
///
/// ```ignore
/// use tasador::fmp::FmpClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FmpClient::from_env()?;
///     let company = client.company_data("AAPL", 5).await?;
///     let statement = company.statement();
///     println!("{} years of statements", statement.len());
///     Ok(())
/// }
/// ```
pub mod fmp {
    pub use tasador_fmp::*;
}

// ============================================================================
// Models
// ============================================================================

/// Valuation models.
///
/// ## Statement Forecast
///
/// Revenue grows at a constant rate; every other item keeps its base-year
/// ratio to revenue.
///
/// ## Free Cash Flow
///
/// ```text
/// CFO   = NI + ΔD&A - ΔReceivables - ΔInventory + ΔPayables
/// CAPEX = ΔPP&E + D&A
/// FCF   = CFO - CAPEX
/// ```
///
/// ## Discount Rate
///
/// ```text
/// ke   = rf + β (rm - rf)
/// kd   = rf + spread(interest coverage)
/// WACC = kd (1 - t) D/(D+E) + ke E/(D+E)
/// ```
///
/// ## DCF
///
/// ```text
/// EV = Σ FCF_i / (1 + WACC)^i + FCF_N (1 + g) / (WACC - g) / (1 + WACC)^N
/// ```
pub mod model {
    pub use tasador_model::*;
}

// ============================================================================
// Comparables
// ============================================================================

/// Comparable-company analysis.
///
/// Multiples with missing inputs or a zero denominator are undefined and
/// never enter the peer mean or median.
pub mod comps {
    pub use tasador_comps::*;
}

pub use pipeline::{
    CompsReport, DcfMode, DcfReport, LboAssumptions, Section, ValuationInputs, ValuationReport,
    ValuationRequest, compare, evaluate, fetch_inputs, fetch_peer_data, fetch_peers, run,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use tasador::prelude::*;
/// ```
///
/// This brings into scope:
/// - Pipeline: [`ValuationRequest`], [`ValuationReport`], [`Section`], [`run`]
/// - Error types: [`Result`], [`TasadorError`], [`ErrorKind`]
/// - The provider client: [`fmp::FmpClient`]
pub mod prelude {
    pub use crate::fmp::{FmpClient, FmpConfig};
    pub use crate::{
        DcfMode, ErrorKind, LboAssumptions, Result, Section, TasadorError, ValuationReport,
        ValuationRequest, evaluate, fetch_inputs, run,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let error: TasadorError = DomainError::InvalidHorizon(0).into();
        assert_eq!(error.kind(), ErrorKind::Domain);
    }
}
