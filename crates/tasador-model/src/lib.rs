#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tasador/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Valuation models for Tasador.
//!
//! Every function in this crate is pure arithmetic over already-fetched data.
//! The pieces chain together into a statement-driven DCF:
//!
//! 1. [`forecast`] grows revenue at a constant rate and holds every other line
//!    item at its base-year ratio to revenue.
//! 2. [`cash_flow`] turns the forecast into yearly free cash flow.
//! 3. [`discount`] derives the WACC from CAPM, an interest-coverage credit
//!    spread and book capital-structure weights.
//! 4. [`dcf`] discounts the free cash flows and a Gordon-growth terminal value,
//!    then bridges enterprise value to a per-share price.
//!
//! [`lbo`] computes sponsor returns for a leveraged buyout and [`options`]
//! prices European options with Black-Scholes.
//!
//! # Example
//!
//! ```
//! use tasador_model::dcf::discount_cash_flows;
//!
//! let valuation = discount_cash_flows(&[100.0; 5], 0.08, 0.03).unwrap();
//! assert!((valuation.terminal_value - 2060.0).abs() < 1e-9);
//! ```

pub mod cash_flow;
pub mod dcf;
pub mod discount;
pub mod forecast;
pub mod lbo;
pub mod options;

pub use cash_flow::{CashFlowRecord, build_cash_flows};
pub use dcf::{DcfValuation, EquityBridge, discount_cash_flows, project_fcf};
pub use discount::{DiscountRateProfile, WaccConfig, compute_wacc, credit_spread};
pub use forecast::{ForecastConfig, ForecastSeries, StatementForecast, forecast};
pub use lbo::{LboInputs, LboResult, LboYear, evaluate_lbo};
pub use options::{OptionKind, OptionQuote, black_scholes, historical_volatility};
