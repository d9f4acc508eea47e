#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tasador/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core definitions for the Tasador valuation toolkit.
//!
//! This crate provides the pieces every other Tasador crate builds on: the
//! error taxonomy (data, domain and transport failures), the yearly
//! financial-statement model with explicit missing fields, and the small
//! statistics used when summarising peer multiples.

/// The version of the tasador-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{DataError, DomainError, ErrorKind, Result, TasadorError};
pub use types::{Date, FinancialStatement, LineItem, MarketSnapshot, StatementYear, Symbol};
