//! Comparable-company analysis for Tasador.
//!
//! This crate computes trading multiples across a peer set and summarises
//! them:
//! - [`multiples`]: per-peer P/E, EV/EBITDA, EV/Revenue and P/B
//! - [`table`]: the peer table with mean and median per multiple
//! - [`implied`]: a subject price implied by the peer median
//! - [`peers`]: peer list parsing and fallbacks
//!
//! A multiple whose inputs are missing or whose denominator is zero is `None`
//! and never enters the summary statistics.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use tasador_comps::{Multiple, PeerFinancials, build_comparables};
//!
//! let mut financials = HashMap::new();
//! financials.insert(
//!     "MSFT".to_string(),
//!     PeerFinancials::new("MSFT")
//!         .with_price(40.0)
//!         .with_market_cap(4_000.0)
//!         .with_net_income(200.0),
//! );
//!
//! let comps = build_comparables(&["MSFT".to_string()], &financials);
//! assert_eq!(comps.rows[0].multiple(Multiple::PriceToEarnings), Some(20.0));
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod implied;
pub mod multiples;
pub mod peers;
pub mod table;

pub use implied::{ImpliedValuation, implied_price, implied_prices};
pub use multiples::{ComparableRow, Multiple, PeerFinancials};
pub use peers::{DEFAULT_PEERS, parse_peers, resolve_peers};
pub use table::{ComparableSummary, Comparables, build_comparables};
