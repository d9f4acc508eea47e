//! CLI subcommand modules.
//!
//! This module contains the implementations for all tasador CLI subcommands.

pub(crate) mod comps;
pub(crate) mod dcf;
pub(crate) mod forecast;
pub(crate) mod lbo;
pub(crate) mod option;
pub(crate) mod report;
pub(crate) mod wacc;
