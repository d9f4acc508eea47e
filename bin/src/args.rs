//! Shared command-line arguments.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};
use tasador::ValuationRequest;
use tasador::model::OptionKind;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Option type on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OptionKindArg {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl From<OptionKindArg> for OptionKind {
    fn from(kind: OptionKindArg) -> Self {
        match kind {
            OptionKindArg::Call => Self::Call,
            OptionKindArg::Put => Self::Put,
        }
    }
}

/// Valuation inputs shared by the data-backed commands.
///
/// Flags override the assumptions file, which overrides the defaults.
#[derive(Debug, Args)]
pub(crate) struct RequestArgs {
    /// Ticker symbol
    pub(crate) ticker: String,

    /// JSON file with valuation assumptions
    #[arg(short, long)]
    pub(crate) assumptions: Option<PathBuf>,

    /// Forecast horizon in years
    #[arg(short = 'H', long)]
    pub(crate) horizon: Option<usize>,

    /// Revenue growth override
    #[arg(long)]
    pub(crate) growth: Option<f64>,

    /// Discount rate override
    #[arg(long)]
    pub(crate) wacc: Option<f64>,

    /// Perpetual growth after the horizon
    #[arg(short = 'g', long)]
    pub(crate) terminal_growth: Option<f64>,

    /// Effective tax rate
    #[arg(long)]
    pub(crate) tax_rate: Option<f64>,

    /// Comma-separated peer tickers
    #[arg(short, long)]
    pub(crate) peers: Option<String>,

    /// Value the DCF from the last reported FCF grown at this rate
    #[arg(long)]
    pub(crate) simple_fcf_growth: Option<f64>,
}

impl RequestArgs {
    /// Build the request.
    pub(crate) fn into_request(self) -> Result<ValuationRequest> {
        let mut request = match &self.assumptions {
            Some(path) => load_assumptions(path)?,
            None => ValuationRequest::default(),
        };

        request.ticker = self.ticker;
        if let Some(h) = self.horizon {
            request.horizon = h;
        }
        if self.growth.is_some() {
            request.growth_rate = self.growth;
        }
        if self.wacc.is_some() {
            request.wacc = self.wacc;
        }
        if let Some(g) = self.terminal_growth {
            request.terminal_growth = g;
        }
        if let Some(t) = self.tax_rate {
            request.tax_rate = t;
        }
        if self.peers.is_some() {
            request.peers = self.peers;
        }
        if let Some(fcf_growth) = self.simple_fcf_growth {
            request.dcf_mode = tasador::DcfMode::Simple { fcf_growth };
        }

        request.validate()?;
        Ok(request)
    }
}

fn load_assumptions(path: &Path) -> Result<ValuationRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading assumptions from {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsing assumptions in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(ticker: &str) -> RequestArgs {
        RequestArgs {
            ticker: ticker.to_string(),
            assumptions: None,
            horizon: None,
            growth: None,
            wacc: None,
            terminal_growth: None,
            tax_rate: None,
            peers: None,
            simple_fcf_growth: None,
        }
    }

    #[test]
    fn test_defaults() {
        let request = args("AAPL").into_request().unwrap();
        assert_eq!(request.ticker, "AAPL");
        assert_eq!(request.horizon, 5);
        assert!(request.wacc.is_none());
    }

    #[test]
    fn test_flags_override() {
        let mut a = args("AAPL");
        a.horizon = Some(7);
        a.wacc = Some(0.09);
        a.peers = Some("MSFT,GOOGL".to_string());
        a.simple_fcf_growth = Some(0.02);
        let request = a.into_request().unwrap();
        assert_eq!(request.horizon, 7);
        assert_relative_eq!(request.wacc.unwrap(), 0.09);
        assert_eq!(request.peers.as_deref(), Some("MSFT,GOOGL"));
        assert_eq!(request.dcf_mode, tasador::DcfMode::Simple { fcf_growth: 0.02 });
    }

    #[test]
    fn test_assumptions_file() {
        let path = std::env::temp_dir().join(format!("tasador-assumptions-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"horizon": 3, "taxRate": 0.25, "lbo": {"exitMultiple": 9.0}}"#)
            .unwrap();

        let mut a = args("KO");
        a.assumptions = Some(path.clone());
        a.horizon = Some(4);
        let request = a.into_request().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(request.ticker, "KO");
        assert_eq!(request.horizon, 4);
        assert_relative_eq!(request.tax_rate, 0.25);
        assert_relative_eq!(request.lbo.exit_multiple, 9.0);
    }

    #[test]
    fn test_invalid_request() {
        let mut a = args("AAPL");
        a.horizon = Some(0);
        assert!(a.into_request().is_err());
        assert!(args(" ").into_request().is_err());
    }

    #[test]
    fn test_missing_assumptions_file() {
        let mut a = args("AAPL");
        a.assumptions = Some(PathBuf::from("/nonexistent/assumptions.json"));
        let err = a.into_request().unwrap_err();
        assert!(err.to_string().contains("reading assumptions"));
    }
}
