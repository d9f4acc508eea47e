//! Option command implementation.

use crate::args::OutputFormat;
use crate::output::{banner, pct, print_json};
use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::Serialize;
use tasador::fmp::FmpClient;
use tasador::model::options::DEFAULT_VOLATILITY;
use tasador::model::{OptionKind, OptionQuote, black_scholes, historical_volatility};

/// Contract and market inputs from the command line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OptionParams {
    pub(crate) kind: OptionKind,
    pub(crate) strike: f64,
    pub(crate) spot: Option<f64>,
    pub(crate) years: f64,
    pub(crate) rate: f64,
    pub(crate) vol: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum VolatilitySource {
    Input,
    Historical,
    Default,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionOutput {
    kind: OptionKind,
    spot: f64,
    strike: f64,
    years: f64,
    rate: f64,
    volatility: f64,
    volatility_source: VolatilitySource,
    quote: OptionQuote,
}

/// Daily closes over the last year, oldest first.
async fn fetch_closes(ticker: &str) -> Result<Vec<f64>> {
    let client = FmpClient::from_env()?;
    let today = Utc::now().date_naive();
    let from = (today - Duration::days(365)).format("%Y-%m-%d").to_string();
    let to = today.format("%Y-%m-%d").to_string();

    let mut prices = client
        .historical_prices(ticker, Some(&from), Some(&to))
        .await?;
    prices.sort_by_key(|p| p.parsed_date());
    Ok(prices.into_iter().map(|p| p.close).collect())
}

fn price(params: OptionParams, closes: &[f64]) -> Result<OptionOutput> {
    let spot = params
        .spot
        .or_else(|| closes.last().copied())
        .context("pass --spot, or --ticker to use the last close")?;

    let (volatility, volatility_source) = match params.vol {
        Some(v) => (v, VolatilitySource::Input),
        None => match historical_volatility(closes) {
            Some(v) => (v, VolatilitySource::Historical),
            None => {
                tracing::warn!(
                    closes = closes.len(),
                    "not enough price history for volatility, using {DEFAULT_VOLATILITY}"
                );
                (DEFAULT_VOLATILITY, VolatilitySource::Default)
            }
        },
    };

    let quote = black_scholes(
        spot,
        params.strike,
        params.years,
        params.rate,
        volatility,
        params.kind,
    )?;
    Ok(OptionOutput {
        kind: params.kind,
        spot,
        strike: params.strike,
        years: params.years,
        rate: params.rate,
        volatility,
        volatility_source,
        quote,
    })
}

/// Price a European option, optionally reading spot and volatility from `ticker`.
pub(crate) async fn run(params: OptionParams, ticker: Option<&str>, format: OutputFormat) -> Result<()> {
    let closes = match ticker {
        Some(t) => fetch_closes(t).await?,
        None => Vec::new(),
    };
    let output = price(params, &closes)?;

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Text => {
            banner("Black-Scholes");
            let q = &output.quote;
            println!("Kind:       {:?}", output.kind);
            println!("Spot:       {:.2}", output.spot);
            println!("Strike:     {:.2}", output.strike);
            println!("Expiry:     {:.3} years", output.years);
            println!("Rate:       {}", pct(output.rate));
            println!(
                "Volatility: {} ({:?})",
                pct(output.volatility),
                output.volatility_source
            );
            println!();
            println!("{:<10} {:>12.4}", "Price", q.price);
            println!("{:<10} {:>12.4}", "Delta", q.delta);
            println!("{:<10} {:>12.4}", "Gamma", q.gamma);
            println!("{:<10} {:>12.4}", "Theta", q.theta);
            println!("{:<10} {:>12.4}", "Vega", q.vega);
            println!("{:<10} {:>12.4}", "Rho", q.rho);
            println!();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> OptionParams {
        OptionParams {
            kind: OptionKind::Call,
            strike: 100.0,
            spot: None,
            years: 0.5,
            rate: 0.05,
            vol: None,
        }
    }

    #[test]
    fn test_spot_required_offline() {
        assert!(price(params(), &[]).is_err());
    }

    #[test]
    fn test_default_volatility_fallback() {
        let p = OptionParams {
            spot: Some(100.0),
            ..params()
        };
        let out = price(p, &[]).unwrap();
        assert_eq!(out.volatility_source, VolatilitySource::Default);
        assert_relative_eq!(out.volatility, 0.25);
    }

    #[test]
    fn test_historical_volatility_from_closes() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i % 3)).collect();
        let out = price(params(), &closes).unwrap();
        assert_eq!(out.volatility_source, VolatilitySource::Historical);
        assert_relative_eq!(out.spot, *closes.last().unwrap());
        assert!(out.volatility > 0.0);
    }
}
