//! Black-Scholes pricing of European options.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use tasador_core::{DomainError, Result, stats};

/// Trading days per year used to annualize daily volatility.
pub const TRADING_DAYS: f64 = 252.0;

/// Rolling window for [`historical_volatility`].
pub const VOLATILITY_WINDOW: usize = 21;

/// Volatility to assume when no price history is available.
pub const DEFAULT_VOLATILITY: f64 = 0.25;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

/// Option price and sensitivities.
///
/// Theta is per year, vega and rho per unit (not per percentage point).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Fair value.
    pub price: f64,
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// dV/dt.
    pub theta: f64,
    /// dV/dσ.
    pub vega: f64,
    /// dV/dr.
    pub rho: f64,
}

/// Price a European option.
///
/// With no time left or no volatility the option is worth its intrinsic
/// value and every Greek is zero.
///
/// # Arguments
///
/// * `spot` - Underlying price
/// * `strike` - Strike price
/// * `t_years` - Time to expiry in years
/// * `rate` - Continuously compounded risk-free rate
/// * `sigma` - Annualized volatility
/// * `kind` - Call or put
///
/// # Errors
///
/// Returns [`DomainError::InvalidInput`] when spot or strike is not positive,
/// or any input is not finite.
pub fn black_scholes(
    spot: f64,
    strike: f64,
    t_years: f64,
    rate: f64,
    sigma: f64,
    kind: OptionKind,
) -> Result<OptionQuote> {
    if ![spot, strike, t_years, rate, sigma].iter().all(|x| x.is_finite()) {
        return Err(DomainError::InvalidInput("non-finite option input".to_string()).into());
    }
    if spot <= 0.0 || strike <= 0.0 {
        return Err(DomainError::InvalidInput(format!(
            "spot {spot} and strike {strike} must be positive"
        ))
        .into());
    }

    if t_years <= 0.0 || sigma <= 0.0 {
        let price = match kind {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        };
        return Ok(OptionQuote {
            price,
            ..OptionQuote::default()
        });
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| DomainError::InvalidInput(format!("standard normal: {e}")))?;

    let sqrt_t = t_years.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * t_years) / (sigma * sqrt_t);
    let d2 = d1 - sigma * sqrt_t;
    let discount = (-rate * t_years).exp();
    let pdf_d1 = normal.pdf(d1);

    let gamma = pdf_d1 / (spot * sigma * sqrt_t);
    let vega = spot * pdf_d1 * sqrt_t;
    let decay = -(spot * pdf_d1 * sigma) / (2.0 * sqrt_t);

    let quote = match kind {
        OptionKind::Call => OptionQuote {
            price: spot * normal.cdf(d1) - strike * discount * normal.cdf(d2),
            delta: normal.cdf(d1),
            gamma,
            theta: decay - rate * strike * discount * normal.cdf(d2),
            vega,
            rho: strike * t_years * discount * normal.cdf(d2),
        },
        OptionKind::Put => OptionQuote {
            price: strike * discount * normal.cdf(-d2) - spot * normal.cdf(-d1),
            delta: normal.cdf(d1) - 1.0,
            gamma,
            theta: decay + rate * strike * discount * normal.cdf(-d2),
            vega,
            rho: -strike * t_years * discount * normal.cdf(-d2),
        },
    };
    Ok(quote)
}

/// Annualized volatility of daily closes.
///
/// Uses the standard deviation of the last 21 daily returns when more than
/// 21 are available, otherwise of all returns, scaled by √252. Returns `None`
/// for fewer than three prices or a non-positive close.
#[must_use]
pub fn historical_volatility(closes: &[f64]) -> Option<f64> {
    if closes.iter().any(|c| !c.is_finite() || *c <= 0.0) {
        return None;
    }
    let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
    let window = if returns.len() > VOLATILITY_WINDOW {
        &returns[returns.len() - VOLATILITY_WINDOW..]
    } else {
        &returns[..]
    };
    stats::sample_std(window).map(|std| std * TRADING_DAYS.sqrt())
}
