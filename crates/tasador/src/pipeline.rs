//! One valuation pass for one ticker.
//!
//! [`fetch_inputs`] performs every provider call up front. [`evaluate`] is
//! then pure: each section is computed from the fetched inputs and reported
//! as [`Section::Ready`] or [`Section::Failed`]. A failed section never stops
//! the others; sections that depend on it fail with the upstream error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tasador_comps::{
    Comparables, ImpliedValuation, PeerFinancials, build_comparables, implied_prices,
    parse_peers, resolve_peers,
};
use tasador_core::{
    DataError, DomainError, ErrorKind, FinancialStatement, LineItem, MarketSnapshot, Result,
    TasadorError,
};
use tasador_fmp::{CompanyData, FmpClient};
use tasador_model::{
    CashFlowRecord, DcfValuation, DiscountRateProfile, EquityBridge, ForecastConfig,
    LboInputs, LboResult, StatementForecast, WaccConfig, build_cash_flows,
    cash_flow::free_cash_flows, compute_wacc, discount,
    discount_cash_flows, evaluate_lbo, forecast::historical_growth, lbo, project_fcf,
};

/// Default perpetual growth after the forecast horizon.
pub const DEFAULT_TERMINAL_GROWTH: f64 = 0.025;
/// Default market index for the expected market return.
pub const DEFAULT_MARKET_INDEX: &str = "^GSPC";
/// Default lookback for the market return, in years.
pub const DEFAULT_LOOKBACK_YEARS: u32 = 10;
/// Default number of historical statement years to fetch.
pub const DEFAULT_HISTORY_YEARS: u32 = 5;

/// How the DCF obtains its free cash flows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DcfMode {
    /// Forecast the statements and build cash flows from them.
    #[default]
    Statement,
    /// Grow the last reported free cash flow at a flat rate.
    Simple {
        /// Annual FCF growth.
        #[serde(rename = "fcfGrowth")]
        fcf_growth: f64,
    },
}

/// Buyout assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LboAssumptions {
    /// Purchase price. `None` uses the current enterprise value.
    pub purchase_price: Option<f64>,
    /// Share of the price funded with debt (default: 0.6)
    pub debt_fraction: f64,
    /// Interest rate on the debt (default: 0.08)
    pub interest_rate: f64,
    /// Exit EV/EBITDA multiple (default: 8)
    pub exit_multiple: f64,
    /// EBITDA growth. `None` follows revenue growth.
    pub ebitda_growth: Option<f64>,
    /// Yearly debt paydown, starting with year 1.
    pub paydown: Vec<f64>,
}

impl Default for LboAssumptions {
    fn default() -> Self {
        Self {
            purchase_price: None,
            debt_fraction: lbo::DEFAULT_DEBT_FRACTION,
            interest_rate: lbo::DEFAULT_INTEREST_RATE,
            exit_multiple: lbo::DEFAULT_EXIT_MULTIPLE,
            ebitda_growth: None,
            paydown: Vec::new(),
        }
    }
}

/// Everything one valuation needs from the caller.
///
/// Missing JSON fields take their defaults, so an assumptions file only has
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValuationRequest {
    /// Subject ticker.
    pub ticker: String,
    /// Forecast horizon in years (default: 5)
    pub horizon: usize,
    /// Revenue growth override.
    pub growth_rate: Option<f64>,
    /// Discount rate override. `None` computes the WACC.
    pub wacc: Option<f64>,
    /// Perpetual growth after the horizon (default: 0.025)
    pub terminal_growth: f64,
    /// Effective tax rate (default: 0.21)
    pub tax_rate: f64,
    /// Comma-separated peer tickers.
    pub peers: Option<String>,
    /// Buyout assumptions.
    pub lbo: LboAssumptions,
    /// DCF cash flow source.
    pub dcf_mode: DcfMode,
    /// Index for the market return (default: ^GSPC)
    pub market_index: String,
    /// Market return lookback in years (default: 10)
    pub market_lookback_years: u32,
    /// Historical statement years to fetch (default: 5)
    pub history_years: u32,
}

impl Default for ValuationRequest {
    fn default() -> Self {
        Self {
            ticker: String::new(),
            horizon: tasador_model::forecast::DEFAULT_HORIZON,
            growth_rate: None,
            wacc: None,
            terminal_growth: DEFAULT_TERMINAL_GROWTH,
            tax_rate: discount::DEFAULT_TAX_RATE,
            peers: None,
            lbo: LboAssumptions::default(),
            dcf_mode: DcfMode::default(),
            market_index: DEFAULT_MARKET_INDEX.to_string(),
            market_lookback_years: DEFAULT_LOOKBACK_YEARS,
            history_years: DEFAULT_HISTORY_YEARS,
        }
    }
}

impl ValuationRequest {
    /// Default request for `ticker`.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// The ticker as sent to the provider.
    #[must_use]
    pub fn symbol(&self) -> String {
        self.ticker.trim().to_uppercase()
    }

    /// Reject requests no section could use.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] for an empty ticker and
    /// [`DomainError::InvalidHorizon`] for a zero horizon.
    pub fn validate(&self) -> Result<()> {
        if self.symbol().is_empty() {
            return Err(DomainError::InvalidInput("ticker is empty".to_string()).into());
        }
        if self.horizon == 0 {
            return Err(DomainError::InvalidHorizon(0).into());
        }
        Ok(())
    }

    /// Forecast settings carried by this request.
    #[must_use]
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            growth_rate: self.growth_rate,
            horizon: self.horizon,
            ..ForecastConfig::default()
        }
    }

    /// WACC settings carried by this request.
    #[must_use]
    pub fn wacc_config(&self) -> WaccConfig {
        WaccConfig::default().with_tax_rate(self.tax_rate)
    }
}

/// Outcome of one report section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "camelCase")]
pub enum Section<T> {
    /// The section was computed.
    Ready(T),
    /// The section could not be computed.
    Failed {
        /// Failure family.
        kind: ErrorKind,
        /// Human-readable cause naming the ticker or field.
        message: String,
    },
}

impl<T> Section<T> {
    /// Wrap a result, logging failures under `name`.
    pub fn from_result(name: &str, ticker: &str, result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => {
                tracing::warn!(section = name, %ticker, kind = ?e.kind(), error = %e, "section failed");
                Self::Failed {
                    kind: e.kind(),
                    message: e.to_string(),
                }
            }
        }
    }

    /// The computed value, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Failed { .. } => None,
        }
    }

    /// Whether the section was computed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Failure kind and message, if the section failed.
    #[must_use]
    pub fn failure(&self) -> Option<(ErrorKind, &str)> {
        match self {
            Self::Ready(_) => None,
            Self::Failed { kind, message } => Some((*kind, message.as_str())),
        }
    }
}

/// DCF section: the cash flows used and their present value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcfReport {
    /// Cash flow source.
    pub mode: DcfMode,
    /// Undiscounted FCF for years 1..=N.
    pub free_cash_flows: Vec<f64>,
    /// Present values.
    pub valuation: DcfValuation,
}

/// Comparables section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompsReport {
    /// Peer table and summary.
    pub comparables: Comparables,
    /// Subject prices implied by peer medians.
    pub implied: Vec<ImpliedValuation>,
}

/// Full output of one valuation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    /// Subject ticker.
    pub ticker: String,
    /// Company name, when the profile was available.
    pub company_name: Option<String>,
    /// Current share price, when available.
    pub price: Option<f64>,
    /// Peers used for comparables, in order.
    pub peers: Vec<String>,
    /// Risk-free rate, market return and beta.
    pub market: Section<MarketSnapshot>,
    /// Statement forecast.
    pub forecast: Section<StatementForecast>,
    /// Free cash flow build.
    pub cash_flows: Section<Vec<CashFlowRecord>>,
    /// WACC and its inputs.
    pub discount_rate: Section<DiscountRateProfile>,
    /// DCF valuation.
    pub dcf: Section<DcfReport>,
    /// DCF enterprise value to price per share.
    pub equity_bridge: Section<EquityBridge>,
    /// Buyout returns.
    pub lbo: Section<LboResult>,
    /// Peer multiples.
    pub comparables: Section<CompsReport>,
}

impl ValuationReport {
    /// Names and messages of the failed sections.
    #[must_use]
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        [
            ("market", self.market.failure()),
            ("forecast", self.forecast.failure()),
            ("cash_flows", self.cash_flows.failure()),
            ("discount_rate", self.discount_rate.failure()),
            ("dcf", self.dcf.failure()),
            ("equity_bridge", self.equity_bridge.failure()),
            ("lbo", self.lbo.failure()),
            ("comparables", self.comparables.failure()),
        ]
        .into_iter()
        .filter_map(|(name, failure)| failure.map(|(_, message)| (name, message)))
        .collect()
    }
}

/// Provider data for one valuation, fetched up front.
#[derive(Debug, Clone)]
pub struct ValuationInputs {
    /// Subject ticker.
    pub ticker: String,
    /// Subject statements, profile and enterprise values.
    pub company: Result<CompanyData>,
    /// Market snapshot for the cost of equity.
    pub market: Result<MarketSnapshot>,
    /// Peers, in order.
    pub peers: Vec<String>,
    /// Per-peer data, in the order of `peers`.
    pub peer_data: Vec<(String, Result<CompanyData>)>,
}

fn shared<T>(result: &Result<T>) -> Result<&T> {
    result.as_ref().map_err(Clone::clone)
}

fn missing_market(ticker: &str, field: &str) -> TasadorError {
    DataError::MissingMarketData {
        symbol: ticker.to_string(),
        field: field.to_string(),
    }
    .into()
}

/// Market and fundamental inputs of `data` for the comparables table.
#[must_use]
pub fn peer_financials(data: &CompanyData) -> PeerFinancials {
    let income = data.latest_income();
    PeerFinancials {
        ticker: data.symbol.clone(),
        price: data.price(),
        market_cap: data.market_cap(),
        enterprise_value: data.enterprise_value(),
        revenue: income.and_then(|i| i.revenue),
        ebitda: income.and_then(|i| i.ebitda),
        net_income: income.and_then(|i| i.net_income),
        book_value: data
            .latest_balance()
            .and_then(|b| b.total_stockholders_equity),
    }
}

/// Peer table for `peers` plus the subject's implied prices.
///
/// Peers whose data failed to load are skipped. Without a subject the table
/// is still built and the implied prices are empty.
///
/// # Errors
///
/// Returns [`DataError::Empty`] when no peer has data.
pub fn compare(
    ticker: &str,
    subject: Option<&CompanyData>,
    peers: &[String],
    peer_data: &[(String, Result<CompanyData>)],
) -> Result<CompsReport> {
    let financials: HashMap<String, PeerFinancials> = peer_data
        .iter()
        .filter_map(|(symbol, result)| {
            result
                .as_ref()
                .ok()
                .map(|data| (symbol.clone(), peer_financials(data)))
        })
        .collect();

    let comparables = build_comparables(peers, &financials);
    if comparables.rows.is_empty() {
        return Err(DataError::Empty {
            symbol: ticker.to_string(),
            what: "peer".to_string(),
        }
        .into());
    }

    let implied = subject
        .map(|c| implied_prices(&peer_financials(c), &comparables.summary))
        .unwrap_or_default();
    Ok(CompsReport {
        comparables,
        implied,
    })
}

/// Fetch everything a valuation of `request.ticker` needs.
///
/// Subject data, market snapshot and peer discovery run concurrently; peer
/// financials are fetched concurrently once the peer list is known. Failures
/// are kept per input and surface later as failed sections.
pub async fn fetch_inputs(client: &FmpClient, request: &ValuationRequest) -> ValuationInputs {
    let ticker = request.symbol();

    let (company, market, peers) = tokio::join!(
        client.company_data(&ticker, request.history_years),
        client.market_snapshot(&ticker, &request.market_index, request.market_lookback_years),
        fetch_peers(client, &ticker, request.peers.as_deref()),
    );
    let peer_data = fetch_peer_data(client, &peers).await;

    ValuationInputs {
        ticker,
        company: company.map_err(TasadorError::from),
        market: market.map_err(TasadorError::from),
        peers,
        peer_data,
    }
}

/// Peer list for `ticker`.
///
/// The provider is only asked when `explicit` names no ticker; a failed
/// lookup falls through to the default peer set.
pub async fn fetch_peers(client: &FmpClient, ticker: &str, explicit: Option<&str>) -> Vec<String> {
    let discovered = if explicit.is_some_and(|p| !parse_peers(p).is_empty()) {
        None
    } else {
        client
            .peers(ticker)
            .await
            .map_err(|e| tracing::warn!(%ticker, error = %e, "peer discovery failed"))
            .ok()
    };
    resolve_peers(ticker, explicit, discovered)
}

/// Latest-year data for every peer, in the order of `peers`.
pub async fn fetch_peer_data(
    client: &FmpClient,
    peers: &[String],
) -> Vec<(String, Result<CompanyData>)> {
    tracing::debug!(peers = ?peers, "fetching peer financials");
    client
        .company_data_batch(peers, 1)
        .await
        .into_iter()
        .map(|(symbol, result)| (symbol, result.map_err(TasadorError::from)))
        .collect()
}

/// Compute every section from already-fetched inputs.
#[must_use]
pub fn evaluate(request: &ValuationRequest, inputs: &ValuationInputs) -> ValuationReport {
    let ticker = inputs.ticker.as_str();

    let statement: Result<FinancialStatement> =
        shared(&inputs.company).map(CompanyData::statement);

    let projection = shared(&statement)
        .and_then(|s| tasador_model::forecast(s, &request.forecast_config()));

    let cash_flows = shared(&projection).and_then(build_cash_flows);

    let discount_rate = shared(&statement).and_then(|s| {
        let market = shared(&inputs.market)?;
        compute_wacc(s, market, &request.wacc_config())
    });

    let wacc = match request.wacc {
        Some(w) => Ok(w),
        None => shared(&discount_rate).map(|p| p.wacc),
    };

    let dcf = shared(&wacc).and_then(|&wacc| {
        let fcf = match request.dcf_mode {
            DcfMode::Statement => free_cash_flows(shared(&cash_flows)?),
            DcfMode::Simple { fcf_growth } => {
                let company = shared(&inputs.company)?;
                let last_fcf = match company.last_free_cash_flow() {
                    Some(v) => v,
                    None => {
                        let s = shared(&statement)?;
                        s.latest_value(LineItem::OperatingCashFlow)?
                            + s.latest_value(LineItem::CapitalExpenditure)?
                    }
                };
                project_fcf(last_fcf, fcf_growth, request.horizon)
            }
        };
        let valuation = discount_cash_flows(&fcf, wacc, request.terminal_growth)?;
        Ok(DcfReport {
            mode: request.dcf_mode,
            free_cash_flows: fcf,
            valuation,
        })
    });

    let equity_bridge = shared(&dcf).and_then(|d| {
        let s = shared(&statement)?;
        let company = shared(&inputs.company)?;
        let shares = company
            .shares_outstanding()
            .ok_or_else(|| missing_market(ticker, "sharesOutstanding"))?;
        EquityBridge::new(
            ticker,
            d.valuation.total_value,
            s.latest_value(LineItem::TotalDebt)?,
            s.latest_value(LineItem::CashAndCashEquivalents)?,
            shares,
        )
    });

    let lbo = shared(&statement).and_then(|s| {
        let company = shared(&inputs.company)?;
        let entry_ebitda = s.latest_value(LineItem::Ebitda)?;
        let purchase_price = match request.lbo.purchase_price {
            Some(p) => p,
            None => company
                .enterprise_value()
                .ok_or_else(|| missing_market(ticker, "enterpriseValue"))?,
        };
        let ebitda_growth = match request.lbo.ebitda_growth.or(request.growth_rate) {
            Some(g) => g,
            None => match &projection {
                Ok(f) => f.growth_rate,
                Err(_) => historical_growth(s)?,
            },
        };
        evaluate_lbo(
            &LboInputs::new(purchase_price, entry_ebitda)
                .with_debt_fraction(request.lbo.debt_fraction)
                .with_interest_rate(request.lbo.interest_rate)
                .with_exit_multiple(request.lbo.exit_multiple)
                .with_ebitda_growth(ebitda_growth)
                .with_horizon(request.horizon)
                .with_paydown(request.lbo.paydown.clone()),
        )
    });

    let comps = compare(
        ticker,
        inputs.company.as_ref().ok(),
        &inputs.peers,
        &inputs.peer_data,
    );

    let company = inputs.company.as_ref().ok();
    ValuationReport {
        ticker: ticker.to_string(),
        company_name: company
            .and_then(|c| c.profile.as_ref())
            .and_then(|p| p.company_name.clone()),
        price: company.and_then(CompanyData::price),
        peers: inputs.peers.clone(),
        market: Section::from_result("market", ticker, inputs.market.clone()),
        forecast: Section::from_result("forecast", ticker, projection),
        cash_flows: Section::from_result("cash_flows", ticker, cash_flows),
        discount_rate: Section::from_result("discount_rate", ticker, discount_rate),
        dcf: Section::from_result("dcf", ticker, dcf),
        equity_bridge: Section::from_result("equity_bridge", ticker, equity_bridge),
        lbo: Section::from_result("lbo", ticker, lbo),
        comparables: Section::from_result("comparables", ticker, comps),
    }
}

/// Validate, fetch and evaluate.
///
/// # Errors
///
/// Only an invalid request fails as a whole; provider and model failures are
/// reported per section.
pub async fn run(client: &FmpClient, request: &ValuationRequest) -> Result<ValuationReport> {
    request.validate()?;
    let inputs = fetch_inputs(client, request).await;
    Ok(evaluate(request, &inputs))
}
