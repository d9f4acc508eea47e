//! FMP API client implementation.

use crate::{
    Result,
    cache::ResponseCache,
    config::{CachePolicy, FmpConfig},
    error::FmpError,
    types::{
        BalanceSheet, CashFlowStatement, CompanyData, CompanyProfile, EnterpriseValues,
        HistoricalPrice, IncomeStatement, PeerEntry, Period, TreasuryRate,
    },
};
use chrono::{Duration, Months, Utc};
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use tasador_core::{DataError, MarketSnapshot, stats};

/// Financial Modeling Prep API client.
///
/// Cloning is cheap and clones share the response cache.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    config: FmpConfig,
    cache: Arc<ResponseCache>,
}

/// Query-string form of a ticker. Index symbols such as `^GSPC` need escaping.
fn encode_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase().replace('^', "%5E")
}

impl FmpClient {
    /// Create a new FMP client with the given API key and default settings.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(FmpConfig::new(api_key))
    }

    /// Create a client from explicit settings.
    #[must_use]
    pub fn with_config(config: FmpConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    timeout = ?config.timeout,
                    "HTTP client setup failed, using defaults without the configured timeout"
                );
                Client::new()
            });
        Self {
            client,
            config,
            cache: Arc::new(ResponseCache::new()),
        }
    }

    /// Create a new FMP client from the environment (see [`FmpConfig::from_env`]).
    ///
    /// # Errors
    ///
    /// Returns an error if `FMP_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(FmpConfig::from_env()?))
    }

    /// The settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &FmpConfig {
        &self.config
    }

    /// The shared response cache.
    #[must_use]
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        let base = &self.config.base_url;
        if endpoint.contains('?') {
            format!("{base}/{endpoint}&apikey={}", self.config.api_key)
        } else {
            format!("{base}/{endpoint}?apikey={}", self.config.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    ///
    /// Successful bodies are cached under `endpoint` when caching is enabled.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let caching = self.config.cache == CachePolicy::Enabled;

        if caching && let Some(body) = self.cache.get(endpoint).await {
            tracing::debug!(endpoint, "FMP cache hit");
            return Self::parse(&body);
        }

        tracing::debug!(endpoint, "FMP request");
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(endpoint, "FMP rate limit exceeded");
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        let parsed = Self::parse(&text)?;
        if caching {
            self.cache.insert(endpoint, text).await;
        }
        Ok(parsed)
    }

    fn parse<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
        serde_json::from_str(text).map_err(|e| {
            FmpError::Json(serde_json::Error::io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to parse: {e}. Response: {text}"),
            )))
        })
    }

    fn statement_endpoint(name: &str, symbol: &str, period: Period, limit: Option<u32>) -> String {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        format!(
            "{name}?symbol={}&period={}{}",
            encode_symbol(symbol),
            period.as_str(),
            limit_param
        )
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        self.get(&Self::statement_endpoint("income-statement", symbol, period, limit))
            .await
    }

    /// Get balance sheets for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        self.get(&Self::statement_endpoint(
            "balance-sheet-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get cash flow statements for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        self.get(&Self::statement_endpoint(
            "cash-flow-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get enterprise value records for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn enterprise_values(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<EnterpriseValues>> {
        self.get(&Self::statement_endpoint(
            "enterprise-values",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get the company profile (price, beta, market cap).
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] when the provider knows no such
    /// symbol, or an error if the API request fails.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile?symbol={}", encode_symbol(symbol));
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get the provider's peer list for a symbol, excluding the symbol itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn peers(&self, symbol: &str) -> Result<Vec<String>> {
        let endpoint = format!("stock-peers?symbol={}", encode_symbol(symbol));
        let entries: Vec<PeerEntry> = self.get(&endpoint).await?;
        let own = symbol.trim().to_uppercase();
        Ok(entries
            .into_iter()
            .map(|e| e.symbol.to_uppercase())
            .filter(|s| !s.is_empty() && *s != own)
            .collect())
    }

    /// Get daily treasury yields (percent), most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn treasury_rates(
        &self,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<TreasuryRate>> {
        let mut params = Vec::new();
        if let Some(f) = from {
            params.push(format!("from={f}"));
        }
        if let Some(t) = to {
            params.push(format!("to={t}"));
        }
        let endpoint = if params.is_empty() {
            "treasury-rates".to_string()
        } else {
            format!("treasury-rates?{}", params.join("&"))
        };
        self.get(&endpoint).await
    }

    /// Get historical daily prices for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock or index symbol (e.g. "^GSPC")
    /// * `from` - Start date (YYYY-MM-DD)
    /// * `to` - End date (YYYY-MM-DD)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<&str>,
        to: Option<&str>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut params = String::new();
        if let Some(f) = from {
            params.push_str(&format!("&from={f}"));
        }
        if let Some(t) = to {
            params.push_str(&format!("&to={t}"));
        }

        let endpoint = format!(
            "historical-price-eod/full?symbol={}{}",
            encode_symbol(symbol),
            params
        );
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Latest 10-year treasury yield as a decimal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or no record carries a 10-year yield.
    pub async fn risk_free_rate(&self) -> Result<f64> {
        let rates = self.treasury_rates(None, None).await?;
        rates
            .iter()
            .find_map(|r| r.year10)
            .map(|pct| pct / 100.0)
            .ok_or_else(|| {
                DataError::MissingMarketData {
                    symbol: "treasury-rates".to_string(),
                    field: "year10".to_string(),
                }
                .into()
            })
    }

    /// Annualized return of `index` over the last `lookback_years` years.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the series is too short.
    pub async fn market_return(&self, index: &str, lookback_years: u32) -> Result<f64> {
        let today = Utc::now().date_naive();
        let start = today
            .checked_sub_months(Months::new(lookback_years.saturating_mul(12)))
            .unwrap_or(today - Duration::days(i64::from(lookback_years) * 365));
        let from = start.format("%Y-%m-%d").to_string();
        let to = today.format("%Y-%m-%d").to_string();

        let prices = self.historical_prices(index, Some(&from), Some(&to)).await?;
        annualized_index_return(index, &prices)
    }

    /// Risk-free rate, index return and company beta in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three requests fails or the profile has
    /// no beta.
    pub async fn market_snapshot(
        &self,
        symbol: &str,
        index: &str,
        lookback_years: u32,
    ) -> Result<MarketSnapshot> {
        let (profile, risk_free_rate, market_return) = tokio::join!(
            self.profile(symbol),
            self.risk_free_rate(),
            self.market_return(index, lookback_years),
        );
        let beta = profile?.beta.ok_or_else(|| DataError::MissingMarketData {
            symbol: symbol.to_uppercase(),
            field: "beta".to_string(),
        })?;

        Ok(MarketSnapshot {
            risk_free_rate: risk_free_rate?,
            market_return: market_return?,
            beta,
        })
    }

    /// Get everything a valuation needs for one company.
    ///
    /// Statements, profile and enterprise values are fetched in parallel. The
    /// income statement and balance sheet are required; the other parts
    /// degrade to empty with a warning so that sections not depending on them
    /// can still be computed.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `periods` - Number of historical years to fetch
    ///
    /// # Errors
    ///
    /// Returns an error if the income statement or balance sheet request
    /// fails or comes back empty.
    pub async fn company_data(&self, symbol: &str, periods: u32) -> Result<CompanyData> {
        let symbol = symbol.trim().to_uppercase();
        let (income, balance, cash, profile, ev) = tokio::join!(
            self.income_statement(&symbol, Period::Annual, Some(periods)),
            self.balance_sheet(&symbol, Period::Annual, Some(periods)),
            self.cash_flow(&symbol, Period::Annual, Some(periods)),
            self.profile(&symbol),
            self.enterprise_values(&symbol, Period::Annual, Some(periods)),
        );

        let income_statements = income?;
        if income_statements.is_empty() {
            return Err(FmpError::NoData {
                symbol,
                what: "income statement".to_string(),
            });
        }
        let balance_sheets = balance?;
        if balance_sheets.is_empty() {
            return Err(FmpError::NoData {
                symbol,
                what: "balance sheet".to_string(),
            });
        }

        let cash_flows = cash.unwrap_or_else(|e| {
            tracing::warn!(%symbol, error = %e, "cash flow statement unavailable");
            Vec::new()
        });
        let profile = profile
            .map_err(|e| tracing::warn!(%symbol, error = %e, "company profile unavailable"))
            .ok();
        let enterprise_values = ev.unwrap_or_else(|e| {
            tracing::warn!(%symbol, error = %e, "enterprise values unavailable");
            Vec::new()
        });

        Ok(CompanyData {
            symbol,
            income_statements,
            balance_sheets,
            cash_flows,
            profile,
            enterprise_values,
        })
    }

    /// Get company data for several symbols concurrently.
    ///
    /// Results come back in the order of `symbols`, whatever order the
    /// requests complete in. A failing symbol does not affect the others.
    pub async fn company_data_batch(
        &self,
        symbols: &[String],
        periods: u32,
    ) -> Vec<(String, Result<CompanyData>)> {
        let fetches = symbols.iter().map(|symbol| async move {
            let result = self.company_data(symbol, periods).await;
            if let Err(e) = &result {
                tracing::warn!(%symbol, error = %e, "failed to fetch company data");
            }
            (symbol.trim().to_uppercase(), result)
        });
        join_all(fetches).await
    }
}

/// CAGR between the oldest and newest close of a price series.
fn annualized_index_return(index: &str, prices: &[HistoricalPrice]) -> Result<f64> {
    let mut dated: Vec<_> = prices
        .iter()
        .filter_map(|p| p.parsed_date().map(|d| (d, p.close)))
        .collect();
    dated.sort_by_key(|(d, _)| *d);

    let (Some(&(first_date, first_close)), Some(&(last_date, last_close))) =
        (dated.first(), dated.last())
    else {
        return Err(FmpError::NoData {
            symbol: index.to_string(),
            what: "price history".to_string(),
        });
    };

    let years = (last_date - first_date).num_days() as f64 / 365.25;
    stats::annualized_return(first_close, last_close, years).ok_or_else(|| {
        DataError::InsufficientHistory {
            symbol: index.to_string(),
            needed: 2,
            available: dated.len(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, cache: CachePolicy) -> FmpClient {
        FmpClient::with_config(
            FmpConfig::new("test_key")
                .with_base_url(server.uri())
                .with_cache(cache),
        )
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"symbol": "ACME", "price": 10.0}]))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = FmpClient::with_config(
            FmpConfig::new("test_key")
                .with_base_url(server.uri())
                .with_timeout(std::time::Duration::from_millis(50)),
        );
        let err = client.profile("ACME").await.unwrap_err();
        assert!(matches!(err, FmpError::Request(ref e) if e.is_timeout()));
    }

    #[test]
    fn test_url_building() {
        let client = FmpClient::new("test_key");
        assert_eq!(
            client.url("profile?symbol=AAPL"),
            "https://financialmodelingprep.com/stable/profile?symbol=AAPL&apikey=test_key"
        );
        assert_eq!(
            client.url("treasury-rates"),
            "https://financialmodelingprep.com/stable/treasury-rates?apikey=test_key"
        );
    }

    #[test]
    fn test_encode_symbol() {
        assert_eq!(encode_symbol(" aapl "), "AAPL");
        assert_eq!(encode_symbol("^gspc"), "%5EGSPC");
    }

    #[tokio::test]
    async fn test_income_statement_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/income-statement"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("period", "annual"))
            .and(query_param("limit", "2"))
            .and(query_param("apikey", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2024-09-28", "symbol": "AAPL", "period": "FY", "revenue": 391035000000.0},
                {"date": "2023-09-30", "symbol": "AAPL", "period": "FY", "revenue": 383285000000.0}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let income = client
            .income_statement("aapl", Period::Annual, Some(2))
            .await
            .unwrap();
        assert_eq!(income.len(), 2);
        assert_eq!(income[0].revenue, Some(391_035_000_000.0));
    }

    #[tokio::test]
    async fn test_cache_serves_repeat_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"symbol": "MSFT", "price": 420.0, "beta": 0.9}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let first = client.profile("MSFT").await.unwrap();
        let second = client.clone().profile("MSFT").await.unwrap();
        assert_eq!(first.price, second.price);
        assert_eq!(client.cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_disabled_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"symbol": "MSFT"}])),
            )
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Disabled);
        client.profile("MSFT").await.unwrap();
        client.profile("MSFT").await.unwrap();
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_rate_limit_and_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock-peers"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"Error Message": "Invalid API KEY."})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        assert!(matches!(
            client.profile("AAPL").await,
            Err(FmpError::RateLimitExceeded)
        ));
        assert!(matches!(client.peers("AAPL").await, Err(FmpError::Api(_))));
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_symbol_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        assert!(matches!(
            client.profile("ZZZZ").await,
            Err(FmpError::SymbolNotFound(s)) if s == "ZZZZ"
        ));
    }

    #[tokio::test]
    async fn test_peers_exclude_self() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock-peers"))
            .and(query_param("symbol", "AAPL"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"symbol": "MSFT", "companyName": "Microsoft"},
                {"symbol": "AAPL"},
                {"symbol": "googl"}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        assert_eq!(client.peers("AAPL").await.unwrap(), vec!["MSFT", "GOOGL"]);
    }

    #[tokio::test]
    async fn test_company_data_requires_income_statement() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let err = client.company_data("ZZZZ", 5).await.unwrap_err();
        assert!(matches!(err, FmpError::NoData { ref what, .. } if what == "income statement"));
    }

    #[tokio::test]
    async fn test_market_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"symbol": "AAPL", "beta": 1.2}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/treasury-rates"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2025-01-03", "year10": null},
                {"date": "2025-01-02", "year10": 4.5}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/historical-price-eod/full"))
            .and(query_param("symbol", "^GSPC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"symbol": "^GSPC", "date": "2025-01-02", "close": 200.0},
                {"symbol": "^GSPC", "date": "2020-01-02", "close": 150.0},
                {"symbol": "^GSPC", "date": "2015-01-02", "close": 100.0}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let snapshot = client.market_snapshot("AAPL", "^GSPC", 10).await.unwrap();
        assert_relative_eq!(snapshot.risk_free_rate, 0.045);
        assert_relative_eq!(snapshot.beta, 1.2);
        assert_relative_eq!(
            snapshot.market_return,
            2.0_f64.powf(0.1) - 1.0,
            epsilon = 1e-4
        );
    }

    #[tokio::test]
    async fn test_market_snapshot_missing_beta() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"symbol": "NEW"}])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/treasury-rates"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"date": "2025-01-02", "year10": 4.0}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/historical-price-eod/full"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"date": "2025-01-02", "close": 110.0},
                {"date": "2024-01-02", "close": 100.0}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let err = client.market_snapshot("NEW", "^GSPC", 1).await.unwrap_err();
        assert!(matches!(
            err,
            FmpError::Data(DataError::MissingMarketData { ref field, .. }) if field == "beta"
        ));
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let server = MockServer::start().await;
        for (symbol, revenue) in [("AAA", 10.0), ("CCC", 30.0)] {
            Mock::given(method("GET"))
                .and(path("/income-statement"))
                .and(query_param("symbol", symbol))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!([{"date": "2024-12-31", "revenue": revenue}])),
                )
                .mount(&server)
                .await;
            Mock::given(method("GET"))
                .and(path("/balance-sheet-statement"))
                .and(query_param("symbol", symbol))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!([{"date": "2024-12-31", "totalDebt": 1.0}])),
                )
                .mount(&server)
                .await;
        }
        // Everything else, including all of BBB, is empty or missing.
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, CachePolicy::Enabled);
        let symbols = vec!["AAA".to_string(), "bbb".to_string(), "CCC".to_string()];
        let results = client.company_data_batch(&symbols, 1).await;

        let order: Vec<&str> = results.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(order, vec!["AAA", "BBB", "CCC"]);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(
            results[2].1.as_ref().unwrap().latest_income().unwrap().revenue,
            Some(30.0)
        );
    }
}
