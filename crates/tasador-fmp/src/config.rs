//! Client configuration.

use crate::{Result, error::FmpError};
use std::env;
use std::time::Duration;

/// Base URL for the FMP stable API.
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether responses are memoised for the lifetime of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every successful response body, keyed by endpoint and query.
    #[default]
    Enabled,
    /// Always hit the network.
    Disabled,
}

impl CachePolicy {
    /// Parse an `on`/`off` style flag. Unknown values keep the cache enabled.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "off" | "false" | "0" | "no" | "disabled" => Self::Disabled,
            _ => Self::Enabled,
        }
    }
}

/// Connection settings for [`crate::FmpClient`].
#[derive(Clone)]
pub struct FmpConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Access credential appended to every request.
    pub api_key: String,
    /// Response caching.
    pub cache: CachePolicy,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for FmpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("cache", &self.cache)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl FmpConfig {
    /// Default settings for the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            cache: CachePolicy::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read settings from the environment.
    ///
    /// This will also load from a `.env` file if present. `FMP_API_KEY` is
    /// required; `FMP_BASE_URL` and `FMP_CACHE` are optional.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::MissingApiKey`] if `FMP_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Ok(base_url) = env::var("FMP_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        if let Ok(cache) = env::var("FMP_CACHE") {
            config.cache = CachePolicy::parse(&cache);
        }

        Ok(config)
    }

    /// Override the API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the cache policy.
    #[must_use]
    pub const fn with_cache(mut self, cache: CachePolicy) -> Self {
        self.cache = cache;
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
