//! Builder for [`BudgetCache`] instances.

use std::sync::Arc;
use std::time::Duration;

use super::budget::{BudgetCache, CacheConfig};
use crate::clock::{Clock, TokioClock};
use crate::config::Settings;
use crate::error::ConfigError;
use crate::providers::{DEFAULT_HTTP_TIMEOUT, KeyInfoFetcher, LiteLlmClient, RetryConfig};

/// Builder for configuring a [`BudgetCache`].
///
/// Either [`base_url`](Self::base_url) (builds a [`LiteLlmClient`]) or
/// [`fetcher`](Self::fetcher) must be set; an explicit fetcher wins.
///
/// ```rust,no_run
/// # use litellm_budget::{BudgetCache, RetryConfig};
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = BudgetCache::builder()
///     .base_url("http://localhost:4000")
///     .retry(RetryConfig::new().max_retries(1))
///     .build()?;
/// let info = cache.get("sk-1234").await?;
/// println!("spent {:.2}", info.spend_or_zero());
/// # Ok(())
/// # }
/// ```
pub struct BudgetCacheBuilder {
    base_url: Option<String>,
    fetcher: Option<Arc<dyn KeyInfoFetcher>>,
    http_timeout: Duration,
    retry: RetryConfig,
    cache: CacheConfig,
    clock: Arc<dyn Clock>,
}

impl BudgetCacheBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            fetcher: None,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            retry: RetryConfig::default(),
            cache: CacheConfig::default(),
            clock: Arc::new(TokioClock),
        }
    }

    /// Proxy base URL, e.g. `http://localhost:4000`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Use a custom fetcher instead of the HTTP client.
    pub fn fetcher(mut self, fetcher: Arc<dyn KeyInfoFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Per-request timeout for the HTTP client (default: 10s).
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Apply timeout, retry and cache settings loaded from a config file.
    pub fn settings(self, settings: &Settings) -> Self {
        self.http_timeout(settings.http_timeout())
            .retry(settings.retry_config())
            .cache(settings.cache_config())
    }

    pub fn build(self) -> Result<BudgetCache, ConfigError> {
        let fetcher: Arc<dyn KeyInfoFetcher> = match (self.fetcher, self.base_url) {
            (Some(fetcher), _) => fetcher,
            (None, Some(url)) => Arc::new(LiteLlmClient::with_timeout(url, self.http_timeout)?),
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "no base URL or fetcher configured".to_string(),
                ));
            }
        };

        Ok(BudgetCache::from_parts(fetcher, self.retry, self.cache, self.clock))
    }
}

impl Default for BudgetCacheBuilder {
    fn default() -> Self {
        Self::new()
    }
}
