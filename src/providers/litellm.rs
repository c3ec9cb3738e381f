//! LiteLLM proxy client for the `GET /key/info` endpoint.
//!
//! See: <https://docs.litellm.ai/docs/proxy/virtual_keys>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::traits::KeyInfoFetcher;
use crate::error::ConfigError;
use crate::types::{KeyInfo, KeyInfoResponse};
use crate::{FetchError, Result};

/// Default per-request timeout.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a LiteLLM proxy.
///
/// Each [`key_info`](Self::key_info) call is exactly one HTTP request; retry
/// and caching live in [`with_retry`](super::retry::with_retry) and
/// [`BudgetCache`](crate::BudgetCache).
#[derive(Clone, Debug)]
pub struct LiteLlmClient {
    http: Client,
    base_url: String,
}

impl LiteLlmClient {
    /// Create a client with the default 10 second timeout.
    pub fn new(base_url: impl Into<String>) -> std::result::Result<Self, ConfigError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> std::result::Result<Self, ConfigError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("proxy base URL is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(crate::version::user_agent())
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the budget record for `token`.
    pub async fn key_info(&self, token: &str) -> Result<KeyInfo> {
        let url = format!("{}/key/info", self.base_url);
        debug!(url = %url, "requesting key info");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        check_status(response.status())?;

        let body = response.text().await?;
        let parsed: KeyInfoResponse = serde_json::from_str(&body)?;
        Ok(parsed.info)
    }
}

/// Map a response status to the error taxonomy. Only 200 is a success.
fn check_status(status: StatusCode) -> Result<()> {
    match status.as_u16() {
        200 => Ok(()),
        401 | 403 => Err(FetchError::Auth {
            status: status.as_u16(),
        }),
        code => Err(FetchError::Http { status: code }),
    }
}

#[async_trait]
impl KeyInfoFetcher for LiteLlmClient {
    fn name(&self) -> &str {
        "litellm"
    }

    async fn fetch(&self, token: &str) -> Result<KeyInfo> {
        LiteLlmClient::key_info(self, token).await
    }
}
