//! The fetcher seam between the cache and the network.
//!
//! [`BudgetCache`](crate::BudgetCache) talks to a `dyn KeyInfoFetcher`, so
//! tests can substitute scripted fetchers for the HTTP client.
//!
//! # Contract
//!
//! One call is one attempt: implementations never retry and never cache.
//! Failures are returned already classified as a [`FetchError`](crate::FetchError).
//!
//! # Example
//!
//! ```ignore
//! struct Fixed(KeyInfo);
//!
//! #[async_trait]
//! impl KeyInfoFetcher for Fixed {
//!     fn name(&self) -> &str { "fixed" }
//!     async fn fetch(&self, _token: &str) -> Result<KeyInfo> { Ok(self.0.clone()) }
//! }
//! ```

use async_trait::async_trait;

use crate::Result;
use crate::types::KeyInfo;

/// Performs a single `key/info` lookup for a bearer token.
#[async_trait]
pub trait KeyInfoFetcher: Send + Sync {
    /// Fetcher name for logging and metric labels.
    fn name(&self) -> &str;

    /// Perform exactly one attempt.
    async fn fetch(&self, token: &str) -> Result<KeyInfo>;
}
