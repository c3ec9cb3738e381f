//! litellm-budget - cached, rate-protected LiteLLM key budget lookups
//!
//! Fetches the spend/limit record for an API key from a LiteLLM proxy's
//! `GET /key/info`, serves it from a short-lived cache, retries failures
//! with exponential backoff, and stops calling the proxy for a cooldown
//! period once a lookup has exhausted its retries.
//!
//! # Example
//!
//! ```rust,no_run
//! use litellm_budget::{BudgetCache, BudgetStatus, ErrorSummary};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cache = BudgetCache::builder()
//!         .base_url("http://localhost:4000")
//!         .build()?;
//!
//!     match cache.get("sk-1234").await {
//!         Ok(info) => println!("{}", BudgetStatus::from_key_info(&info, chrono::Utc::now())),
//!         Err(e) => println!("{}", ErrorSummary::from(&e)),
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod providers;
pub mod telemetry;
pub mod types;
pub mod version;

pub use cache::{BudgetCache, BudgetCacheBuilder, CacheConfig, CacheSnapshot, CacheStatus};
pub use config::{Credentials, Settings};
pub use error::{ConfigError, CredentialError, FetchError, FetchErrorKind, Result};
pub use providers::{KeyInfoFetcher, LiteLlmClient, RetryConfig};
pub use version::PKG_VERSION;

pub use types::{
    BudgetStatus, ErrorClass, ErrorSummary, KeyInfo, ResetCountdown, Severity, parse_reset_time,
};
