//! Fetching the budget record: the fetcher trait, the LiteLLM HTTP client,
//! and the retry loop that wraps it.

pub mod litellm;
pub mod retry;
pub mod traits;

pub use litellm::{DEFAULT_HTTP_TIMEOUT, LiteLlmClient};
pub use retry::{RetryConfig, with_retry};
pub use traits::KeyInfoFetcher;
