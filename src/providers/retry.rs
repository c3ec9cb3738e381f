//! Retry configuration, delay calculation, and the shared retry loop.
//!
//! [`with_retry`] is the only place attempts are repeated. It is oblivious
//! to error kinds by default: every failure is retried, and when the budget
//! runs out the *last* error is returned while earlier ones are dropped.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::telemetry;
use crate::{FetchError, Result};

/// Configuration for the retry loop.
///
/// Pure exponential backoff without jitter or cap: the delay before retry
/// `n` (1-based) is `initial_backoff * 2^(n-1)`.
///
/// ```rust
/// # use litellm_budget::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new();
/// assert_eq!(config.total_attempts(), 4);
/// assert_eq!(config.delay_before_attempt(0), Duration::ZERO);
/// assert_eq!(config.delay_before_attempt(3), Duration::from_secs(4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial attempt. Default: 3.
    pub max_retries: u32,
    /// Delay before the first retry. Default: 1s.
    pub initial_backoff: Duration,
    /// Give up immediately on [`FetchError::Auth`]. Default: false.
    pub stop_on_auth: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            stop_on_auth: false,
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    pub fn initial_backoff(mut self, delay: Duration) -> Self {
        self.initial_backoff = delay;
        self
    }

    /// Opt into returning auth failures without retrying them.
    pub fn stop_on_auth(mut self, enabled: bool) -> Self {
        self.stop_on_auth = enabled;
        self
    }

    /// Initial attempt plus retries.
    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Sleep before the 0-indexed `attempt`. Zero for the first attempt.
    pub fn delay_before_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt - 1))
    }

    /// Upper bound on time spent sleeping when every attempt fails.
    pub fn total_backoff(&self) -> Duration {
        (1..self.total_attempts())
            .map(|attempt| self.delay_before_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

/// Run `f` until it succeeds or the attempt budget is spent.
///
/// Returns the first success immediately. On exhaustion the error from the
/// final attempt is returned unchanged.
pub async fn with_retry<F, Fut, T>(config: &RetryConfig, fetcher: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = config.total_attempts();
    let mut attempt = 0;
    loop {
        if attempt > 0 {
            metrics::counter!(telemetry::RETRIES_TOTAL, "fetcher" => fetcher.to_owned())
                .increment(1);
            tokio::time::sleep(config.delay_before_attempt(attempt)).await;
        }

        let started = tokio::time::Instant::now();
        let outcome = f().await;
        metrics::histogram!(telemetry::FETCH_DURATION_SECONDS, "fetcher" => fetcher.to_owned())
            .record(started.elapsed().as_secs_f64());

        let err = match outcome {
            Ok(value) => {
                metrics::counter!(telemetry::FETCH_ATTEMPTS_TOTAL,
                    "fetcher" => fetcher.to_owned(),
                    "outcome" => "ok",
                )
                .increment(1);
                return Ok(value);
            }
            Err(e) => e,
        };

        metrics::counter!(telemetry::FETCH_ATTEMPTS_TOTAL,
            "fetcher" => fetcher.to_owned(),
            "outcome" => err.kind().as_str(),
        )
        .increment(1);

        attempt += 1;
        if attempt >= attempts || (config.stop_on_auth && matches!(err, FetchError::Auth { .. })) {
            return Err(err);
        }

        warn!(
            fetcher,
            attempt,
            max_attempts = attempts,
            delay_ms = config.delay_before_attempt(attempt).as_millis() as u64,
            error = %err,
            "key info fetch failed, retrying"
        );
    }
}
