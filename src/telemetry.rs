//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `litellm_budget_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `fetcher`: fetcher name (e.g. "litellm")
//! - `outcome`: "ok" or the error kind ("auth", "http", "transport", "decode")

/// Total network attempts, including retries.
///
/// Labels: `fetcher`, `outcome`.
pub const FETCH_ATTEMPTS_TOTAL: &str = "litellm_budget_fetch_attempts_total";

/// Duration of a single network attempt in seconds.
///
/// Labels: `fetcher`.
pub const FETCH_DURATION_SECONDS: &str = "litellm_budget_fetch_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `fetcher`.
pub const RETRIES_TOTAL: &str = "litellm_budget_retries_total";

/// Lookups served from the cached record.
pub const CACHE_HITS_TOTAL: &str = "litellm_budget_cache_hits_total";

/// Lookups that needed a network refresh (cache empty or expired).
pub const CACHE_MISSES_TOTAL: &str = "litellm_budget_cache_misses_total";

/// Lookups rejected because a cooldown was active.
pub const COOLDOWN_REJECTIONS_TOTAL: &str = "litellm_budget_cooldown_rejections_total";

/// Times a cooldown window was entered after exhausted retries.
pub const COOLDOWNS_ENTERED_TOTAL: &str = "litellm_budget_cooldowns_entered_total";
