//! The fetch / cache / cooldown state machine.
//!
//! # Decision procedure
//!
//! Every [`BudgetCache::get`] captures `now` once and then, under a single
//! lock held until it returns:
//!
//! 1. fails with [`FetchError::Cooldown`] while a cooldown deadline is in
//!    the future, without touching the network or the state;
//! 2. serves the cached record while it is younger than the TTL;
//! 3. otherwise runs [`with_retry`] against the fetcher. Success replaces
//!    the record and clears any cooldown. Exhaustion sets the cooldown
//!    deadline to `now + cooldown` (capped far in the future), keeps the
//!    previous record (stale and unserved), and returns the last fetch
//!    error as-is.
//!
//! Because the lock spans the network attempts, a `BudgetCache` never has
//! more than one request in flight. Callers queued behind a refresh observe
//! its outcome: they get the fresh record or the cooldown rejection.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::builder::BudgetCacheBuilder;
use crate::clock::Clock;
use crate::providers::{KeyInfoFetcher, RetryConfig, with_retry};
use crate::telemetry;
use crate::types::KeyInfo;
use crate::{FetchError, Result};

/// TTL and cooldown settings.
///
/// ```rust
/// # use litellm_budget::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .ttl(Duration::from_secs(10))
///     .cooldown(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age at which a record is still served. Default: 30s.
    pub ttl: Duration,
    /// Quiet period after a lookup exhausts its retries. Default: 5 minutes.
    pub cooldown: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(30),
            cooldown: Duration::from_secs(5 * 60),
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Freshness of the cached record at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Fresh,
    /// A record is held but is past its TTL and will not be served.
    Stale,
}

/// Point-in-time view of the cache, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub status: CacheStatus,
    /// Time left in the active cooldown, `None` when none is active.
    pub cooldown_remaining: Option<Duration>,
    /// The held record, fresh or stale.
    pub last_record: Option<KeyInfo>,
}

/// Deadline used when `now + cooldown` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn cooldown_deadline(now: Instant, cooldown: Duration) -> Instant {
    now.checked_add(cooldown)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}

struct CacheEntry {
    record: KeyInfo,
    fetched_at: Instant,
}

#[derive(Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    cooldown_until: Option<Instant>,
}

impl CacheState {
    fn cooldown_remaining(&self, now: Instant) -> Option<Duration> {
        self.cooldown_until
            .filter(|deadline| now < *deadline)
            .map(|deadline| deadline - now)
    }

    fn fresh_record(&self, now: Instant, ttl: Duration) -> Option<&KeyInfo> {
        self.entry
            .as_ref()
            .filter(|entry| now.saturating_duration_since(entry.fetched_at) < ttl)
            .map(|entry| &entry.record)
    }
}

/// Cached, rate-protected access to one proxy's key budget.
///
/// Owns the cached record and the cooldown deadline; nothing else mutates
/// them. Share it behind an `Arc` when several tasks need it.
pub struct BudgetCache {
    fetcher: Arc<dyn KeyInfoFetcher>,
    retry: RetryConfig,
    config: CacheConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl BudgetCache {
    /// Create a new builder.
    pub fn builder() -> BudgetCacheBuilder {
        BudgetCacheBuilder::new()
    }

    pub(crate) fn from_parts(
        fetcher: Arc<dyn KeyInfoFetcher>,
        retry: RetryConfig,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            retry,
            config,
            clock,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Look up the budget record for `token`.
    ///
    /// `token` must be non-empty; credential checks happen before this call.
    pub async fn get(&self, token: &str) -> Result<KeyInfo> {
        let mut state = self.state.lock().await;
        let now = self.clock.now();

        if let Some(remaining) = state.cooldown_remaining(now) {
            metrics::counter!(telemetry::COOLDOWN_REJECTIONS_TOTAL).increment(1);
            debug!(
                remaining_ms = remaining.as_millis() as u64,
                "cooldown active, skipping key info fetch"
            );
            return Err(FetchError::Cooldown { remaining });
        }

        if let Some(record) = state.fresh_record(now, self.config.ttl) {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            debug!("serving cached key info");
            return Ok(record.clone());
        }

        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        debug!(stale = state.entry.is_some(), "key info cache miss");

        let fetcher = self.fetcher.as_ref();
        match with_retry(&self.retry, fetcher.name(), || fetcher.fetch(token)).await {
            Ok(record) => {
                info!(fetcher = fetcher.name(), "refreshed key info");
                state.entry = Some(CacheEntry {
                    record: record.clone(),
                    fetched_at: now,
                });
                state.cooldown_until = None;
                Ok(record)
            }
            Err(err) => {
                metrics::counter!(telemetry::COOLDOWNS_ENTERED_TOTAL).increment(1);
                warn!(
                    fetcher = fetcher.name(),
                    cooldown_secs = self.config.cooldown.as_secs(),
                    error = %err,
                    "key info fetch exhausted retries, entering cooldown"
                );
                state.cooldown_until = Some(cooldown_deadline(now, self.config.cooldown));
                Err(err)
            }
        }
    }

    /// Drop the cached record and any cooldown. Idempotent.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        *state = CacheState::default();
    }

    /// Inspect the state without fetching.
    pub async fn snapshot(&self) -> CacheSnapshot {
        let state = self.state.lock().await;
        let now = self.clock.now();
        let status = match &state.entry {
            None => CacheStatus::Empty,
            Some(_) if state.fresh_record(now, self.config.ttl).is_some() => CacheStatus::Fresh,
            Some(_) => CacheStatus::Stale,
        };
        CacheSnapshot {
            status,
            cooldown_remaining: state.cooldown_remaining(now),
            last_record: state.entry.as_ref().map(|entry| entry.record.clone()),
        }
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cache_config(&self) -> &CacheConfig {
        &self.config
    }
}
