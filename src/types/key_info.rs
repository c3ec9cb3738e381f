//! The budget record returned by the proxy's `GET /key/info`.

use serde::{Deserialize, Serialize};

/// Budget snapshot for one API key.
///
/// Replaced wholesale on every successful refresh, never edited in place.
/// `max_budget` keeps `Some(0.0)` and `None` distinct; use
/// [`budget_limit()`](Self::budget_limit) for "no limit" semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    spend: Option<f64>,
    #[serde(default)]
    max_budget: Option<f64>,
    #[serde(default)]
    budget_reset_at: Option<String>,
}

impl KeyInfo {
    pub fn new(
        spend: Option<f64>,
        max_budget: Option<f64>,
        budget_reset_at: Option<String>,
    ) -> Self {
        Self {
            spend,
            max_budget,
            budget_reset_at,
        }
    }

    /// Reported spend, `None` when the proxy sent `null` or omitted it.
    pub fn spend(&self) -> Option<f64> {
        self.spend
    }

    /// Spend with an absent value read as zero.
    pub fn spend_or_zero(&self) -> f64 {
        self.spend.unwrap_or(0.0)
    }

    /// Raw `max_budget` exactly as reported.
    pub fn max_budget(&self) -> Option<f64> {
        self.max_budget
    }

    /// The effective limit: `None` when absent, zero or negative.
    pub fn budget_limit(&self) -> Option<f64> {
        self.max_budget.filter(|b| *b > 0.0)
    }

    /// Reset timestamp passed through verbatim (may be empty).
    pub fn budget_reset_at(&self) -> Option<&str> {
        self.budget_reset_at.as_deref()
    }

    /// Percentage of the limit spent, if a limit is set.
    pub fn percent_used(&self) -> Option<f64> {
        self.budget_limit()
            .map(|limit| self.spend_or_zero() / limit * 100.0)
    }
}

/// Wire envelope: `{ "info": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct KeyInfoResponse {
    pub info: KeyInfo,
}
