//! Status values handed to whatever renders the budget line.
//!
//! [`BudgetStatus`] summarises a [`KeyInfo`] and [`ErrorClass`] collapses
//! every failure into the five cases a user needs to tell apart;
//! [`ErrorSummary`] pairs a class with the message for one failure. None
//! carries presentation beyond a plain-text `Display`.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::key_info::KeyInfo;
use super::reset::ResetCountdown;
use crate::error::{CredentialError, FetchError};

/// Spend percentage at which the status becomes [`Severity::Warning`].
pub const WARNING_PERCENT: f64 = 75.0;
/// Spend percentage at which the status becomes [`Severity::Critical`].
pub const CRITICAL_PERCENT: f64 = 90.0;

/// How close the key is to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Severity for a spend percentage; `None` (no limit) is always normal.
    pub fn for_percent(percent: Option<f64>) -> Self {
        match percent {
            Some(p) if p >= CRITICAL_PERCENT => Severity::Critical,
            Some(p) if p >= WARNING_PERCENT => Severity::Warning,
            _ => Severity::Normal,
        }
    }
}

/// Summary of a [`KeyInfo`] at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub spend: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    pub severity: Severity,
    /// Present only when the proxy reported a non-empty reset time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<ResetCountdown>,
}

impl BudgetStatus {
    pub fn from_key_info(info: &KeyInfo, now: DateTime<Utc>) -> Self {
        let percent = info.percent_used();
        let reset = info
            .budget_reset_at()
            .filter(|s| !s.is_empty())
            .map(|s| ResetCountdown::until(s, now));
        Self {
            spend: info.spend_or_zero(),
            limit: info.budget_limit(),
            percent,
            severity: Severity::for_percent(percent),
            reset,
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteLLM: ${:.2}", self.spend)?;
        if let (Some(limit), Some(percent)) = (self.limit, self.percent) {
            write!(f, "/${limit:.2} ({percent:.0}%)")?;
        }
        if let Some(reset) = self.reset {
            write!(f, " | reset: {reset}")?;
        }
        Ok(())
    }
}

/// User-visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    NoCredential,
    Cooldown,
    Auth,
    Connectivity,
    Other,
}

impl ErrorClass {
    /// Short message for the status line.
    pub fn message(self) -> &'static str {
        match self {
            ErrorClass::NoCredential => "No API key",
            ErrorClass::Cooldown => "Cooldown (retrying in 5m)",
            ErrorClass::Auth => "Auth error",
            ErrorClass::Connectivity => "Connection error",
            ErrorClass::Other => "Error",
        }
    }
}

impl From<&FetchError> for ErrorClass {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Cooldown { .. } => ErrorClass::Cooldown,
            FetchError::Auth { .. } => ErrorClass::Auth,
            FetchError::Transport { .. } => ErrorClass::Connectivity,
            FetchError::Http { .. } | FetchError::Decode(_) => ErrorClass::Other,
        }
    }
}

impl From<&CredentialError> for ErrorClass {
    fn from(err: &CredentialError) -> Self {
        match err {
            CredentialError::MissingToken | CredentialError::MissingBaseUrl => {
                ErrorClass::NoCredential
            }
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteLLM: {}", self.message())
    }
}

/// An [`ErrorClass`] with the message for one concrete failure.
///
/// Differs from [`ErrorClass::message`] where the error knows more: a
/// cooldown shows the time actually left, and a missing proxy URL is not
/// reported as a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummary {
    pub class: ErrorClass,
    pub message: String,
}

impl From<&FetchError> for ErrorSummary {
    fn from(err: &FetchError) -> Self {
        let class = ErrorClass::from(err);
        let message = match err {
            FetchError::Cooldown { remaining } => {
                format!("Cooldown (retrying in {})", format_wait(*remaining))
            }
            _ => class.message().to_string(),
        };
        Self { class, message }
    }
}

impl From<&CredentialError> for ErrorSummary {
    fn from(err: &CredentialError) -> Self {
        let class = ErrorClass::from(err);
        let message = match err {
            CredentialError::MissingToken => class.message(),
            CredentialError::MissingBaseUrl => "No proxy URL",
        };
        Self {
            class,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for ErrorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LiteLLM: {}", self.message)
    }
}

/// Seconds under a minute, otherwise the countdown format.
fn format_wait(remaining: Duration) -> String {
    if remaining.as_secs() < 60 {
        format!("{}s", remaining.as_secs().max(1))
    } else {
        ResetCountdown::Remaining(remaining).to_string()
    }
}
