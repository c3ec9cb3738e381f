//! Error types for budget lookups, configuration and credential resolution.

use std::time::Duration;

/// Classified failure of a budget lookup.
///
/// This is the closed set of outcomes a caller of
/// [`BudgetCache::get`](crate::BudgetCache::get) can observe. The retry
/// driver retries every variant uniformly and surfaces only the last one.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// A recent lookup exhausted its retries; no request was made.
    #[error("cooldown active, retrying in {remaining:?}")]
    Cooldown { remaining: Duration },

    /// The proxy rejected the credential (401 or 403).
    #[error("auth error: {status}")]
    Auth { status: u16 },

    /// Any other non-200 response.
    #[error("HTTP error: {status}")]
    Http { status: u16 },

    /// Connection failure, DNS failure, timeout, or a truncated body.
    #[error("transport error: {message}")]
    Transport { message: String, timed_out: bool },

    /// The body did not match the `key/info` schema.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Discriminant of [`FetchError`], without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Cooldown,
    Auth,
    Http,
    Transport,
    Decode,
}

impl FetchErrorKind {
    /// Stable lowercase label, used for metrics and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            FetchErrorKind::Cooldown => "cooldown",
            FetchErrorKind::Auth => "auth",
            FetchErrorKind::Http => "http",
            FetchErrorKind::Transport => "transport",
            FetchErrorKind::Decode => "decode",
        }
    }
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Cooldown { .. } => FetchErrorKind::Cooldown,
            FetchError::Auth { .. } => FetchErrorKind::Auth,
            FetchError::Http { .. } => FetchErrorKind::Http,
            FetchError::Transport { .. } => FetchErrorKind::Transport,
            FetchError::Decode(_) => FetchErrorKind::Decode,
        }
    }

    /// Whether the failure means the proxy could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Auth { status } | FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return FetchError::Decode(err.to_string());
        }
        FetchError::Transport {
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Configuration and builder errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Missing credentials; the lookup is never attempted in these cases.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("no API key configured (set ANTHROPIC_AUTH_TOKEN or LITELLM_PROXY_API_KEY)")]
    MissingToken,

    #[error("no proxy URL configured (set ANTHROPIC_BASE_URL or LITELLM_PROXY_URL)")]
    MissingBaseUrl,
}

/// Result type alias for budget lookups.
pub type Result<T> = std::result::Result<T, FetchError>;
