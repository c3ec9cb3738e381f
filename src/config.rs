//! Configuration loading and credential resolution.
//!
//! Tuning knobs come from an optional TOML file:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `{config_dir}/litellm-budget/config.toml` (used when present)
//! 3. built-in defaults
//!
//! ```toml
//! [proxy]
//! base_url = "http://localhost:4000"
//!
//! [http]
//! timeout_secs = 10
//!
//! [retry]
//! max_retries = 3
//! initial_backoff_ms = 1000
//! stop_on_auth = false
//!
//! [cache]
//! ttl_secs = 30
//! cooldown_secs = 300
//! ```
//!
//! Credentials come from the environment (see [`Credentials`]). The token
//! is never read from the config file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::CacheConfig;
use crate::error::{ConfigError, CredentialError};
use crate::providers::RetryConfig;

/// Environment variables consulted for the proxy URL, in order.
pub const BASE_URL_ENV_VARS: &[&str] = &["ANTHROPIC_BASE_URL", "LITELLM_PROXY_URL"];

/// Environment variables consulted for the bearer token, in order.
pub const TOKEN_ENV_VARS: &[&str] = &["ANTHROPIC_AUTH_TOKEN", "LITELLM_PROXY_API_KEY"];

/// Upper bound for the second-valued settings (one year).
pub const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// File-backed settings. Every field has a default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub proxy: ProxySettings,
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Proxy location, used when no environment variable names one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxySettings {
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// Retries after the first attempt (default: 3).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds, doubling after (default: 1000).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Return auth failures without retrying (default: false).
    #[serde(default)]
    pub stop_on_auth: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            stop_on_auth: false,
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    /// Seconds a record is served from cache (default: 30).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Seconds of quiet after retries are exhausted (default: 300).
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    30
}

fn default_cooldown_secs() -> u64 {
    5 * 60
}

impl Settings {
    /// Load settings from the standard locations.
    ///
    /// An explicit path must exist. Without one, the per-user file is read
    /// if present and defaults are used otherwise.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit_path {
            Some(path) => Self::load_from_file(path),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::load_from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(content).map_err(|e| e.to_string())?;
        if settings.http.timeout_secs == 0 {
            return Err("http.timeout_secs must be greater than zero".to_string());
        }
        for (name, secs) in [
            ("http.timeout_secs", settings.http.timeout_secs),
            ("cache.ttl_secs", settings.cache.ttl_secs),
            ("cache.cooldown_secs", settings.cache.cooldown_secs),
        ] {
            if secs > MAX_WINDOW_SECS {
                return Err(format!("{name} must be at most {MAX_WINDOW_SECS}"));
            }
        }
        Ok(settings)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_retries(self.retry.max_retries)
            .initial_backoff(Duration::from_millis(self.retry.initial_backoff_ms))
            .stop_on_auth(self.retry.stop_on_auth)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::new()
            .ttl(Duration::from_secs(self.cache.ttl_secs))
            .cooldown(Duration::from_secs(self.cache.cooldown_secs))
    }
}

/// Default config path: `{config_dir}/litellm-budget/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("litellm-budget").join("config.toml"))
}

/// Proxy URL and bearer token for one lookup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub base_url: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the environment.
    ///
    /// Empty values count as unset. The token is checked first, so a
    /// missing token is reported even when the URL is missing too.
    pub fn resolve_with(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let token = first_non_empty(&lookup, TOKEN_ENV_VARS)
            .ok_or(CredentialError::MissingToken)?;
        let base_url = first_non_empty(&lookup, BASE_URL_ENV_VARS)
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(CredentialError::MissingBaseUrl)?;
        Ok(Self { base_url, token })
    }

    /// Fill gaps left by the environment: explicit overrides win, then the
    /// environment, then the config file's `proxy.base_url`.
    pub fn resolve(
        token_override: Option<String>,
        base_url_override: Option<String>,
        settings: &Settings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, CredentialError> {
        let token_override = token_override.filter(|t| !t.is_empty());
        let base_url = base_url_override
            .filter(|u| !u.is_empty())
            .or_else(|| first_non_empty(&lookup, BASE_URL_ENV_VARS))
            .or_else(|| settings.proxy.base_url.clone());
        Self::resolve_with(|key| {
            if TOKEN_ENV_VARS.contains(&key) {
                token_override.clone().or_else(|| lookup(key))
            } else if BASE_URL_ENV_VARS.contains(&key) {
                base_url.clone()
            } else {
                lookup(key)
            }
        })
    }
}

fn first_non_empty(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| lookup(*key))
        .find(|value| !value.is_empty())
}
