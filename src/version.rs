//! Version information.

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every proxy request.
pub fn user_agent() -> String {
    format!("litellm-budget/{PKG_VERSION}")
}
