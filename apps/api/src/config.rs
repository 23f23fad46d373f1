use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
///
/// The search tunables are deliberately configuration rather than constants:
/// the over-fetch factor is a heuristic, not a guarantee, and operators may
/// want to trade fetch size against page under-fill.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    /// TTL for cached search pages, in seconds.
    pub search_cache_ttl_secs: u64,
    /// Over-fetch multiplier applied when salary/experience post-filtering is active.
    pub search_overfetch_factor: u32,
    /// Page size used when the request does not specify a limit.
    pub default_page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            search_cache_ttl_secs: optional_env("SEARCH_CACHE_TTL_SECS", 300)?,
            search_overfetch_factor: optional_env("SEARCH_OVERFETCH_FACTOR", 3)?,
            default_page_size: optional_env("DEFAULT_PAGE_SIZE", 12)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("'{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}
