use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default upstream collection served by `/external-data/`
pub const DEFAULT_FEED_URL: &str = "https://jsonplaceholder.typicode.com/posts";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Upstream JSON collection for the external-data view
    pub feed_url: String,
    /// Timeout for the upstream request
    pub feed_timeout: Duration,
    /// Lifetime of a login session
    pub session_ttl: chrono::Duration,
    pub port: u16,
    /// Rate limit the register/login routes per peer IP
    pub rate_limit_enabled: bool,
    /// Mark the session cookie `Secure` (HTTPS deployments)
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let feed_timeout_secs: u64 = parse_var("FEED_TIMEOUT_SECS", 10)?;
        // Two weeks, matching a typical session cookie age
        let session_ttl_hours: i64 = parse_var("SESSION_TTL_HOURS", 24 * 14)?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            feed_url: env::var("FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string()),
            feed_timeout: Duration::from_secs(feed_timeout_secs),
            session_ttl: chrono::Duration::hours(session_ttl_hours),
            port: parse_var("PORT", 8080)?,
            rate_limit_enabled: parse_flag("RATE_LIMIT_ENABLED", true)?,
            secure_cookies: parse_flag("SECURE_COOKIES", false)?,
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_flag(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("{} must be a boolean, got {:?}", name, other),
        },
        Err(_) => Ok(default),
    }
}
