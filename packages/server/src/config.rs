use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use listing_extraction::DEFAULT_STOREFRONT;

/// Default rewrite model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// `postgres://...`, `sqlite:...` or `memory`
    pub database_url: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub storefront_base_url: String,
    /// Outer deadline for a whole API request
    pub request_timeout: Duration,
    /// Deadline for a single provider call
    pub gemini_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            gemini_api_key: env::var("GEMINI_API_KEY").context("GEMINI_API_KEY must be set")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            storefront_base_url: env::var("STOREFRONT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_STOREFRONT.to_string()),
            request_timeout: seconds_var("REQUEST_TIMEOUT_SECS", 120)?,
            gemini_timeout: seconds_var("GEMINI_TIMEOUT_SECS", 60)?,
        })
    }
}

fn seconds_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Duration::from_secs)
            .with_context(|| format!("{} must be a whole number of seconds", name)),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}
