//! Configuration module for the monitor feed.
//!
//! Loads configuration from environment variables (and `.env`). Values are
//! read once at startup and never change for the life of the process.

use std::collections::BTreeSet;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::Semaphore;
use url::Url;

use crate::cache::FreshnessPolicy;
use crate::error::ConfigError;
use crate::source::{SourceKey, WeatherLocation};
use crate::utils::{parse_bool, parse_duration, parse_list};

pub const DEFAULT_CRYPTO_ENDPOINT: &str = "https://api.coingecko.com/api/v3/simple/price";
pub const DEFAULT_WEATHER_ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://source.unsplash.com/";
pub const DEFAULT_IMAGE_THEMES: [&str; 5] = ["cyberpunk", "technology", "abstract", "city", "neon"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP surface
    pub bind_addr: SocketAddr,

    /// Resolve every enabled source once before serving.
    pub warm_on_start: bool,

    // Providers
    /// Deadline for one provider call, including the wait for a request slot.
    pub request_timeout: Duration,

    /// Outbound provider calls allowed at once.
    pub max_concurrent_requests: usize,

    pub crypto_endpoint: Url,
    pub weather_endpoint: Url,
    pub image_endpoint: Url,
    pub image_themes: Vec<String>,
    pub weather_location: WeatherLocation,

    // Cache
    pub freshness: FreshnessPolicy,

    /// Sources that may be queried. Everything else is a configuration error.
    pub enabled: BTreeSet<SourceKey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            warm_on_start: true,
            request_timeout: Duration::from_millis(5000),
            max_concurrent_requests: 3,
            crypto_endpoint: default_url(DEFAULT_CRYPTO_ENDPOINT),
            weather_endpoint: default_url(DEFAULT_WEATHER_ENDPOINT),
            image_endpoint: default_url(DEFAULT_IMAGE_ENDPOINT),
            image_themes: DEFAULT_IMAGE_THEMES.iter().map(|s| s.to_string()).collect(),
            weather_location: WeatherLocation::default(),
            freshness: FreshnessPolicy::default(),
            enabled: SourceKey::ALL.into_iter().collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name -> value lookup.
    ///
    /// Unset variables keep their defaults; set but invalid ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(value) = var("BIND_ADDR") {
            config.bind_addr = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("BIND_ADDR", &value))?;
        }

        if let Some(value) = var("WARM_ON_START") {
            config.warm_on_start =
                parse_bool(&value).ok_or_else(|| ConfigError::invalid("WARM_ON_START", &value))?;
        }

        if let Some(value) = var("REQUEST_TIMEOUT_MS") {
            config.request_timeout = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or_else(|| ConfigError::invalid("REQUEST_TIMEOUT_MS", &value))?;
        }

        if let Some(value) = var("MAX_CONCURRENT_REQUESTS") {
            config.max_concurrent_requests = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| (1..=Semaphore::MAX_PERMITS).contains(n))
                .ok_or_else(|| ConfigError::invalid("MAX_CONCURRENT_REQUESTS", &value))?;
        }

        if let Some(value) = var("CRYPTO_ENDPOINT") {
            config.crypto_endpoint = parse_url("CRYPTO_ENDPOINT", &value)?;
        }
        if let Some(value) = var("WEATHER_ENDPOINT") {
            config.weather_endpoint = parse_url("WEATHER_ENDPOINT", &value)?;
        }
        if let Some(value) = var("IMAGE_ENDPOINT") {
            config.image_endpoint = parse_url("IMAGE_ENDPOINT", &value)?;
        }
        // Image URLs are built relative to the endpoint, so it must be a directory
        if !config.image_endpoint.path().ends_with('/') {
            let path = format!("{}/", config.image_endpoint.path());
            config.image_endpoint.set_path(&path);
        }

        if let Some(value) = lookup("IMAGE_THEMES") {
            config.image_themes = parse_list(&value);
            if config.image_themes.is_empty() {
                return Err(ConfigError::invalid("IMAGE_THEMES", value));
            }
        }

        if let Some(value) = var("WEATHER_LAT") {
            config.weather_location.lat = parse_coordinate("WEATHER_LAT", &value, 90.0)?;
        }
        if let Some(value) = var("WEATHER_LON") {
            config.weather_location.lon = parse_coordinate("WEATHER_LON", &value, 180.0)?;
        }

        let mut freshness = FreshnessPolicy::default();

        for key in SourceKey::ALL {
            let ttl_var = format!("{}_TTL", key.env_prefix());
            if let Some(value) = var(&ttl_var) {
                freshness = freshness.with_window(key, parse_window(&ttl_var, &value)?);
            }

            let enabled_var = format!("{}_ENABLED", key.env_prefix());
            if let Some(value) = var(&enabled_var) {
                let enabled =
                    parse_bool(&value).ok_or_else(|| ConfigError::invalid(&enabled_var, &value))?;
                if enabled {
                    config.enabled.insert(key);
                } else {
                    config.enabled.remove(&key);
                }
            }
        }
        config.freshness = freshness;

        Ok(config)
    }
}

fn default_url(url: &str) -> Url {
    Url::parse(url).expect("built-in endpoint is a valid URL")
}

fn parse_url(var: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .ok_or_else(|| ConfigError::invalid(var, value))
}

fn parse_window(var: &str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value)
        .filter(|d| !d.is_zero())
        .ok_or_else(|| ConfigError::invalid(var, value))
}

fn parse_coordinate(var: &str, value: &str, limit: f64) -> Result<f64, ConfigError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() <= limit)
        .ok_or_else(|| ConfigError::invalid(var, value))
}
