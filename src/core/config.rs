//! Configuration management

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::errors::{LibreTranslateError, Result};
use crate::core::models::Endpoint;

/// Environment variable holding the base URL
pub const URL_ENV: &str = "LIBRETRANSLATE_URL";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "LIBRETRANSLATE_API_KEY";

/// Environment variable holding the timeout in seconds
pub const TIMEOUT_ENV: &str = "LIBRETRANSLATE_TIMEOUT";

/// Prefix shared by all environment variables read by [`LibreTranslateConfig::load`]
const ENV_PREFIX: &str = "LIBRETRANSLATE";

/// Connection settings for a LibreTranslate server.
///
/// Always holds a validated absolute base URL ending in exactly one `/`.
/// Immutable once built.
#[derive(Clone, PartialEq)]
pub struct LibreTranslateConfig {
    url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

/// Values that take precedence over files and the environment, e.g. CLI flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Base URL
    pub url: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// Seconds
    pub timeout: Option<f64>,
}

/// Settings as they come out of files and the environment
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    url: Option<String>,
    api_key: Option<String>,
    /// Seconds
    timeout: Option<f64>,
}

impl LibreTranslateConfig {
    /// Build and validate a configuration.
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let url = normalize_url(url.into());
        validate_url(&url)?;

        if let Some(key) = &api_key {
            if key.is_empty() {
                return Err(LibreTranslateError::config("The API key must not be empty"));
            }
        }

        if let Some(timeout) = timeout {
            if timeout.is_zero() {
                return Err(LibreTranslateError::config(
                    "The timeout must be greater than 0",
                ));
            }
        }

        Ok(Self {
            url,
            api_key,
            timeout,
        })
    }

    /// Load configuration from `LIBRETRANSLATE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let raw = RawConfig {
            url: std::env::var(URL_ENV).ok(),
            api_key: std::env::var(API_KEY_ENV).ok(),
            timeout: std::env::var(TIMEOUT_ENV)
                .ok()
                .map(|t| {
                    t.parse::<f64>().map_err(|e| {
                        LibreTranslateError::config(format!("{} is not a number: {}", TIMEOUT_ENV, e))
                    })
                })
                .transpose()?,
        };

        Self::from_raw(raw)
    }

    /// Load configuration from an optional file (JSON, TOML or YAML),
    /// overridden by `LIBRETRANSLATE_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_overrides(path, Overrides::default())
    }

    /// Same as [`LibreTranslateConfig::load`], with `overrides` applied last
    pub fn load_with_overrides(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Reading configuration file {}", path.display());
            builder = builder.add_source(config::File::from(path));
        }

        let raw: RawConfig = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .set_override_option("url", overrides.url)?
            .set_override_option("api_key", overrides.api_key)?
            .set_override_option("timeout", overrides.timeout)?
            .build()?
            .try_deserialize()?;

        let config = Self::from_raw(raw)?;
        info!("Loaded LibreTranslate configuration for {}", config.url);
        Ok(config)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let url = raw.url.ok_or_else(|| {
            LibreTranslateError::config("The URL to LibreTranslate needs to be provided")
        })?;

        let timeout = raw.timeout.map(seconds_to_duration).transpose()?;
        // `LIBRETRANSLATE_API_KEY=` in a .env file means no key
        let api_key = raw.api_key.filter(|k| !k.is_empty());

        Self::new(url, api_key, timeout)
    }

    /// Base URL, always ending in `/`
    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// API key attached to every request, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Per-request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Full URL of a remote endpoint
    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.url, endpoint.path())
    }
}

impl fmt::Debug for LibreTranslateConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibreTranslateConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Append a trailing slash unless there already is one
pub fn normalize_url(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn validate_url(url: &str) -> Result<()> {
    if url == "/" {
        return Err(LibreTranslateError::config(
            "The URL to LibreTranslate needs to be provided",
        ));
    }

    let parsed = reqwest::Url::parse(url).map_err(|e| {
        LibreTranslateError::config(format!("'{}' is not an absolute URL: {}", url, e))
    })?;

    if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
        return Err(LibreTranslateError::config(format!(
            "'{}' is not an http(s) URL",
            url
        )));
    }

    // Endpoint paths are appended to the URL text
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(LibreTranslateError::config(format!(
            "'{}' must not contain a query string or fragment",
            url
        )));
    }

    Ok(())
}

fn seconds_to_duration(seconds: f64) -> Result<Duration> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(LibreTranslateError::config(format!(
            "The timeout must be a positive number of seconds, got {}",
            seconds
        )));
    }
    Ok(Duration::from_secs_f64(seconds))
}
