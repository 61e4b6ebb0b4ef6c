use std::{env, fmt::Display, num::NonZeroU64, str::FromStr, time::Duration};

use reqwest::Url;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_URL: &str = "http://127.0.0.1:10000";
pub const DEFAULT_PATH: &str = "/predict";
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub path: String,
    pub timeout: Duration,
    pub show_progress: bool,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(var)
    }

    /// Same as [`Config::load`], reading variables through `lookup`.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout_ms: NonZeroU64 = try_load_with(
            "PREDICT_TIMEOUT_MS",
            &DEFAULT_TIMEOUT_MS.to_string(),
            &lookup,
        )?;

        Ok(Self {
            base_url: parse_url(&try_load_with::<String>(
                "PREDICT_URL",
                DEFAULT_URL,
                &lookup,
            )?)?,
            path: try_load_with("PREDICT_PATH", DEFAULT_PATH, &lookup)?,
            timeout: Duration::from_millis(timeout_ms.get()),
            show_progress: try_load_with("PREDICT_PROGRESS", "true", &lookup)?,
        })
    }

    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url(base_url)?,
            path: DEFAULT_PATH.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            show_progress: true,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_url(base_url)?;
        Ok(self)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Full endpoint URL. The path replaces any path already on the base URL.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        self.base_url
            .join(&self.path)
            .map_err(|e| ConfigError::InvalidUrl {
                url: format!("{}{}", self.base_url, self.path),
                reason: e.to_string(),
            })
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

fn var(key: &str) -> Option<String> {
    env::var(key)
        .map_err(|_| {
            warn!("Environment variable {key} not found, using default");
        })
        .ok()
}

fn try_load_with<T: FromStr>(
    key: &'static str,
    default: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(ConfigError::InvalidVar {
                key,
                value,
                reason: e.to_string(),
            })
        }
    }
}
