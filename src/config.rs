//! Client configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeouts: Timeouts::default() }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `LEGAL_LENS_BASE_URL`: default `http://localhost:8000`
    /// - `LEGAL_LENS_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LEGAL_LENS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an `http(s)://` URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("LEGAL_LENS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("LEGAL_LENS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LEGAL_LENS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(&base_url, timeouts)
    }

    /// Build config from explicit values.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an `http(s)://` URL or a
    /// timeout is zero.
    pub fn new(base_url: &str, timeouts: Timeouts) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)?;
        if timeouts.request_secs == 0 || timeouts.connect_secs == 0 {
            return Err(ConfigError::ConfigParse("timeouts must be at least one second".into()));
        }
        Ok(Self { base_url, timeouts })
    }

    /// Apply command-line overrides on top of this config. `None` keeps the
    /// current value.
    ///
    /// # Errors
    ///
    /// Same validation as [`ClientConfig::new`].
    pub fn with_overrides(
        self,
        base_url: Option<&str>,
        request_secs: Option<u64>,
        connect_secs: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let timeouts = Timeouts {
            request_secs: request_secs.unwrap_or(self.timeouts.request_secs),
            connect_secs: connect_secs.unwrap_or(self.timeouts.connect_secs),
        };
        Self::new(base_url.unwrap_or(&self.base_url), timeouts)
    }

    /// Absolute URL for a backend path such as `/summarize`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
