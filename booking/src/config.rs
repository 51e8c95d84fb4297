use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

pub const ENV_API_URL: &str = "BOOKING_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "BOOKING_REQUEST_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "BOOKING_CONNECT_TIMEOUT_SECS";

/// Where the booking services live and how long to wait for them.
///
/// Resolved from defaults, then an optional TOML file, then `BOOKING_*`
/// environment variables. Frontends apply their own flags last.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl BookingConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Overrides fields from environment lookups. Takes the lookup as a
    /// closure so tests don't touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            self.request_timeout_secs = parse_secs(ENV_REQUEST_TIMEOUT, raw)?;
        }
        if let Some(raw) = lookup(ENV_CONNECT_TIMEOUT) {
            self.connect_timeout_secs = parse_secs(ENV_CONNECT_TIMEOUT, raw)?;
        }
        Ok(())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_secs(key: &'static str, raw: String) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = BookingConfig::default();
        assert_eq!(config.base_url(), "http://localhost:3000/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BookingConfig::from_toml_str("api_url = \"https://rentals.example/api/\"\n").unwrap();
        assert_eq!(config.base_url(), "https://rentals.example/api");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = BookingConfig::from_toml_str("request_timeout_secs = 5").unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_URL, "http://10.0.0.7:3000/api"),
            (ENV_CONNECT_TIMEOUT, "3"),
        ]);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_url, "http://10.0.0.7:3000/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.connect_timeout_secs, 3);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let mut config = BookingConfig::default();
        let err = config
            .apply_env(|key| (key == ENV_REQUEST_TIMEOUT).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_REQUEST_TIMEOUT, .. }));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            BookingConfig::from_toml_str("api_url = "),
            Err(ConfigError::Parse(_))
        ));
    }
}
