use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::constants::{DEFAULT_BIND_ADDR, OPENWEATHER_API_BASE};

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";
pub const API_BASE_VAR: &str = "OPENWEATHER_API_BASE";
pub const BIND_ADDR_VAR: &str = "WEATHER_PROXY_ADDR";

/// Runtime configuration, read once at startup and handed to the service.
#[derive(Clone)]
pub struct Config {
    /// Provider credential. Requests fail with `API key not set` when absent.
    pub api_key: Option<String>,
    /// Provider base URL without a trailing slash
    pub api_base: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Reads configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base = get(API_BASE_VAR)
            .unwrap_or_else(|| OPENWEATHER_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let bind_addr = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {BIND_ADDR_VAR}: {bind_addr}"))?;

        Ok(Self {
            api_key: get(API_KEY_VAR),
            api_base,
            bind_addr,
        })
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_base, OPENWEATHER_API_BASE);
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (API_KEY_VAR, "secret"),
            (API_BASE_VAR, "http://localhost:8080/"),
            (BIND_ADDR_VAR, "0.0.0.0:8000"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.bind_addr.port(), 8000);
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        let config = config_from(&[(API_KEY_VAR, "  ")]).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_bind_addr() {
        assert!(config_from(&[(BIND_ADDR_VAR, "not-an-address")]).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config_from(&[(API_KEY_VAR, "secret")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
