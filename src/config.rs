//! Client configuration resolved from the environment.
//!
//! API base URL: EDULEARN_API_URL > VITE_API_BASE_URL > hosted default.
//! Credential backend: EDULEARN_CREDENTIAL_STORE (keychain, file, memory).
//! A `.env` file is honoured when the binary loads it with `dotenvy`.

use std::str::FromStr;
use std::time::Duration;

/// Hosted backend used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://backend-for-edulearn.onrender.com/api/v1";

pub const API_URL_ENV: &str = "EDULEARN_API_URL";
pub const LEGACY_API_URL_ENV: &str = "VITE_API_BASE_URL";
pub const CONNECT_TIMEOUT_ENV: &str = "EDULEARN_CONNECT_TIMEOUT_SECS";
pub const STORE_ENV: &str = "EDULEARN_CREDENTIAL_STORE";

/// Where credentials are persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// OS keychain entry per key.
    Keychain,
    /// JSON file in the user's config directory.
    #[default]
    File,
    /// Nothing persisted; credentials live for one invocation.
    Memory,
}

impl StoreKind {
    pub fn from_env() -> Self {
        std::env::var(STORE_ENV)
            .ok()
            .and_then(|raw| match raw.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    log::warn!("Ignoring {}: {}", STORE_ENV, e);
                    None
                }
            })
            .unwrap_or_default()
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keychain" | "keyring" => Ok(StoreKind::Keychain),
            "file" => Ok(StoreKind::File),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown credential store '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Origin plus API prefix, without a trailing slash.
    pub base_url: String,
    /// Limit on establishing the TCP/TLS connection. Requests themselves
    /// have no deadline.
    pub connect_timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: concat!("edulearn-client/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Resolve from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve through an arbitrary lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Blank values count as unset at every level.
        let non_blank = |key: &str| lookup(key).filter(|url| !url.trim().is_empty());
        let base_url = non_blank(API_URL_ENV)
            .or_else(|| non_blank(LEGACY_API_URL_ENV))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(base_url.trim());
        if let Some(raw) = lookup(CONNECT_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(0) => config.connect_timeout = None,
                Ok(secs) => config.connect_timeout = Some(Duration::from_secs(secs)),
                Err(_) => log::warn!("Ignoring invalid {}={:?}", CONNECT_TIMEOUT_ENV, raw),
            }
        }
        config
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_when_nothing_set() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_primary_env_wins_over_legacy() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "http://localhost:5000/api/v1/"),
            (LEGACY_API_URL_ENV, "http://legacy"),
        ]));
        assert_eq!(config.base_url, "http://localhost:5000/api/v1");
    }

    #[test]
    fn test_legacy_env_used_when_primary_missing() {
        let config = ClientConfig::from_lookup(lookup(&[(LEGACY_API_URL_ENV, "http://legacy")]));
        assert_eq!(config.base_url, "http://legacy");
    }

    #[test]
    fn test_blank_primary_falls_through_to_legacy() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "  "),
            (LEGACY_API_URL_ENV, "http://legacy"),
        ]));
        assert_eq!(config.base_url, "http://legacy");

        let both_blank =
            ClientConfig::from_lookup(lookup(&[(API_URL_ENV, ""), (LEGACY_API_URL_ENV, "")]));
        assert_eq!(both_blank.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_connect_timeout_override() {
        let off = ClientConfig::from_lookup(lookup(&[(CONNECT_TIMEOUT_ENV, "0")]));
        assert_eq!(off.connect_timeout, None);

        let custom = ClientConfig::from_lookup(lookup(&[(CONNECT_TIMEOUT_ENV, "3")]));
        assert_eq!(custom.connect_timeout, Some(Duration::from_secs(3)));

        let bogus = ClientConfig::from_lookup(lookup(&[(CONNECT_TIMEOUT_ENV, "soon")]));
        assert_eq!(bogus.connect_timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("Keyring".parse::<StoreKind>().unwrap(), StoreKind::Keychain);
        assert_eq!(" file ".parse::<StoreKind>().unwrap(), StoreKind::File);
        assert!("cookie".parse::<StoreKind>().is_err());
        assert_eq!(StoreKind::default(), StoreKind::File);
    }
}
