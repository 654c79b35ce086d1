//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! 1. Environment variables (highest priority)
//!    ORDERING_BASE_URL=http://api.armenu.net:8090/
//!    ORDERING_USE_LOCAL_DATA=true
//!
//! 2. TOML config file (optional)
//!
//! 3. Default values (lowest priority)
//!    http://localhost:3000/, remote backend
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [client]
//! base_url = "http://api.armenu.net:8090/"
//! use_local_data = false
//! ```
//!
//! A `ClientConfig` is read-only once built; construct it once at startup and
//! hand it (or the `OrderingClient` built from it) to every consumer.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/";

pub const ENV_BASE_URL: &str = "ORDERING_BASE_URL";
pub const ENV_USE_LOCAL_DATA: &str = "ORDERING_USE_LOCAL_DATA";

/// Settings fixed at client construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin: scheme, host, port and an optional path prefix.
    pub base_url: String,

    /// Serve canned data instead of calling the backend.
    pub use_local_data: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            use_local_data: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    client: ClientConfig,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            use_local_data: false,
        }
    }

    /// Config that never touches the network.
    pub fn local() -> Self {
        Self {
            use_local_data: true,
            ..Self::default()
        }
    }

    /// Parse the `[client]` table of a TOML document. Missing keys default.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(raw)?;
        Ok(file.client)
    }

    /// Defaults, overlaid by `path` (if given), overlaid by the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                debug!(path = %path.display(), "reading client config");
                Self::from_toml_str(&std::fs::read_to_string(path)?)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.base_origin()?;
        info!(
            base_url = %config.base_url,
            use_local_data = config.use_local_data,
            "client config loaded"
        );
        Ok(config)
    }

    /// Apply `ORDERING_*` overrides from `lookup` (the process environment
    /// in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_USE_LOCAL_DATA) {
            self.use_local_data = parse_flag(&raw).ok_or(ConfigError::InvalidEnv {
                key: ENV_USE_LOCAL_DATA,
                value: raw,
            })?;
        }
        Ok(())
    }

    /// The validated backend origin.
    pub fn base_origin(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_mock_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:3000/");
        assert!(!config.use_local_data);
        assert!(config.base_origin().is_ok());
    }

    #[test]
    fn parses_client_table() {
        let config = ClientConfig::from_toml_str(
            r#"
            [client]
            base_url = "http://api.armenu.net:8090/"
            use_local_data = true
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://api.armenu.net:8090/");
        assert!(config.use_local_data);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = ClientConfig::from_toml_str("[client]\nuse_local_data = true\n").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.use_local_data);

        assert_eq!(ClientConfig::from_toml_str("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = ClientConfig::from_toml_str("[client]\nuse_local_data = \"maybe\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = ClientConfig::new("http://file-host:8090/");
        config
            .apply_overrides(env(&[
                (ENV_BASE_URL, "https://env-host/"),
                (ENV_USE_LOCAL_DATA, "yes"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://env-host/");
        assert!(config.use_local_data);
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_overrides(env(&[(ENV_USE_LOCAL_DATA, "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn base_origin_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url").base_origin(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://files.example.com/").base_origin(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn file_values_survive_absent_overrides() {
        let mut config = ClientConfig::from_toml_str(
            "[client]\nbase_url = \"http://127.0.0.1:9000/\"\nuse_local_data = true\n",
        )
        .unwrap();
        config.apply_overrides(env(&[])).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");
        assert!(config.use_local_data);

        config
            .apply_overrides(env(&[(ENV_USE_LOCAL_DATA, "off")]))
            .unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000/");
        assert!(!config.use_local_data);
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("ordering-config-does-not-exist.toml");
        let err = ClientConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
