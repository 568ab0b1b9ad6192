//! Client connection configuration.
//!
//! The configuration is resolved once at start-up and passed down to
//! whatever opens the channel: there is no process-wide cache. Resolution
//! order, lowest priority first:
//!
//! 1. built-in defaults
//! 2. the TOML file (`$AKQ_CONFIG`, else `$XDG_CONFIG_HOME/akq/config.toml`,
//!    else `~/.config/akq/config.toml`)
//! 3. `ARMONIK_*` environment variables

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::request::DEFAULT_PAGE_SIZE;

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "AKQ_CONFIG";

/// Environment variables overriding individual settings.
pub const ENDPOINT_ENV: &str = "ARMONIK_ENDPOINT";
pub const CA_CERT_ENV: &str = "ARMONIK_CA_CERT";
pub const CLIENT_CERT_ENV: &str = "ARMONIK_CLIENT_CERT";
pub const CLIENT_KEY_ENV: &str = "ARMONIK_CLIENT_KEY";
pub const ALLOW_UNSAFE_ENV: &str = "ARMONIK_ALLOW_UNSAFE";

/// Default config file contents, written by `akq config init`.
pub const DEFAULT_CONFIG: &str = r#"# akq - ArmoniK query configuration

# Config schema version (do not modify)
version = 1

# Control plane endpoint (can also use ARMONIK_ENDPOINT)
# endpoint = "https://armonik.example.com:5001"

# Root certificate used to verify the server (PEM)
# ca_cert = "/etc/armonik/ca.pem"

# Client certificate and key for mutual TLS (PEM, both or neither)
# client_cert = "/etc/armonik/client.pem"
# client_key = "/etc/armonik/client.key"

# Skip server certificate verification (testing only)
# allow_unsafe_connection = false

# Default page size of list requests
# page_size = 100
"#;

/// Connection settings for the ArmoniK control plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Config schema version for migrations.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Control plane address, e.g. `https://host:5001`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Root CA bundle used to verify the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Client certificate for mutual TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_cert: Option<PathBuf>,

    /// Private key matching `client_cert`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<PathBuf>,

    /// Accept any server certificate.
    #[serde(default)]
    pub allow_unsafe_connection: bool,

    /// Page size used when a list request does not set one.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            endpoint: None,
            ca_cert: None,
            client_cert: None,
            client_key: None,
            allow_unsafe_connection: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Resolves the configuration: file at the default path, then env overrides.
    pub fn resolve() -> ConfigResult<Self> {
        let path = config_path()?;
        let config = Self::load(&path)?;
        config.with_overrides(|key| env::var(key).ok())
    }

    /// Loads the file at `path`, or defaults when it does not exist.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: ClientConfig =
            toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Only version 1 exists so far.
        config.version = CONFIG_VERSION;
        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `ARMONIK_*` overrides read through `lookup`, then validates.
    ///
    /// `lookup` is usually `|key| std::env::var(key).ok()`.
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_ENV) {
            self.endpoint = Some(endpoint);
        }
        if let Some(path) = lookup(CA_CERT_ENV) {
            self.ca_cert = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(CLIENT_CERT_ENV) {
            self.client_cert = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup(CLIENT_KEY_ENV) {
            self.client_key = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup(ALLOW_UNSAFE_ENV) {
            self.allow_unsafe_connection = parse_flag(ALLOW_UNSAFE_ENV, &flag)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks the settings for consistency.
    ///
    /// The endpoint may be absent (offline use), but when present it must
    /// carry an `http` or `https` scheme. Client certificate and key come
    /// as a pair. The page size is non-zero.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(ConfigError::invalid(
                    "endpoint",
                    format!("'{endpoint}' must start with http:// or https://"),
                ));
            }
        }

        match (&self.client_cert, &self.client_key) {
            (Some(_), None) => {
                return Err(ConfigError::invalid(
                    "client_key",
                    "client_cert is set but client_key is missing",
                ))
            }
            (None, Some(_)) => {
                return Err(ConfigError::invalid(
                    "client_cert",
                    "client_key is set but client_cert is missing",
                ))
            }
            _ => {}
        }

        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "must be greater than 0"));
        }

        Ok(())
    }

    /// Returns true if the endpoint uses TLS.
    pub fn is_secure(&self) -> bool {
        self.endpoint
            .as_deref()
            .is_some_and(|endpoint| endpoint.starts_with("https://"))
    }

    /// Returns true if mutual TLS is configured.
    pub fn has_client_identity(&self) -> bool {
        self.client_cert.is_some() && self.client_key.is_some()
    }
}

fn parse_flag(field: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::invalid(
            field,
            format!("'{other}' is not a boolean"),
        )),
    }
}

/// Gets the config file path.
///
/// Uses `$AKQ_CONFIG` when set, otherwise XDG-style paths:
/// `~/.config/akq/config.toml` on all platforms.
pub fn config_path() -> ConfigResult<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("akq").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("akq").join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ClientConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = ClientConfig {
            endpoint: Some("https://cp.example:5001".to_string()),
            ca_cert: Some(PathBuf::from("/etc/ca.pem")),
            page_size: 25,
            ..ClientConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_default_template_parses() {
        let config: ClientConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"many\"").unwrap();

        let err = ClientConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let base = ClientConfig {
            endpoint: Some("http://file:5001".to_string()),
            ..ClientConfig::default()
        };
        let config = base
            .with_overrides(lookup_from(&[
                (ENDPOINT_ENV, "https://env:5001"),
                (ALLOW_UNSAFE_ENV, "yes"),
            ]))
            .unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("https://env:5001"));
        assert!(config.allow_unsafe_connection);
        assert!(config.is_secure());
    }

    #[test]
    fn test_invalid_flag_is_rejected() {
        let err = ClientConfig::default()
            .with_overrides(lookup_from(&[(ALLOW_UNSAFE_ENV, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: ALLOW_UNSAFE_ENV, .. }));
    }

    #[test]
    fn test_validate_rejects_endpoint_without_scheme() {
        let config = ClientConfig {
            endpoint: Some("cp.example:5001".to_string()),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "endpoint", .. })
        ));
    }

    #[test]
    fn test_validate_requires_cert_and_key_together() {
        let config = ClientConfig {
            client_cert: Some(PathBuf::from("client.pem")),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "client_key", .. })
        ));

        let config = ClientConfig {
            client_cert: Some(PathBuf::from("client.pem")),
            client_key: Some(PathBuf::from("client.key")),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.has_client_identity());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = ClientConfig {
            page_size: 0,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_config_path_prefers_env_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        env::set_var(CONFIG_PATH_ENV, &path);
        let resolved = config_path();
        env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(resolved.unwrap(), path);
    }

    #[test]
    #[serial]
    fn test_resolve_reads_file_and_env() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"http://file:5001\"\npage_size = 10\n").unwrap();

        env::set_var(CONFIG_PATH_ENV, &path);
        env::set_var(CA_CERT_ENV, "/tmp/ca.pem");
        let resolved = ClientConfig::resolve();
        env::remove_var(CONFIG_PATH_ENV);
        env::remove_var(CA_CERT_ENV);

        let config = resolved.unwrap();
        assert_eq!(config.endpoint.as_deref(), Some("http://file:5001"));
        assert_eq!(config.page_size, 10);
        assert_eq!(config.ca_cert, Some(PathBuf::from("/tmp/ca.pem")));
    }
}
