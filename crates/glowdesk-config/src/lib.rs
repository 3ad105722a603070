//! Configuration loading for Glowdesk clients.
//!
//! A TOML file under the platform config directory merged with
//! `GLOWDESK_`-prefixed environment variables, and translation to
//! `glowdesk_api::TransportConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use glowdesk_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Backend API base URL (e.g. "https://api.glowdesk.example/api").
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Skip TLS certificate verification (development backends only).
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Route prefix protected by the session gate.
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,

    /// Where the gate redirects rejected requests.
    #[serde(default = "default_login_path")]
    pub login_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            insecure: false,
            ca_cert: None,
            admin_prefix: default_admin_prefix(),
            login_path: default_login_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_admin_prefix() -> String {
    "/admin".into()
}
fn default_login_path() -> String {
    "/login".into()
}

impl Config {
    /// The parsed base URL.
    pub fn base_url(&self) -> Result<url::Url, ConfigError> {
        self.base_url.parse().map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", self.base_url),
        })
    }

    /// Translate to the transport layer's config.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        TransportConfig {
            tls,
            timeout: Duration::from_secs(self.timeout),
            cookie_jar: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "glowdesk", "glowdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("glowdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment. Environment variables
/// (`GLOWDESK_BASE_URL`, `GLOWDESK_TIMEOUT`, ...) win over the file.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("GLOWDESK_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_friendly() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, "http://localhost:8000/api");
        assert_eq!(cfg.timeout, 30);
        assert_eq!(cfg.admin_prefix, "/admin");
        assert_eq!(cfg.login_path, "/login");
        assert!(!cfg.insecure);
    }

    #[test]
    fn transport_maps_insecure_flag() {
        let cfg = Config {
            insecure: true,
            ..Config::default()
        };
        assert!(matches!(cfg.transport().tls, TlsMode::DangerAcceptInvalid));
    }

    #[test]
    fn transport_prefers_custom_ca_when_secure() {
        let cfg = Config {
            ca_cert: Some(PathBuf::from("/etc/ssl/salon-ca.pem")),
            ..Config::default()
        };
        assert!(matches!(cfg.transport().tls, TlsMode::CustomCa(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let cfg = Config {
            base_url: "not a url".into(),
            ..Config::default()
        };
        assert!(cfg.base_url().is_err());
    }
}
