use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    #[serde(default)]
    pub use_json: bool,
    #[serde(default = "default_rotation")]
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub services: ServicesConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Downstream service endpoints.
///
/// Each URL carries the service's API prefix, e.g. `http://reservation:8070/api/v1`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServicesConfig {
    pub reservation_url: String,
    pub library_url: String,
    pub rating_url: String,
    /// Per-call timeout applied to every downstream request
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Maximum in-flight requests per downstream host
    #[serde(default = "default_max_conns_per_host")]
    pub max_conns_per_host: usize,
}

fn default_rotation() -> String {
    "never".to_string()
}

fn default_request_timeout_ms() -> u64 {
    4_000
}

fn default_max_conns_per_host() -> usize {
    100
}

impl ServicesConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl AppConfig {
    /// Load `config/{env}.yaml`
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        Self::from_file(&format!("config/{}.yaml", env))
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let services = &self.services;
        for (name, url) in [
            ("reservation_url", &services.reservation_url),
            ("library_url", &services.library_url),
            ("rating_url", &services.rating_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "services.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if services.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "services.request_timeout_ms must be positive".to_string(),
            ));
        }
        if services.max_conns_per_host == 0 {
            return Err(ConfigError::Invalid(
                "services.max_conns_per_host must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
