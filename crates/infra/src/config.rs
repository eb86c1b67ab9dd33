//! Configuration loading and representation.

use thiserror::Error;

/// Version reported by the API when none is configured.
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process configuration.
///
/// Read from the environment with [`AppConfig::from_env`]; individual values can
/// then be overridden with the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Reported by `GET /api/version`.
    pub version: String,
    /// Value of the `Access-Control-Allow-Origin` response header.
    pub cors_allow_origin: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            version: DEFAULT_VERSION.to_string(),
            cors_allow_origin: "*".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `API_HOST`, `API_PORT`, `API_VERSION` and `CORS_ALLOW_ORIGIN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment. Unset and empty
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("API_HOST") {
            config.host = host;
        }
        if let Some(port) = get("API_PORT") {
            config.port = port.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT",
                value: port.clone(),
            })?;
        }
        if let Some(version) = get("API_VERSION") {
            config.version = version;
        }
        if let Some(origin) = get("CORS_ALLOW_ORIGIN") {
            config.cors_allow_origin = origin;
        }

        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_cors_allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_allow_origin = origin.into();
        self
    }

    /// `host:port` for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
