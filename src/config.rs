//! Client configuration
//!
//! `ClientConfig` is the file-level configuration an embedding application
//! loads from YAML or JSON. It converts into the runtime `HttpClientConfig`.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, TransportConfig, DEFAULT_BASE_URL};
use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Client Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Partner token; can also be set later on the client
    #[serde(default)]
    pub partner_token: Option<String>,

    /// Transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Throttling settings
    #[serde(default)]
    pub rate_limit: RateLimiterConfig,

    /// Log sink settings
    #[serde(default)]
    pub log: LogConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            partner_token: None,
            http: HttpConfig::default(),
            rate_limit: RateLimiterConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("has_partner_token", &self.partner_token.is_some())
            .field("http", &self.http)
            .field("rate_limit", &self.rate_limit)
            .field("log", &self.log)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.json` files are parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::config(format!("config file '{}' not found", path.display()))
            } else {
                Error::Io(e)
            }
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;
        self.rate_limit.validate()?;
        if self.http.timeout_seconds == 0 {
            return Err(Error::config("http.timeout_seconds must be greater than 0"));
        }
        if self.http.connect_timeout_seconds == 0 {
            return Err(Error::config(
                "http.connect_timeout_seconds must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Runtime HTTP client configuration
    pub fn http_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig::builder()
            .base_url(self.base_url.clone())
            .transport(self.http.transport())
            .rate_limit(self.rate_limit.clone());
        if let Some(agent) = &self.http.user_agent {
            config = config.user_agent(agent.clone());
        }
        config.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport settings as they appear in a config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Verify the server's TLS certificate
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub connect_timeout_seconds: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Custom user agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            verify_tls: default_verify_tls(),
            connect_timeout_seconds: default_timeout(),
            timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }
}

fn default_verify_tls() -> bool {
    true
}

fn default_timeout() -> u64 {
    60
}

impl HttpConfig {
    /// Convert into runtime transport settings
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            verify_tls: self.verify_tls,
            connect_timeout: Duration::from_secs(self.connect_timeout_seconds),
            timeout: Duration::from_secs(self.timeout_seconds),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for `ClientConfig`
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the partner token
    pub fn partner_token(mut self, token: impl Into<String>) -> Self {
        self.config.partner_token = Some(token.into());
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.http.verify_tls = verify;
        self
    }

    /// Set the connect timeout in seconds
    pub fn connect_timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.http.connect_timeout_seconds = seconds;
        self
    }

    /// Set the response timeout in seconds
    pub fn timeout_seconds(mut self, seconds: u64) -> Self {
        self.config.http.timeout_seconds = seconds;
        self
    }

    /// Set the maximum request rate (0 disables throttling)
    pub fn requests_per_second(mut self, rate: f64) -> Self {
        self.config.rate_limit.requests_per_second = rate;
        self
    }

    /// Set the lifetime request cap (0 disables the cap)
    pub fn max_requests(mut self, max: u64) -> Self {
        self.config.rate_limit.max_requests = max;
        self
    }

    /// Set the log configuration
    pub fn log(mut self, log: LogConfig) -> Self {
        self.config.log = log;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
