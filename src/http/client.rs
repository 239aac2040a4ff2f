//! Request executor
//!
//! Turns a `RequestSpec` into one classified HTTP exchange:
//! - resolves the `Authorization` header (before any I/O)
//! - waits on the rate limiter
//! - sends with the configured transport settings
//! - decodes and classifies the response
//!
//! Nothing here retries. Every call ends in one `ApiResponse` or one `Error`.

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::request::RequestSpec;
use super::response::{classify, ApiResponse};
use crate::auth::{self, Authorization, Credentials};
use crate::error::{Error, Result};
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.alteg.io/api/v1";

/// `Accept` header identifying the API revision
pub const API_VERSION_ACCEPT: &str = "application/vnd.yclients.v2+json";

/// Connection-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Verify the server's TLS certificate
    pub verify_tls: bool,
    /// Timeout for establishing a connection
    pub connect_timeout: Duration,
    /// Timeout for the whole exchange
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_tls: true,
            connect_timeout: Duration::from_secs(60),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Transport settings
    pub transport: TransportConfig,
    /// Rate limiter configuration
    pub rate_limit: RateLimiterConfig,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            transport: TransportConfig::default(),
            rate_limit: RateLimiterConfig::default(),
            user_agent: format!("yclients-api/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Enable or disable TLS certificate verification
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.config.transport.verify_tls = verify;
        self
    }

    /// Set the connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.transport.connect_timeout = timeout;
        self
    }

    /// Set the response timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.transport.timeout = timeout;
        self
    }

    /// Set all transport settings at once
    pub fn transport(mut self, transport: TransportConfig) -> Self {
        self.config.transport = transport;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = config;
        self
    }

    /// Set the maximum request rate
    pub fn requests_per_second(mut self, rate: f64) -> Self {
        self.config.rate_limit.requests_per_second = rate;
        self
    }

    /// Set the lifetime request cap
    pub fn max_requests(mut self, max: u64) -> Self {
        self.config.rate_limit.max_requests = max;
        self
    }

    /// Disable throttling and the request cap
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = RateLimiterConfig::unlimited();
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Executes API requests with auth, throttling and response classification
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    rate_limiter: RateLimiter,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;
        config.rate_limit.validate()?;

        if !config.transport.verify_tls {
            warn!("TLS certificate verification is disabled");
        }

        let client = Client::builder()
            .connect_timeout(config.transport.connect_timeout)
            .timeout(config.transport.timeout)
            .danger_accept_invalid_certs(!config.transport.verify_tls)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        let rate_limiter = RateLimiter::new(&config.rate_limit);

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    /// The client's configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Number of requests let through the rate limiter so far
    pub async fn request_count(&self) -> u64 {
        self.rate_limiter.request_count().await
    }

    /// Execute one request.
    ///
    /// Order of operations: auth resolution, rate limiting, send, decode,
    /// classify. Any failure ends the call.
    pub async fn execute(&self, spec: &RequestSpec, credentials: &Credentials) -> Result<ApiResponse> {
        spec.check_params()?;
        let authorization = auth::resolve(spec.auth, credentials)?;
        self.rate_limiter.acquire().await?;
        self.send(spec, &authorization).await
    }

    /// Execute one request, aborting with `Cancelled` if `cancel` fires while
    /// waiting on the rate limiter or the network.
    pub async fn execute_with_cancel(
        &self,
        spec: &RequestSpec,
        credentials: &Credentials,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Request cancelled: {} {}", spec.method, spec.path);
                Err(Error::Cancelled {
                    method: spec.method,
                    path: spec.path.clone(),
                })
            }
            result = self.execute(spec, credentials) => result,
        }
    }

    async fn send(&self, spec: &RequestSpec, authorization: &Authorization) -> Result<ApiResponse> {
        let url = self.build_url(&spec.path);

        let mut req = self
            .client
            .request(spec.method.into(), &url)
            .header(ACCEPT, API_VERSION_ACCEPT);
        req = authorization.apply(req);

        if spec.method.has_body() {
            req = req.json(&spec.body());
        } else {
            let query = spec.query_pairs();
            if !query.is_empty() {
                req = req.query(&query);
            }
        }

        debug!(
            method = %spec.method,
            path = %spec.path,
            params = %spec.loggable_params(),
            "Sending request"
        );
        let started = Instant::now();

        let transport_error = |source: reqwest::Error| Error::Transport {
            method: spec.method,
            path: spec.path.clone(),
            source,
        };

        let response = req.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let raw = response.text().await.map_err(transport_error)?;

        debug!(
            method = %spec.method,
            path = %spec.path,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Received response"
        );

        let result = classify(spec, status, raw);
        if let Err(ref e) = result {
            warn!("{e}");
        }
        result
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("rate_limiter", &self.rate_limiter)
            .finish_non_exhaustive()
    }
}
