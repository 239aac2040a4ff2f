//! The API client facade
//!
//! `YclientsClient` owns the partner token and the request executor. The
//! endpoint methods live in sibling modules as further `impl` blocks.

use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiResponse, HttpClient, HttpClientConfig, RequestSpec};
use tokio_util::sync::CancellationToken;

/// Client for the booking platform API.
///
/// Safe to share between tasks (e.g. behind an `Arc`); throttling applies
/// across all concurrent calls on the same instance.
#[derive(Debug)]
pub struct YclientsClient {
    http: HttpClient,
    auth: Authenticator,
}

impl YclientsClient {
    /// Create a client against the production API with default settings
    pub fn new(partner_token: Option<String>) -> Result<Self> {
        Self::with_http_config(HttpClientConfig::default(), partner_token)
    }

    /// Create a client from a loaded configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_http_config(config.http_config(), config.partner_token.clone())
    }

    /// Create a client from a runtime HTTP configuration
    pub fn with_http_config(config: HttpClientConfig, partner_token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: HttpClient::with_config(config)?,
            auth: Authenticator::new(partner_token),
        })
    }

    /// Set the partner token used by subsequent calls
    pub fn set_partner_token(&self, token: impl Into<String>) -> &Self {
        self.auth.set_partner_token(Some(token.into()));
        self
    }

    /// Forget the partner token
    pub fn clear_partner_token(&self) -> &Self {
        self.auth.set_partner_token(None);
        self
    }

    /// Current partner token
    pub fn partner_token(&self) -> Option<String> {
        self.auth.partner_token()
    }

    /// The underlying request executor
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Number of requests issued so far
    pub async fn request_count(&self) -> u64 {
        self.http.request_count().await
    }

    /// Issue an arbitrary request with the client's partner token and an
    /// optional user token
    pub async fn request(&self, spec: RequestSpec, user_token: Option<&str>) -> Result<ApiResponse> {
        let credentials = self.auth.credentials(user_token);
        self.http.execute(&spec, &credentials).await
    }

    /// Like [`request`](Self::request), aborting with `Error::Cancelled` when
    /// `cancel` fires
    pub async fn request_with_cancel(
        &self,
        spec: RequestSpec,
        user_token: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse> {
        let credentials = self.auth.credentials(user_token);
        self.http.execute_with_cancel(&spec, &credentials, cancel).await
    }
}
