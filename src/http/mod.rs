//! HTTP request execution
//!
//! The shared layer under every endpoint method.
//!
//! # Features
//!
//! - **Auth injection**: partner / user tokens in the `Authorization` header
//! - **Rate Limiting**: minimum interval between sends plus a lifetime cap
//! - **Transport settings**: TLS verification, connect and response timeouts
//! - **Classification**: status code and `success` flag decide the outcome

mod client;
mod rate_limit;
mod request;
mod response;

pub use client::{
    HttpClient, HttpClientConfig, HttpClientConfigBuilder, TransportConfig, API_VERSION_ACCEPT,
    DEFAULT_BASE_URL,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig, ThrottleState, MAX_INTERVAL};
pub use request::{encode_query, Params, RequestSpec, SECRET_KEYS};
pub use response::{decode_body, is_success, ApiResponse};
