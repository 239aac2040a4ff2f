// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::ref_option)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # YCLIENTS API client
//!
//! An async client for the YCLIENTS / Altegio booking platform REST API.
//!
//! ## Features
//!
//! - **Endpoint catalog**: booking, companies, services, staff, clients,
//!   records, schedules, comments, SMS and webhooks
//! - **Partner + user auth**: both tokens in one `Authorization` header,
//!   checked before any I/O
//! - **Throttling**: a minimum interval between sends and an optional
//!   lifetime request cap, shared across concurrent callers
//! - **Classification**: HTTP status and the body's `success` flag decide
//!   the outcome; failures carry the decoded body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use yclients_api::{BookingQuery, Result, YclientsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = YclientsClient::new(Some("partner-token".into()))?;
//!
//!     let staff = client.book_staff(4564, &BookingQuery::new(), None).await?;
//!     println!("{:?}", staff.data());
//!
//!     let auth = client.authenticate("login", "password").await?;
//!     let user_token = auth.data().and_then(|d| d["user_token"].as_str());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                YclientsClient (endpoint catalog)             │
//! │  bookform  book_*  companies  services  staff  records  ...  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ RequestSpec
//! ┌──────────────┬───────────────┴──────────┬────────────────────┐
//! │     Auth     │      Rate Limiter        │     Transport      │
//! ├──────────────┼──────────────────────────┼────────────────────┤
//! │ Bearer/User  │ min interval, hard cap   │ reqwest, TLS,      │
//! │ header       │ one lock for all callers │ timeouts, classify │
//! └──────────────┴──────────────────────────┴────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Partner and user token handling
pub mod auth;

/// Request executor with throttling
pub mod http;

/// Client configuration
pub mod config;

/// Log sink setup
pub mod logging;

/// Endpoint methods
pub mod api;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use api::{
    Appointment, BookRecord, BookingClient, BookingQuery, CommentsQuery, CompaniesQuery,
    RecordsQuery, ServicesQuery, YclientsClient,
};
pub use auth::{AuthMode, Credentials};
pub use config::ClientConfig;
pub use http::{ApiResponse, HttpClient, HttpClientConfig, RateLimiterConfig, RequestSpec};
pub use logging::{init_logging, LogConfig, LogSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
