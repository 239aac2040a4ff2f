//! Authenticator implementation
//!
//! Holds the partner token for the lifetime of a client and turns an
//! `AuthMode` plus `Credentials` into the `Authorization` header value.

use super::types::{AuthMode, Credentials};
use crate::error::{Error, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;
use std::sync::{PoisonError, RwLock};

/// Owns the partner token and hands out per-call credential snapshots
#[derive(Debug, Default)]
pub struct Authenticator {
    partner_token: RwLock<Option<String>>,
}

impl Authenticator {
    /// Create an authenticator with an optional partner token
    pub fn new(partner_token: Option<String>) -> Self {
        Self {
            partner_token: RwLock::new(partner_token),
        }
    }

    /// Replace the partner token. The latest value wins.
    pub fn set_partner_token(&self, token: Option<String>) {
        let mut guard = self
            .partner_token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = token;
    }

    /// Current partner token
    pub fn partner_token(&self) -> Option<String> {
        self.partner_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot the partner token together with a per-call user token
    pub fn credentials(&self, user_token: Option<&str>) -> Credentials {
        Credentials {
            partner_token: self.partner_token(),
            user_token: user_token.map(str::to_string),
        }
    }
}

/// A resolved `Authorization` header, ready to attach
#[derive(Clone, PartialEq, Eq)]
pub struct Authorization(Option<String>);

impl Authorization {
    /// Header value, if the mode sends one
    pub fn header_value(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Attach the header to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.0 {
            Some(value) => req.header(AUTHORIZATION, value),
            None => req,
        }
    }
}

impl std::fmt::Debug for Authorization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Authorization")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Resolve the `Authorization` header for `mode`.
///
/// Fails with `MissingCredentials` when a required token is absent; no
/// network I/O happens before this check.
pub fn resolve(mode: AuthMode, credentials: &Credentials) -> Result<Authorization> {
    let partner = credentials.partner_token();
    let user = credentials.user_token();

    let value = match mode {
        AuthMode::None => None,
        AuthMode::Partner => Some(partner_only(partner)?),
        AuthMode::User => {
            let user = user.ok_or_else(|| {
                Error::missing_credentials("user token is required for this request")
            })?;
            Some(with_user(partner, user))
        }
        AuthMode::UserOptional => match user {
            Some(user) => Some(with_user(partner, user)),
            None => Some(partner_only(partner)?),
        },
    };

    Ok(Authorization(value))
}

fn partner_only(partner: Option<&str>) -> Result<String> {
    partner
        .map(|token| format!("Bearer {token}"))
        .ok_or_else(|| Error::missing_credentials("partner token is not set"))
}

fn with_user(partner: Option<&str>, user: &str) -> String {
    match partner {
        Some(partner) => format!("Bearer {partner}, User {user}"),
        None => format!("User {user}"),
    }
}
