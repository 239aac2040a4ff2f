//! Auth types
//!
//! `AuthMode` is fixed per endpoint; `Credentials` is the token snapshot
//! taken at the start of a call.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tokens an endpoint needs in its `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// No `Authorization` header
    None,
    /// `Bearer <partner>`; partner token required
    #[default]
    Partner,
    /// `Bearer <partner>, User <user>`; user token required, partner token
    /// included when set
    User,
    /// Like `User` when a user token is supplied, otherwise falls back to
    /// partner-only auth
    UserOptional,
}

/// Tokens available to a single call
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Partner token held by the client
    pub partner_token: Option<String>,
    /// Per-call user token, never stored by the client
    pub user_token: Option<String>,
}

impl Credentials {
    /// Create credentials with a partner token only
    pub fn partner(token: impl Into<String>) -> Self {
        Self {
            partner_token: Some(token.into()),
            user_token: None,
        }
    }

    /// Attach a user token
    #[must_use]
    pub fn with_user(mut self, token: impl Into<String>) -> Self {
        self.user_token = Some(token.into());
        self
    }

    /// Partner token, treating an empty string as absent
    pub fn partner_token(&self) -> Option<&str> {
        non_empty(self.partner_token.as_deref())
    }

    /// User token, treating an empty string as absent
    pub fn user_token(&self) -> Option<&str> {
        non_empty(self.user_token.as_deref())
    }
}

// Tokens are secrets; keep them out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("has_partner_token", &self.partner_token().is_some())
            .field("has_user_token", &self.user_token().is_some())
            .finish()
    }
}

fn non_empty(token: Option<&str>) -> Option<&str> {
    token.filter(|t| !t.is_empty())
}
