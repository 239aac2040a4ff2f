//! Authentication module
//!
//! The API authenticates with a partner token (`Bearer`) and, for calls made
//! on behalf of a user, an additional user token (`User`). Both travel in a
//! single `Authorization` header.

mod authenticator;
mod types;

pub use authenticator::{resolve, Authenticator, Authorization};
pub use types::{AuthMode, Credentials};
