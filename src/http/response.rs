//! Response decoding and classification

use super::request::RequestSpec;
use crate::error::{Error, Result};
use crate::types::JsonValue;

/// A successful, decoded API response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body (`Null` for a 204 No Content)
    pub body: JsonValue,
    /// Derived from the status and the body's `success` field
    pub success: bool,
}

impl ApiResponse {
    /// The `data` member of the response envelope, if any
    pub fn data(&self) -> Option<&JsonValue> {
        self.body.get("data")
    }

    /// The `meta` member of the response envelope, if any
    pub fn meta(&self) -> Option<&JsonValue> {
        self.body.get("meta")
    }

    /// Take the decoded body
    pub fn into_body(self) -> JsonValue {
        self.body
    }
}

/// HTTP 204 No Content
pub const NO_CONTENT: u16 = 204;

/// Decode a raw body.
///
/// Only a 204 No Content may come back empty; it decodes to `Null`. Any
/// other body must be valid JSON.
pub fn decode_body(status: u16, raw: &str) -> serde_json::Result<JsonValue> {
    if status == NO_CONTENT && raw.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(raw)
}

/// A response is successful when the status is 2xx and the body either has
/// no `success` field or a truthy one.
pub fn is_success(status: u16, body: &JsonValue) -> bool {
    if !(200..300).contains(&status) {
        return false;
    }
    match body.get("success") {
        Some(flag) => is_truthy(flag),
        None => true,
    }
}

/// Loose truthiness: `false`, `0`, `""`, `"0"`, `null` and empty
/// containers are false.
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty() && s != "0",
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(map) => !map.is_empty(),
    }
}

/// Decode and classify a completed exchange
pub(crate) fn classify(spec: &RequestSpec, status: u16, raw: String) -> Result<ApiResponse> {
    let body = match decode_body(status, &raw) {
        Ok(body) => body,
        Err(source) => {
            return Err(Error::MalformedResponse {
                method: spec.method,
                path: spec.path.clone(),
                status,
                body: raw,
                source,
            })
        }
    };

    if is_success(status, &body) {
        Ok(ApiResponse {
            status,
            body,
            success: true,
        })
    } else {
        Err(Error::Api {
            method: spec.method,
            path: spec.path.clone(),
            status,
            body,
        })
    }
}
