//! Request description and parameter encoding
//!
//! A `RequestSpec` is everything the executor needs to issue one call:
//! method, interpolated path, parameter payload, and auth mode.

use crate::auth::AuthMode;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Method};
use serde::Serialize;

/// One API call, before auth resolution and throttling
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, identifiers already interpolated
    pub path: String,
    /// Parameter payload: a JSON object (or, for a few endpoints, an array)
    pub params: JsonValue,
    /// Which tokens the call needs
    pub auth: AuthMode,
}

impl RequestSpec {
    /// Create a request with no parameters and partner auth
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: JsonValue::Object(JsonObject::new()),
            auth: AuthMode::Partner,
        }
    }

    /// GET request
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// DELETE request
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Set the parameter payload
    #[must_use]
    pub fn params(mut self, params: impl Into<JsonValue>) -> Self {
        self.params = params.into();
        self
    }

    /// Set the parameter payload from any serializable value
    pub fn serialize_params<T: Serialize>(self, params: &T) -> Result<Self> {
        let value = serde_json::to_value(params)?;
        Ok(self.params(value))
    }

    /// Set the auth mode
    #[must_use]
    pub fn auth(mut self, mode: AuthMode) -> Self {
        self.auth = mode;
        self
    }

    /// Reject payloads that are neither an object nor an array
    pub(crate) fn check_params(&self) -> Result<()> {
        match self.params {
            JsonValue::Object(_) | JsonValue::Array(_) | JsonValue::Null => Ok(()),
            _ => Err(Error::invalid_argument(format!(
                "parameters for {} {} must be a JSON object or array",
                self.method, self.path
            ))),
        }
    }

    /// Query string pairs for GET/DELETE requests
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        encode_query(&self.params)
    }

    /// Parameters with secret values masked, for logging
    pub fn loggable_params(&self) -> JsonValue {
        redact(&self.params)
    }

    /// JSON body for POST/PUT requests
    pub fn body(&self) -> JsonValue {
        match &self.params {
            JsonValue::Null => JsonValue::Object(JsonObject::new()),
            other => other.clone(),
        }
    }
}

/// Parameter keys whose values never reach the logs
pub const SECRET_KEYS: &[&str] = &["password", "code"];

const REDACTED: &str = "<redacted>";

fn redact(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(key, item)| {
                    let item = if SECRET_KEYS.contains(&key.as_str()) {
                        JsonValue::String(REDACTED.to_string())
                    } else {
                        redact(item)
                    };
                    (key.clone(), item)
                })
                .collect(),
        ),
        JsonValue::Array(items) => JsonValue::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Flatten parameters into `key=value` pairs the way PHP's
/// `http_build_query` does.
///
/// Arrays become `key[0]=..`, nested objects `key[sub]=..`, booleans `1`/`0`.
/// Nulls are dropped.
pub fn encode_query(params: &JsonValue) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    match params {
        JsonValue::Object(map) => {
            for (key, value) in map {
                flatten(key.clone(), value, &mut pairs);
            }
        }
        JsonValue::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                flatten(index.to_string(), value, &mut pairs);
            }
        }
        _ => {}
    }
    pairs
}

fn flatten(key: String, value: &JsonValue, out: &mut Vec<(String, String)>) {
    match value {
        JsonValue::Null => {}
        JsonValue::Bool(b) => out.push((key, if *b { "1" } else { "0" }.to_string())),
        JsonValue::Number(n) => out.push((key, n.to_string())),
        JsonValue::String(s) => out.push((key, s.clone())),
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(format!("{key}[{index}]"), item, out);
            }
        }
        JsonValue::Object(map) => {
            for (sub, item) in map {
                flatten(format!("{key}[{sub}]"), item, out);
            }
        }
    }
}

/// Ordered parameter builder.
///
/// Absent optional values are omitted entirely rather than sent as null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(JsonObject);

impl Params {
    /// Create an empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Set a parameter only when a value is present
    #[must_use]
    pub fn set_opt<V: Into<JsonValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Merge free-form fields; later keys overwrite earlier ones
    #[must_use]
    pub fn extend(mut self, fields: JsonObject) -> Self {
        self.0.extend(fields);
        self
    }

    /// Whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> JsonObject {
        self.0
    }
}

impl From<Params> for JsonValue {
    fn from(params: Params) -> Self {
        JsonValue::Object(params.0)
    }
}

impl From<JsonObject> for Params {
    fn from(map: JsonObject) -> Self {
        Self(map)
    }
}
