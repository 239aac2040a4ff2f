//! Authorization and the signed-in user's records

use super::client::YclientsClient;
use crate::auth::AuthMode;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::Method;

impl YclientsClient {
    /// Exchange a login and password for a user token
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<ApiResponse> {
        let params = Params::new().set("login", login).set("password", password);
        self.request(RequestSpec::post("auth").params(params), None)
            .await
    }

    /// Exchange a phone number and SMS code for a user token
    pub async fn user_auth(&self, phone: &str, code: &str) -> Result<ApiResponse> {
        let params = Params::new().set("phone", phone).set("code", code);
        self.request(RequestSpec::post("user/auth").params(params), None)
            .await
    }

    /// A booked record, addressed by its hash or by the user's token
    pub async fn user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let spec = user_record_spec(Method::GET, record_id, record_hash, user_token)?;
        self.request(spec, user_token).await
    }

    /// Cancel a booked record, addressed by its hash or by the user's token
    pub async fn delete_user_records(
        &self,
        record_id: u64,
        record_hash: Option<&str>,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let spec = user_record_spec(Method::DELETE, record_id, record_hash, user_token)?;
        self.request(spec, user_token).await
    }
}

fn user_record_spec(
    method: Method,
    record_id: u64,
    record_hash: Option<&str>,
    user_token: Option<&str>,
) -> Result<RequestSpec> {
    let record_hash = record_hash.filter(|h| !h.is_empty());
    if record_hash.is_none() && user_token.map_or(true, str::is_empty) {
        return Err(Error::invalid_argument(
            "either a record hash or a user token is required",
        ));
    }

    let path = format!("user/records/{record_id}/{}", record_hash.unwrap_or_default());
    Ok(RequestSpec::new(method, path).auth(AuthMode::UserOptional))
}
