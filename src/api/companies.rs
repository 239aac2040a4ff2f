//! Company and company-network endpoints

use super::client::YclientsClient;
use super::types::CompaniesQuery;
use crate::auth::AuthMode;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// Company networks available to the user
    pub async fn groups(&self, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get("groups").auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// List companies.
    ///
    /// `query.my` restricts the list to companies the user manages and
    /// therefore needs a user token.
    pub async fn companies(&self, query: &CompaniesQuery, user_token: Option<&str>) -> Result<ApiResponse> {
        if query.my == Some(true) && user_token.map_or(true, str::is_empty) {
            return Err(Error::invalid_argument(
                "listing the user's own companies requires a user token",
            ));
        }

        let params = Params::new()
            .set_opt("group_id", query.group_id)
            .set_opt("active", query.active)
            .set_opt("moderated", query.moderated)
            .set_opt("forBooking", query.for_booking)
            .set_opt("my", query.my)
            .set_opt("page", query.page)
            .set_opt("count", query.count);

        let spec = RequestSpec::get("companies")
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Create a company; `fields` must contain `title`
    pub async fn create_company(&self, fields: JsonObject, user_token: &str) -> Result<ApiResponse> {
        if !fields.contains_key("title") {
            return Err(Error::invalid_argument("a company needs a title"));
        }

        let spec = RequestSpec::post("companies")
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// A single company
    pub async fn company(&self, id: u64, user_token: Option<&str>) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("company/{id}")).auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Update a company
    pub async fn update_company(&self, id: u64, fields: JsonObject, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("company/{id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Delete a company
    pub async fn delete_company(&self, id: u64) -> Result<ApiResponse> {
        self.request(RequestSpec::delete(format!("company/{id}")), None)
            .await
    }
}
