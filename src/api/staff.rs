//! Staff endpoints

use super::client::YclientsClient;
use super::types::segment;
use crate::auth::AuthMode;
use crate::error::Result;
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// Staff of a company, or one staff member when `staff_id` is given
    pub async fn staff(
        &self,
        company_id: u64,
        staff_id: Option<u64>,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let path = format!("staff/{company_id}/{}", segment(staff_id));
        let spec = RequestSpec::get(path).auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Add a staff member
    pub async fn create_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        name: &str,
        fields: Option<JsonObject>,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set("name", name)
            .extend(fields.unwrap_or_default());

        let spec = RequestSpec::post(format!("staff/{company_id}/{staff_id}"))
            .params(params)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Update a staff member
    pub async fn update_staff(
        &self,
        company_id: u64,
        staff_id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("staff/{company_id}/{staff_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Remove a staff member
    pub async fn delete_staff(&self, company_id: u64, staff_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::delete(format!("staff/{company_id}/{staff_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }
}
