//! Client (customer) database endpoints

use super::client::YclientsClient;
use crate::auth::AuthMode;
use crate::error::Result;
use crate::http::{ApiResponse, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// Search the client database; `filters` is passed through as the body
    pub async fn search_clients(
        &self,
        company_id: u64,
        filters: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("company/{company_id}/clients/search"))
            .params(filters)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Add a client
    pub async fn create_client(&self, company_id: u64, fields: JsonObject, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("clients/{company_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// A single client
    pub async fn client(&self, company_id: u64, id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("client/{company_id}/{id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Update a client
    pub async fn update_client(
        &self,
        company_id: u64,
        id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("client/{company_id}/{id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Delete a client
    pub async fn delete_client(&self, company_id: u64, id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::delete(format!("client/{company_id}/{id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }
}
