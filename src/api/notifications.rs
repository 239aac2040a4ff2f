//! Comments, company users, accounts, storages, SMS and webhooks

use super::client::YclientsClient;
use super::types::{format_date, CommentsQuery};
use crate::auth::AuthMode;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// Client reviews
    pub async fn comments(&self, company_id: u64, query: &CommentsQuery, user_token: &str) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("start_date", query.start_date.map(format_date))
            .set_opt("end_date", query.end_date.map(format_date))
            .set_opt("staff_id", query.staff_id)
            .set_opt("rating", query.rating);

        let spec = RequestSpec::get(format!("comments/{company_id}"))
            .params(params)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Users with access to the company
    pub async fn company_users(&self, company_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("company_users/{company_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Cash accounts
    pub async fn accounts(&self, company_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("accounts/{company_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Send an SMS to clients
    pub async fn send_sms(
        &self,
        company_id: u64,
        client_ids: &[u64],
        text: &str,
        user_token: &str,
    ) -> Result<ApiResponse> {
        if client_ids.is_empty() {
            return Err(Error::invalid_argument("at least one client id is required"));
        }

        let params = Params::new()
            .set("client_ids", client_ids.to_vec())
            .set("text", text);

        let spec = RequestSpec::post(format!("sms/clients/by_id/{company_id}"))
            .params(params)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Goods storages
    pub async fn storages(&self, company_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("storages/{company_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Webhook settings
    pub async fn hooks(&self, company_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("hooks_settings/{company_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Change webhook settings; `fields` must contain `urls` and `active`
    pub async fn update_hooks(&self, company_id: u64, fields: JsonObject, user_token: &str) -> Result<ApiResponse> {
        for required in ["urls", "active"] {
            if !fields.contains_key(required) {
                return Err(Error::invalid_argument(format!(
                    "webhook settings need the '{required}' field"
                )));
            }
        }

        let spec = RequestSpec::post(format!("hooks_settings/{company_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }
}
