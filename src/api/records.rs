//! Record (appointment) endpoints

use super::client::YclientsClient;
use super::types::{format_date, format_datetime, RecordsQuery};
use crate::auth::AuthMode;
use crate::error::Result;
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// List records of a company
    pub async fn records(&self, company_id: u64, query: &RecordsQuery, user_token: &str) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("page", query.page)
            .set_opt("count", query.count)
            .set_opt("staff_id", query.staff_id)
            .set_opt("client_id", query.client_id)
            .set_opt("start_date", query.start_date.map(format_date))
            .set_opt("end_date", query.end_date.map(format_date))
            .set_opt("c_start_date", query.c_start_date.map(format_date))
            .set_opt("c_end_date", query.c_end_date.map(format_date))
            .set_opt("changed_after", query.changed_after.as_ref().map(format_datetime))
            .set_opt("changed_before", query.changed_before.as_ref().map(format_datetime));

        let spec = RequestSpec::get(format!("records/{company_id}"))
            .params(params)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Create a record
    pub async fn create_record(&self, company_id: u64, fields: JsonObject, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("records/{company_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// A single record
    pub async fn record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("record/{company_id}/{record_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Update a record
    pub async fn update_record(
        &self,
        company_id: u64,
        record_id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("record/{company_id}/{record_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Delete a record
    pub async fn delete_record(&self, company_id: u64, record_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::delete(format!("record/{company_id}/{record_id}")).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }
}
