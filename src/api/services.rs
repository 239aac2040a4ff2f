//! Service categories, services and events

use super::client::YclientsClient;
use super::types::{segment, ServicesQuery};
use crate::auth::AuthMode;
use crate::error::Result;
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;

impl YclientsClient {
    /// Service categories of a company, or one category when `category_id`
    /// is given
    pub async fn service_categories(
        &self,
        company_id: u64,
        category_id: Option<u64>,
        staff_id: Option<u64>,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let path = format!("service_categories/{company_id}/{}", segment(category_id));
        let spec = RequestSpec::get(path)
            .params(Params::new().set_opt("staff_id", staff_id))
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Create a service category
    pub async fn create_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("service_categories/{company_id}/{category_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// A single service category
    pub async fn service_category(
        &self,
        company_id: u64,
        category_id: u64,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("service_category/{company_id}/{category_id}"))
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Update a service category
    pub async fn update_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("service_category/{company_id}/{category_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Delete a service category
    pub async fn delete_service_category(
        &self,
        company_id: u64,
        category_id: u64,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::delete(format!("service_category/{company_id}/{category_id}"))
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Services of a company, or one service when `service_id` is given
    pub async fn services(
        &self,
        company_id: u64,
        service_id: Option<u64>,
        query: &ServicesQuery,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("staff_id", query.staff_id)
            .set_opt("category_id", query.category_id);

        let path = format!("company/{company_id}/services/{}", segment(service_id));
        let spec = RequestSpec::get(path)
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Create a service
    pub async fn create_service(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        fields: Option<JsonObject>,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("services/{company_id}/{service_id}"))
            .params(service_params(category_id, title, fields))
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Update a service
    pub async fn update_service(
        &self,
        company_id: u64,
        service_id: u64,
        category_id: u64,
        title: &str,
        fields: Option<JsonObject>,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("services/{company_id}/{service_id}"))
            .params(service_params(category_id, title, fields))
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Delete a service
    pub async fn delete_service(&self, company_id: u64, service_id: u64, user_token: &str) -> Result<ApiResponse> {
        let spec = RequestSpec::delete(format!("services/{company_id}/{service_id}"))
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Events (promotions) of a company, or one event
    pub async fn events(
        &self,
        company_id: u64,
        event_id: Option<u64>,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let path = format!("events/{company_id}/{}", segment(event_id));
        let spec = RequestSpec::get(path).auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }
}

fn service_params(category_id: u64, title: &str, fields: Option<JsonObject>) -> Params {
    Params::new()
        .set("category_id", category_id)
        .set("title", title)
        .extend(fields.unwrap_or_default())
}
