//! Work schedules and the timetable

use super::client::YclientsClient;
use super::types::format_date;
use crate::auth::AuthMode;
use crate::error::Result;
use crate::http::{ApiResponse, Params, RequestSpec};
use crate::types::JsonObject;
use chrono::NaiveDate;

impl YclientsClient {
    /// Change a staff member's work schedule
    pub async fn update_schedule(
        &self,
        company_id: u64,
        staff_id: u64,
        fields: JsonObject,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::put(format!("schedule/{company_id}/{staff_id}"))
            .params(fields)
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// A staff member's work schedule between two dates
    pub async fn schedule(
        &self,
        company_id: u64,
        staff_id: u64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let path = format!(
            "schedule/{company_id}/{staff_id}/{}/{}",
            format_date(start_date),
            format_date(end_date)
        );
        let spec = RequestSpec::get(path).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Working dates in the month of `date`
    pub async fn timetable_dates(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: Option<u64>,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("timetable/dates/{company_id}/{}", format_date(date)))
            .params(Params::new().set_opt("staff_id", staff_id))
            .auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }

    /// Sessions of a staff member on `date`
    pub async fn timetable_seances(
        &self,
        company_id: u64,
        date: NaiveDate,
        staff_id: u64,
        user_token: &str,
    ) -> Result<ApiResponse> {
        let path = format!("timetable/seances/{company_id}/{staff_id}/{}", format_date(date));
        let spec = RequestSpec::get(path).auth(AuthMode::User);
        self.request(spec, Some(user_token)).await
    }
}
