//! Online booking endpoints
//!
//! Booking-form settings, availability lookups and the booking itself.

use super::client::YclientsClient;
use super::types::{format_date, format_datetime, Appointment, BookRecord, BookingQuery};
use crate::auth::AuthMode;
use crate::error::{Error, Result};
use crate::http::{ApiResponse, Params, RequestSpec};
use chrono::NaiveDate;

impl YclientsClient {
    /// Booking form settings
    pub async fn bookform(&self, id: u64, user_token: Option<&str>) -> Result<ApiResponse> {
        let spec = RequestSpec::get(format!("bookform/{id}")).auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Localization strings; `locale` defaults to `ru-RU`
    pub async fn i18n(&self, locale: Option<&str>, user_token: Option<&str>) -> Result<ApiResponse> {
        let locale = locale.unwrap_or("ru-RU");
        let spec = RequestSpec::get(format!("i18n/{locale}")).auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Services available for booking
    pub async fn book_services(
        &self,
        company_id: u64,
        query: &BookingQuery,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("staff_id", query.staff_id)
            .set_opt("datetime", query.datetime.as_ref().map(format_datetime))
            .set_opt("service_ids", query.service_ids.clone())
            .set_opt("event_ids", query.event_ids.clone());

        let spec = RequestSpec::get(format!("book_services/{company_id}"))
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Staff available for booking
    pub async fn book_staff(
        &self,
        company_id: u64,
        query: &BookingQuery,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("staff_id", query.staff_id)
            .set_opt("datetime", query.datetime.as_ref().map(format_datetime))
            .set_opt("service_ids", query.service_ids.clone())
            .set_opt("event_ids", query.event_ids.clone())
            .set_opt("without_seances", query.without_seances.then_some(true));

        let spec = RequestSpec::get(format!("book_staff/{company_id}"))
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Dates available for booking
    pub async fn book_dates(
        &self,
        company_id: u64,
        query: &BookingQuery,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("staff_id", query.staff_id)
            .set_opt("date", query.date.map(format_date))
            .set_opt("service_ids", query.service_ids.clone())
            .set_opt("event_ids", query.event_ids.clone());

        let spec = RequestSpec::get(format!("book_dates/{company_id}"))
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Sessions available for booking with a staff member on a date
    pub async fn book_times(
        &self,
        company_id: u64,
        staff_id: u64,
        date: NaiveDate,
        query: &BookingQuery,
        user_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = Params::new()
            .set_opt("service_ids", query.service_ids.clone())
            .set_opt("event_ids", query.event_ids.clone());

        let path = format!("book_times/{company_id}/{staff_id}/{}", format_date(date));
        let spec = RequestSpec::get(path)
            .params(params)
            .auth(AuthMode::UserOptional);
        self.request(spec, user_token).await
    }

    /// Send an SMS confirmation code to a phone number
    pub async fn book_code(
        &self,
        company_id: u64,
        phone: &str,
        fullname: Option<&str>,
    ) -> Result<ApiResponse> {
        if phone.trim().is_empty() {
            return Err(Error::invalid_argument("phone is required"));
        }

        let params = Params::new()
            .set("phone", phone)
            .set_opt("fullname", fullname);

        let spec = RequestSpec::post(format!("book_code/{company_id}")).params(params);
        self.request(spec, None).await
    }

    /// Check appointments before booking
    pub async fn book_check(&self, company_id: u64, appointments: &[Appointment]) -> Result<ApiResponse> {
        let spec = RequestSpec::post(format!("book_check/{company_id}"))
            .serialize_params(&appointments)?;
        self.request(spec, None).await
    }

    /// Create a booking
    pub async fn book_record(&self, company_id: u64, record: &BookRecord) -> Result<ApiResponse> {
        record.client.validate()?;
        if record.appointments.is_empty() {
            return Err(Error::invalid_argument(
                "a booking needs at least one appointment",
            ));
        }

        let params = Params::new()
            .set("phone", record.client.phone.as_str())
            .set("fullname", record.client.fullname.as_str())
            .set("email", record.client.email.as_str())
            .set("appointments", serde_json::to_value(&record.appointments)?)
            .set_opt("notify_by_sms", record.notify_by_sms)
            .set_opt("notify_by_email", record.notify_by_email)
            .set_opt("code", record.code.as_deref())
            .set_opt("comment", record.comment.as_deref())
            .set_opt("api_id", record.api_id.as_deref());

        let spec = RequestSpec::post(format!("book_record/{company_id}")).params(params);
        self.request(spec, None).await
    }
}
