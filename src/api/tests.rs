//! Tests for the endpoint catalog

use super::*;
use crate::error::Error;
use crate::http::HttpClientConfig;
use chrono::{DateTime, NaiveDate};
use pretty_assertions::assert_eq;
use serde_json::{json, Map};
use std::io;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, partner_token: Option<&str>) -> YclientsClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .no_rate_limit()
        .build();
    YclientsClient::with_http_config(config, partner_token.map(String::from)).unwrap()
}

fn ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []}))
}

fn fields(value: serde_json::Value) -> Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

async fn authorization_of_last_request(server: &MockServer) -> Option<String> {
    let requests = server.received_requests().await.unwrap();
    requests
        .last()
        .and_then(|r| r.headers.get("authorization"))
        .map(|v| v.to_str().unwrap().to_string())
}

/// In-memory log sink
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Partner token handling
// ============================================================================

#[tokio::test]
async fn test_partner_token_setter_latest_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookform/5"))
        .respond_with(ok())
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("first"));
    client.bookform(5, None).await.unwrap();
    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer first")
    );

    client.set_partner_token("second");
    assert_eq!(client.partner_token().as_deref(), Some("second"));
    client.bookform(5, None).await.unwrap();
    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer second")
    );
}

#[tokio::test]
async fn test_partner_tokens_do_not_leak_between_clients() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookform/1"))
        .respond_with(ok())
        .mount(&server)
        .await;

    let a = client_for(&server, Some("token-a"));
    let b = client_for(&server, None);
    b.set_partner_token("token-b");

    a.bookform(1, None).await.unwrap();
    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer token-a")
    );
    b.bookform(1, None).await.unwrap();
    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer token-b")
    );
}

#[tokio::test]
async fn test_cleared_partner_token_fails_before_io() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.clear_partner_token();
    let err = client.delete_company(9).await.unwrap_err();
    assert!(matches!(err, Error::MissingCredentials { .. }));
    assert_eq!(client.request_count().await, 0);
}

// ============================================================================
// Booking
// ============================================================================

#[tokio::test]
async fn test_book_services_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book_services/4564"))
        .and(query_param("staff_id", "12"))
        .and(query_param("datetime", "2024-03-01T18:30:00+0300"))
        .and(query_param("service_ids[0]", "1"))
        .and(query_param("service_ids[1]", "2"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let query = BookingQuery::new()
        .staff_id(12)
        .datetime(DateTime::parse_from_rfc3339("2024-03-01T18:30:00+03:00").unwrap())
        .service_ids(vec![1, 2]);

    let response = client.book_services(4564, &query, None).await.unwrap();
    assert!(response.success);
    assert_eq!(response.data(), Some(&json!([])));
}

#[tokio::test]
async fn test_book_times_path_and_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book_times/1/7/2024-03-01"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    client
        .book_times(1, 7, date, &BookingQuery::new(), Some("user"))
        .await
        .unwrap();

    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer partner, User user")
    );
}

#[tokio::test]
async fn test_book_staff_without_seances_flag() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book_staff/3"))
        .and(query_param("without_seances", "1"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client
        .book_staff(3, &BookingQuery::new().without_seances(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_i18n_default_locale() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/i18n/ru-RU"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.i18n(None, None).await.unwrap();
}

#[tokio::test]
async fn test_book_code_sends_phone() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book_code/10"))
        .and(body_json(json!({"phone": "79161502239"})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.book_code(10, "79161502239", None).await.unwrap();
}

#[tokio::test]
async fn test_book_check_sends_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book_check/10"))
        .and(body_json(json!([{
            "id": 1,
            "services": [5],
            "events": [],
            "staff_id": 7,
            "datetime": "2024-03-01T13:00:00+03:00"
        }])))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let appointment = Appointment {
        id: 1,
        services: vec![5],
        events: vec![],
        staff_id: 7,
        datetime: DateTime::parse_from_rfc3339("2024-03-01T13:00:00+03:00").unwrap(),
    };
    client.book_check(10, &[appointment]).await.unwrap();
}

#[tokio::test]
async fn test_book_check_passes_empty_list_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book_check/10"))
        .and(body_json(json!([])))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.book_check(10, &[]).await.unwrap();
}

#[tokio::test]
async fn test_book_record_validation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));

    let missing_email = BookRecord::new(BookingClient::new("7916", "Ann", ""), vec![]);
    let err = client.book_record(1, &missing_email).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let no_appointments =
        BookRecord::new(BookingClient::new("7916", "Ann", "ann@example.com"), vec![]);
    let err = client.book_record(1, &no_appointments).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));

    let err = client.book_code(1, " ", None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

// ============================================================================
// User
// ============================================================================

#[tokio::test]
async fn test_authenticate_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(json!({"login": "ann", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"user_token": "u-1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let response = client.authenticate("ann", "secret").await.unwrap();
    assert_eq!(response.data().unwrap()["user_token"], "u-1");
}

#[tokio::test]
async fn test_login_secrets_stay_out_of_logs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok())
        .expect(2)
        .mount(&server)
        .await;

    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let client = client_for(&server, Some("partner"));
    client.authenticate("ann", "hunter2").await.unwrap();
    client.user_auth("79161502239", "4711").await.unwrap();

    let output = logs.contents();
    assert!(output.contains("Sending request"), "{output}");
    assert!(output.contains("<redacted>"), "{output}");
    assert!(output.contains("ann"), "{output}");
    assert!(!output.contains("hunter2"), "{output}");
    assert!(!output.contains("4711"), "{output}");
}

#[tokio::test]
async fn test_user_records_by_hash_uses_partner_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/records/55/abc"))
        .and(header("authorization", "Bearer partner"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.user_records(55, Some("abc"), None).await.unwrap();
}

#[tokio::test]
async fn test_delete_user_records_by_token() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/user/records/55/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let response = client
        .delete_user_records(55, None, Some("user"))
        .await
        .unwrap();
    assert_eq!(response.status, 204);
}

#[tokio::test]
async fn test_user_records_needs_hash_or_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let err = client.user_records(55, Some(""), None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

// ============================================================================
// Companies / services / staff
// ============================================================================

#[tokio::test]
async fn test_companies_query_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/companies"))
        .and(query_param("group_id", "8"))
        .and(query_param("forBooking", "1"))
        .and(query_param("active", "0"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let query = CompaniesQuery {
        group_id: Some(8),
        for_booking: Some(true),
        active: Some(false),
        ..CompaniesQuery::default()
    };
    client.companies(&query, None).await.unwrap();
}

#[tokio::test]
async fn test_companies_my_requires_user_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let query = CompaniesQuery {
        my: Some(true),
        ..CompaniesQuery::default()
    };
    let err = client.companies(&query, None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_create_company_requires_title() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some("partner"));

    let err = client
        .create_company(fields(json!({"address": "Main st."})), "user")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_groups_requires_user_token() {
    let server = MockServer::start().await;
    let client = client_for(&server, Some("partner"));

    let err = client.groups("").await.unwrap_err();
    assert!(matches!(err, Error::MissingCredentials { .. }));
}

#[tokio::test]
async fn test_services_list_path_has_trailing_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/company/4/services/"))
        .and(query_param("category_id", "3"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let query = ServicesQuery {
        category_id: Some(3),
        ..ServicesQuery::default()
    };
    client.services(4, None, &query, None).await.unwrap();
}

#[tokio::test]
async fn test_update_service_merges_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/services/4/21"))
        .and(body_json(json!({
            "category_id": 3,
            "title": "Haircut",
            "price_min": 500
        })))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client
        .update_service(4, 21, 3, "Haircut", Some(fields(json!({"price_min": 500}))), "user")
        .await
        .unwrap();
    assert_eq!(
        authorization_of_last_request(&server).await.as_deref(),
        Some("Bearer partner, User user")
    );
}

#[tokio::test]
async fn test_staff_single_member() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/staff/4/9"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.staff(4, Some(9), None).await.unwrap();
}

// ============================================================================
// Records / schedule / notifications
// ============================================================================

#[tokio::test]
async fn test_records_date_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/records/4"))
        .and(query_param("start_date", "2024-03-01"))
        .and(query_param("changed_after", "2024-03-01T00:00:00+0000"))
        .and(query_param("count", "50"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let query = RecordsQuery {
        count: Some(50),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1),
        changed_after: Some(DateTime::parse_from_rfc3339("2024-03-01T00:00:00+00:00").unwrap()),
        ..RecordsQuery::default()
    };
    client.records(4, &query, "user").await.unwrap();
}

#[tokio::test]
async fn test_schedule_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schedule/4/9/2024-03-01/2024-03-31"))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client
        .schedule(
            4,
            9,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
            "user",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_send_sms_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sms/clients/by_id/4"))
        .and(body_json(json!({"client_ids": [1, 2], "text": "Hello"})))
        .respond_with(ok())
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    client.send_sms(4, &[1, 2], "Hello", "user").await.unwrap();
}

#[tokio::test]
async fn test_update_hooks_requires_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok())
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let err = client
        .update_hooks(4, fields(json!({"urls": ["https://example.com"]})), "user")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("active"));
}

#[tokio::test]
async fn test_endpoint_error_carries_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/4/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "data": null,
            "meta": {"message": "Client not found"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, Some("partner"));
    let err = client.client(4, 77, "user").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.api_message(), Some("Client not found"));
}
