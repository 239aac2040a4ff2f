//! Typed parameters for endpoint methods
//!
//! Optional filters are `Option` fields; an absent filter is left out of the
//! request entirely.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// `YYYY-MM-DD`
pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// ISO-8601 with a compact offset, e.g. `2024-03-01T18:30:00+0300`
pub(crate) fn format_datetime(datetime: &DateTime<FixedOffset>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}

/// An optional trailing path segment; renders empty when absent
pub(crate) fn segment<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

// ============================================================================
// Booking
// ============================================================================

/// Filters shared by the online-booking endpoints.
///
/// Each endpoint sends only the filters it supports: `book_services` uses
/// `staff_id`, `datetime`, `service_ids`, `event_ids`; `book_staff` adds
/// `without_seances`; `book_dates` uses `date` instead of `datetime`;
/// `book_times` uses only the id lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingQuery {
    /// Filter by staff member
    pub staff_id: Option<u64>,
    /// Filter by session date and time
    pub datetime: Option<DateTime<FixedOffset>>,
    /// Filter by month of booking
    pub date: Option<NaiveDate>,
    /// Services already chosen within the same booking
    pub service_ids: Option<Vec<u64>>,
    /// Events already chosen within the same booking
    pub event_ids: Option<Vec<u64>>,
    /// Skip nearest free sessions in `book_staff`
    pub without_seances: bool,
}

impl BookingQuery {
    /// Empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by staff member
    #[must_use]
    pub fn staff_id(mut self, id: u64) -> Self {
        self.staff_id = Some(id);
        self
    }

    /// Filter by date and time
    #[must_use]
    pub fn datetime(mut self, datetime: DateTime<FixedOffset>) -> Self {
        self.datetime = Some(datetime);
        self
    }

    /// Filter by date
    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Filter by chosen services
    #[must_use]
    pub fn service_ids(mut self, ids: Vec<u64>) -> Self {
        self.service_ids = Some(ids);
        self
    }

    /// Filter by chosen events
    #[must_use]
    pub fn event_ids(mut self, ids: Vec<u64>) -> Self {
        self.event_ids = Some(ids);
        self
    }

    /// Skip nearest free sessions
    #[must_use]
    pub fn without_seances(mut self) -> Self {
        self.without_seances = true;
        self
    }
}

/// One appointment inside a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Caller-chosen id, echoed back in the response
    pub id: u64,
    /// Service ids
    #[serde(default)]
    pub services: Vec<u64>,
    /// Event ids
    #[serde(default)]
    pub events: Vec<u64>,
    /// Staff member
    pub staff_id: u64,
    /// Session start
    pub datetime: DateTime<FixedOffset>,
}

/// Contact details of the person booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingClient {
    /// Phone, e.g. `79161502239`
    pub phone: String,
    /// Full name
    pub fullname: String,
    /// Email
    pub email: String,
}

impl BookingClient {
    /// Create booking client details
    pub fn new(
        phone: impl Into<String>,
        fullname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            phone: phone.into(),
            fullname: fullname.into(),
            email: email.into(),
        }
    }

    /// All three fields must be non-empty
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("phone", &self.phone),
            ("fullname", &self.fullname),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::invalid_argument(format!(
                "booking client is missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// A booking request for `book_record`
#[derive(Debug, Clone, PartialEq)]
pub struct BookRecord {
    /// Who is booking
    pub client: BookingClient,
    /// At least one appointment
    pub appointments: Vec<Appointment>,
    /// Phone confirmation code
    pub code: Option<String>,
    /// Hours before the visit to remind by SMS (0 for none)
    pub notify_by_sms: Option<u32>,
    /// Hours before the visit to remind by email (0 for none)
    pub notify_by_email: Option<u32>,
    /// Booking comment
    pub comment: Option<String>,
    /// External booking id
    pub api_id: Option<String>,
}

impl BookRecord {
    /// Create a booking with no optional fields
    pub fn new(client: BookingClient, appointments: Vec<Appointment>) -> Self {
        Self {
            client,
            appointments,
            code: None,
            notify_by_sms: None,
            notify_by_email: None,
            comment: None,
            api_id: None,
        }
    }

    /// Attach the confirmation code
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Reminder settings
    #[must_use]
    pub fn notify(mut self, by_sms: Option<u32>, by_email: Option<u32>) -> Self {
        self.notify_by_sms = by_sms;
        self.notify_by_email = by_email;
        self
    }

    /// Attach a comment
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Attach an external id
    #[must_use]
    pub fn api_id(mut self, api_id: impl Into<String>) -> Self {
        self.api_id = Some(api_id.into());
        self
    }
}

// ============================================================================
// Companies / services
// ============================================================================

/// Filters for listing companies
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompaniesQuery {
    /// Company network
    pub group_id: Option<u64>,
    /// Only companies open for online booking
    pub active: Option<bool>,
    /// Only moderated companies
    pub moderated: Option<bool>,
    /// Include the `next_slot` field
    pub for_booking: Option<bool>,
    /// Only companies the user manages; needs a user token
    pub my: Option<bool>,
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub count: Option<u32>,
}

/// Filters for listing services
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicesQuery {
    /// Services a staff member provides
    pub staff_id: Option<u64>,
    /// Services in a category
    pub category_id: Option<u64>,
}

// ============================================================================
// Records / comments
// ============================================================================

/// Filters for listing records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordsQuery {
    /// Page number
    pub page: Option<u32>,
    /// Page size
    pub count: Option<u32>,
    /// Staff member
    pub staff_id: Option<u64>,
    /// Client
    pub client_id: Option<u64>,
    /// Visit date from
    pub start_date: Option<NaiveDate>,
    /// Visit date to
    pub end_date: Option<NaiveDate>,
    /// Creation date from
    pub c_start_date: Option<NaiveDate>,
    /// Creation date to
    pub c_end_date: Option<NaiveDate>,
    /// Changed after
    pub changed_after: Option<DateTime<FixedOffset>>,
    /// Changed before
    pub changed_before: Option<DateTime<FixedOffset>>,
}

/// Filters for listing comments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentsQuery {
    /// From date
    pub start_date: Option<NaiveDate>,
    /// To date
    pub end_date: Option<NaiveDate>,
    /// Staff member
    pub staff_id: Option<u64>,
    /// Rating
    pub rating: Option<u8>,
}
