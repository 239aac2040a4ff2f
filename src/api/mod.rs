//! Endpoint catalog
//!
//! `YclientsClient` wraps the request executor with one method per API
//! endpoint. Each method builds a `RequestSpec` (path, parameters, auth mode)
//! and hands it to [`YclientsClient::request`].
//!
//! | Area          | Module          |
//! |---------------|-----------------|
//! | Online booking| `booking`       |
//! | Auth, user records | `user`     |
//! | Companies     | `companies`     |
//! | Services, events | `services`   |
//! | Staff         | `staff`         |
//! | Clients       | `clients`       |
//! | Records       | `records`       |
//! | Schedules, timetable | `schedule` |
//! | Comments, SMS, hooks | `notifications` |

mod booking;
mod client;
mod clients;
mod companies;
mod notifications;
mod records;
mod schedule;
mod services;
mod staff;
mod types;
mod user;

pub use client::YclientsClient;
pub use types::{
    Appointment, BookRecord, BookingClient, BookingQuery, CommentsQuery, CompaniesQuery,
    RecordsQuery, ServicesQuery,
};

#[cfg(test)]
mod tests;
