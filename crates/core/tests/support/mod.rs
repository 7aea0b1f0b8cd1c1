//! Shared fixtures and mocks for the scheduling engine integration tests.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

pub mod calendar;
pub mod repositories;

use chrono::{NaiveDate, NaiveDateTime};
use praxis_domain::{Appointment, AppointmentOrigin, AppointmentStatus, ExternalEvent};
use uuid::Uuid;

/// 2024-06-10, a Monday. Most scenarios run on this date.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

pub fn monday_at(hour: u32, minute: u32) -> NaiveDateTime {
    monday().and_hms_opt(hour, minute, 0).unwrap()
}

/// Active local appointment fixture.
pub fn appointment(
    professional_id: Uuid,
    start: NaiveDateTime,
    duration_minutes: u32,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        contact_id: Uuid::new_v4(),
        professional_id,
        title: Some("Routine checkup".to_string()),
        scheduled_start: start,
        duration_minutes: Some(duration_minutes),
        status: AppointmentStatus::Scheduled,
        origin: AppointmentOrigin::Local,
        external_event_id: None,
    }
}

/// External calendar event fixture.
pub fn event(id: &str, start: NaiveDateTime, end: NaiveDateTime) -> ExternalEvent {
    ExternalEvent {
        id: id.to_string(),
        title: format!("Event {id}"),
        start,
        end,
        calendar_id: "primary".to_string(),
    }
}
