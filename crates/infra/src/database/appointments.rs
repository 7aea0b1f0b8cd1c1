//! SQLite-backed implementation of the AppointmentRepository port.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use praxis_core::AppointmentRepository;
use praxis_domain::{
    Appointment, AppointmentOrigin, AppointmentStatus, PraxisError, Result,
};
use rusqlite::Row;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::pool::SqlitePool;
use crate::errors::into_domain;

/// SQLite implementation of `AppointmentRepository`.
pub struct SqliteAppointmentRepository {
    pool: Arc<SqlitePool>,
}

const SELECT_COLUMNS: &str = "id, contact_id, professional_id, title, scheduled_start_ts,
        duration_minutes, status, origin, external_event_id";

impl SqliteAppointmentRepository {
    /// Create a new appointment repository over a shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Insert an appointment snapshot; used by the surrounding CRUD layer
    /// and by tests to seed scenarios.
    pub fn insert(&self, appointment: &Appointment) -> Result<()> {
        let conn = self.pool.get().map_err(into_domain)?;
        conn.execute(
            "INSERT INTO appointments (id, contact_id, professional_id, title,
                 scheduled_start_ts, duration_minutes, status, origin, external_event_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                appointment.id.to_string(),
                appointment.contact_id.to_string(),
                appointment.professional_id.to_string(),
                appointment.title,
                to_ts(appointment.scheduled_start),
                appointment.duration_minutes,
                appointment.status.as_str(),
                appointment.origin.as_str(),
                appointment.external_event_id,
            ],
        )
        .map_err(into_domain)?;
        Ok(())
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    #[instrument(skip(self), fields(%start, %end))]
    async fn query_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>> {
        let conn = self.pool.get().map_err(into_domain)?;
        let (start_ts, end_ts) = (to_ts(start), to_ts(end));

        // Strict overlap on the derived interval; legacy NULL/0 durations
        // count as 60 minutes, matching the domain default.
        let sql = format!(
            "SELECT {SELECT_COLUMNS}
             FROM appointments
             WHERE status != 'cancelled'
               AND scheduled_start_ts < ?1
               AND scheduled_start_ts +
                   (CASE WHEN COALESCE(duration_minutes, 0) > 0
                         THEN duration_minutes ELSE 60 END) * 60 > ?2
               AND (?3 IS NULL OR professional_id = ?3)
             ORDER BY scheduled_start_ts ASC, id ASC"
        );

        let mut statement = conn.prepare(&sql).map_err(into_domain)?;
        let rows = statement
            .query_map(
                rusqlite::params![end_ts, start_ts, professional_id.map(|p| p.to_string())],
                row_to_appointment,
            )
            .map_err(into_domain)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(into_domain)?;

        debug!(found = rows.len(), "range query finished");
        Ok(rows)
    }

    #[instrument(skip(self), fields(%date))]
    async fn find_for_day(
        &self,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>> {
        let day_start = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            PraxisError::Internal(format!("invalid date {date}"))
        })?;
        let day_end = day_start + chrono::Duration::days(1);

        let conn = self.pool.get().map_err(into_domain)?;
        let sql = format!(
            "SELECT {SELECT_COLUMNS}
             FROM appointments
             WHERE status != 'cancelled'
               AND professional_id = ?1
               AND scheduled_start_ts >= ?2
               AND scheduled_start_ts < ?3
             ORDER BY scheduled_start_ts ASC, id ASC"
        );

        let mut statement = conn.prepare(&sql).map_err(into_domain)?;
        let rows = statement
            .query_map(
                rusqlite::params![professional_id.to_string(), to_ts(day_start), to_ts(day_end)],
                row_to_appointment,
            )
            .map_err(into_domain)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(into_domain)?;

        Ok(rows)
    }
}

fn row_to_appointment(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    let id: String = row.get(0)?;
    let contact_id: String = row.get(1)?;
    let professional_id: String = row.get(2)?;
    let status: String = row.get(6)?;
    let origin: String = row.get(7)?;
    let start_ts: i64 = row.get(4)?;

    Ok(Appointment {
        id: parse_uuid(&id, 0)?,
        contact_id: parse_uuid(&contact_id, 1)?,
        professional_id: parse_uuid(&professional_id, 2)?,
        title: row.get(3)?,
        scheduled_start: from_ts(start_ts, 4)?,
        duration_minutes: row.get(5)?,
        status: AppointmentStatus::from_str(&status)
            .map_err(|e| column_error(6, &e.to_string()))?,
        origin: AppointmentOrigin::from_str(&origin)
            .map_err(|e| column_error(7, &e.to_string()))?,
        external_event_id: row.get(8)?,
    })
}

fn parse_uuid(value: &str, column: usize) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| column_error(column, &e.to_string()))
}

fn from_ts(ts: i64, column: usize) -> rusqlite::Result<NaiveDateTime> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| column_error(column, "timestamp out of range"))
}

/// Clinic-local naive datetimes are persisted as epoch seconds.
pub(crate) fn to_ts(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp()
}

fn column_error(column: usize, message: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        message.to_string().into(),
    )
}
