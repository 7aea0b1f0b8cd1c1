//! SQLite-backed implementation of the WorkingHoursProvider port.
//!
//! Fail-open by contract: a missing row, a missing field, or an unparsable
//! value degrades to the permissive default rather than blocking booking.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveTime, Weekday};
use praxis_core::WorkingHoursProvider;
use praxis_domain::{Result, WorkingHoursConfig};
use rusqlite::OptionalExtension;
use tracing::{instrument, warn};
use uuid::Uuid;

use super::pool::SqlitePool;
use crate::errors::into_domain;

/// SQLite implementation of `WorkingHoursProvider`.
pub struct SqliteWorkingHoursProvider {
    pool: Arc<SqlitePool>,
}

/// Raw settings row before lenient parsing.
struct SettingsRow {
    working_days: Option<String>,
    work_start: Option<String>,
    work_end: Option<String>,
    lunch_start: Option<String>,
    lunch_end: Option<String>,
    has_lunch_break: bool,
}

impl SqliteWorkingHoursProvider {
    /// Create a new working-hours provider over a shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Upsert a clinic's settings row; used by the surrounding settings
    /// layer and by tests to seed scenarios.
    pub fn upsert(&self, clinic_id: Uuid, config: &WorkingHoursConfig) -> Result<()> {
        let conn = self.pool.get().map_err(into_domain)?;
        let working_days = config.working_days.as_ref().map(|days| {
            let mut names: Vec<&str> = days.iter().map(weekday_name).collect();
            names.sort_unstable();
            names.join(",")
        });
        conn.execute(
            "INSERT INTO clinic_settings
                 (clinic_id, working_days, work_start, work_end,
                  lunch_start, lunch_end, has_lunch_break)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(clinic_id) DO UPDATE SET
                 working_days = excluded.working_days,
                 work_start = excluded.work_start,
                 work_end = excluded.work_end,
                 lunch_start = excluded.lunch_start,
                 lunch_end = excluded.lunch_end,
                 has_lunch_break = excluded.has_lunch_break",
            rusqlite::params![
                clinic_id.to_string(),
                working_days,
                config.work_start.map(|t| t.format("%H:%M").to_string()),
                config.work_end.map(|t| t.format("%H:%M").to_string()),
                config.lunch_start.map(|t| t.format("%H:%M").to_string()),
                config.lunch_end.map(|t| t.format("%H:%M").to_string()),
                config.has_lunch_break,
            ],
        )
        .map_err(into_domain)?;
        Ok(())
    }
}

#[async_trait]
impl WorkingHoursProvider for SqliteWorkingHoursProvider {
    #[instrument(skip(self), fields(%clinic_id))]
    async fn get(&self, clinic_id: Uuid) -> Result<WorkingHoursConfig> {
        let conn = self.pool.get().map_err(into_domain)?;
        let row = conn
            .query_row(
                "SELECT working_days, work_start, work_end, lunch_start, lunch_end,
                        has_lunch_break
                 FROM clinic_settings
                 WHERE clinic_id = ?1",
                rusqlite::params![clinic_id.to_string()],
                |row| {
                    Ok(SettingsRow {
                        working_days: row.get(0)?,
                        work_start: row.get(1)?,
                        work_end: row.get(2)?,
                        lunch_start: row.get(3)?,
                        lunch_end: row.get(4)?,
                        has_lunch_break: row.get(5)?,
                    })
                },
            )
            .optional()
            .map_err(into_domain)?;

        Ok(row.map_or_else(WorkingHoursConfig::default, |row| lenient_config(clinic_id, &row)))
    }
}

/// Parse a settings row, dropping (not failing on) anything unparsable.
fn lenient_config(clinic_id: Uuid, row: &SettingsRow) -> WorkingHoursConfig {
    WorkingHoursConfig {
        working_days: row.working_days.as_deref().and_then(|v| parse_days(clinic_id, v)),
        work_start: parse_time(clinic_id, row.work_start.as_deref()),
        work_end: parse_time(clinic_id, row.work_end.as_deref()),
        lunch_start: parse_time(clinic_id, row.lunch_start.as_deref()),
        lunch_end: parse_time(clinic_id, row.lunch_end.as_deref()),
        has_lunch_break: row.has_lunch_break,
    }
}

fn parse_days(clinic_id: Uuid, value: &str) -> Option<HashSet<Weekday>> {
    let mut days = HashSet::new();
    for token in value.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match weekday_from_name(token) {
            Some(day) => {
                days.insert(day);
            }
            None => {
                warn!(%clinic_id, token, "unparsable working day; treating set as absent");
                return None;
            }
        }
    }
    if days.is_empty() {
        None
    } else {
        Some(days)
    }
}

fn parse_time(clinic_id: Uuid, value: Option<&str>) -> Option<NaiveTime> {
    let value = value?;
    match NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(time) => Some(time),
        Err(_) => {
            warn!(%clinic_id, value, "unparsable time in clinic settings; treating as absent");
            None
        }
    }
}

const fn weekday_name(day: &Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}
