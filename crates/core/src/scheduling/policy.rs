//! Working-hours policy predicates
//!
//! Pure functions over `(date|time, WorkingHoursConfig)`. Every input
//! produces a boolean; there is no I/O and no failure path. Absent
//! configuration is permissive (fail-open): stale or missing settings must
//! not make the clinic appear unbookable.

use chrono::{Datelike, NaiveDate, NaiveTime};
use praxis_domain::WorkingHoursConfig;

/// True when the date's weekday is a configured working day.
///
/// An absent `working_days` set means every day is a working day.
#[must_use]
pub fn is_working_day(date: NaiveDate, config: &WorkingHoursConfig) -> bool {
    config.working_days.as_ref().map_or(true, |days| days.contains(&date.weekday()))
}

/// True when `time` falls inside the configured open hours.
///
/// Both bounds are inclusive; an absent bound is permissive.
#[must_use]
pub fn is_working_hour(time: NaiveTime, config: &WorkingHoursConfig) -> bool {
    let after_open = config.work_start.map_or(true, |start| time >= start);
    let before_close = config.work_end.map_or(true, |end| time <= end);
    after_open && before_close
}

/// True when `time` falls inside the lunch window.
///
/// Unconditionally false when `has_lunch_break` is off. The window is
/// half-open: the minute equal to `lunch_end` is NOT lunch.
#[must_use]
pub fn is_lunch_time(time: NaiveTime, config: &WorkingHoursConfig) -> bool {
    if !config.has_lunch_break {
        return false;
    }
    match (config.lunch_start, config.lunch_end) {
        (Some(start), Some(end)) => time >= start && time < end,
        _ => false,
    }
}
