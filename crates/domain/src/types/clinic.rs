//! Clinic configuration types

use std::collections::HashSet;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Clinic working-hours configuration.
///
/// Every field is optional and absence means "permissive": all days working,
/// any hour inside bounds, no lunch block. Stale or missing configuration
/// must never make the clinic appear unbookable, so the policy built on top
/// of this is fail-open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHoursConfig {
    /// Days the clinic is open. `None` means every day is a working day.
    pub working_days: Option<HashSet<Weekday>>,
    pub work_start: Option<NaiveTime>,
    pub work_end: Option<NaiveTime>,
    pub lunch_start: Option<NaiveTime>,
    pub lunch_end: Option<NaiveTime>,
    /// Lunch warnings are only computed when this is set, regardless of the
    /// lunch window fields.
    pub has_lunch_break: bool,
}

impl WorkingHoursConfig {
    /// Weekday working configuration with a lunch break, the shape most
    /// clinics start from.
    #[must_use]
    pub fn weekdays_with_lunch(
        work_start: NaiveTime,
        work_end: NaiveTime,
        lunch_start: NaiveTime,
        lunch_end: NaiveTime,
    ) -> Self {
        let days = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        Self {
            working_days: Some(days.into_iter().collect()),
            work_start: Some(work_start),
            work_end: Some(work_end),
            lunch_start: Some(lunch_start),
            lunch_end: Some(lunch_end),
            has_lunch_break: true,
        }
    }
}
