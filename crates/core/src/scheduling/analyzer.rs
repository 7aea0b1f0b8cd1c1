//! Time-slot analysis for calendar cells
//!
//! Fast, local-only classification of a single `(date, hour, minute)` cell:
//! decides whether the cell is clickable and whether to show a soft warning.
//! Never touches the external calendar adapter, so hover/click feedback
//! stays responsive.

use chrono::{Duration, NaiveDateTime};
use praxis_domain::constants::SLOT_PROBE_MINUTES;
use praxis_domain::{Appointment, SlotAnalysis, SlotWarning, TimeInterval, WorkingHoursConfig};

use super::policy;

/// Classify one calendar cell against a local appointment snapshot and the
/// clinic working-hours configuration.
///
/// A hard overlap with an existing appointment (using the appointment's real
/// duration, not the probe width) makes the cell non-clickable with no
/// warning: double booking is never allowed, not even on "soft" slots.
/// Otherwise the cell is always clickable and at most one soft warning is
/// surfaced, with precedence non-working day > outside hours > lunch.
#[must_use]
pub fn analyze_slot(
    probe_start: NaiveDateTime,
    appointments: &[Appointment],
    config: &WorkingHoursConfig,
) -> SlotAnalysis {
    let probe = TimeInterval {
        start: probe_start,
        end: probe_start + Duration::minutes(SLOT_PROBE_MINUTES),
    };

    let hard_overlap = appointments
        .iter()
        .filter(|appointment| appointment.is_active())
        .any(|appointment| appointment.interval().overlaps(&probe));

    if hard_overlap {
        return SlotAnalysis { clickable: false, warning: None, is_optimal: false };
    }

    let warning = soft_warning(probe_start, config);
    SlotAnalysis { clickable: true, warning, is_optimal: warning.is_none() }
}

/// First soft warning that applies, in precedence order.
fn soft_warning(probe_start: NaiveDateTime, config: &WorkingHoursConfig) -> Option<SlotWarning> {
    let date = probe_start.date();
    let time = probe_start.time();

    if !policy::is_working_day(date, config) {
        Some(SlotWarning::NonWorkingDay)
    } else if !policy::is_working_hour(time, config) {
        Some(SlotWarning::OutsideHours)
    } else if policy::is_lunch_time(time, config) {
        Some(SlotWarning::LunchTime)
    } else {
        None
    }
}
