//! Calendar day-layout types
//!
//! A layout is a pure, deterministic function of a day's appointment set.
//! It carries no lifecycle of its own and is safe to discard and recompute
//! at any time; the cache in front of it is advisory only.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rendering lane for one appointment within its collision group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAssignment {
    /// Lane width as a percentage of the day column.
    pub width_percent: f64,
    /// Left offset as a percentage of the day column.
    pub left_percent: f64,
    /// Discovery index of the collision group, used only for z-ordering.
    pub group: usize,
}

impl LayoutAssignment {
    /// Full-width lane for an appointment with no collisions.
    #[must_use]
    pub const fn full_width(group: usize) -> Self {
        Self { width_percent: 100.0, left_percent: 0.0, group }
    }
}

/// Complete lane layout for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLayout {
    pub date: NaiveDate,
    /// Fingerprint of the appointment set this layout was computed from.
    pub fingerprint: u64,
    pub assignments: BTreeMap<Uuid, LayoutAssignment>,
}

impl DayLayout {
    /// Empty layout for a day with no appointments.
    #[must_use]
    pub fn empty(date: NaiveDate, fingerprint: u64) -> Self {
        Self { date, fingerprint, assignments: BTreeMap::new() }
    }
}
