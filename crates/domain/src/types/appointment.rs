//! Appointment types
//!
//! Snapshot types read by the scheduling engine. Persistence is owned by the
//! surrounding application; the engine only ever sees copies.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DEFAULT_APPOINTMENT_DURATION_MINUTES;
use crate::errors::{PraxisError, Result};

/// Half-open time interval `[start, end)` in clinic-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeInterval {
    /// Create a validated interval.
    ///
    /// `end <= start` is a programmer error and is rejected before any
    /// lookup happens downstream.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(PraxisError::InvalidInterval(format!(
                "end ({end}) must be after start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Derive an interval from a start instant and a duration in minutes.
    pub fn from_start_duration(start: NaiveDateTime, duration_minutes: u32) -> Result<Self> {
        Self::new(start, start + Duration::minutes(i64::from(duration_minutes)))
    }

    /// Strict overlap test: back-to-back intervals (one's end equals the
    /// other's start) do NOT overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the interval in whole minutes.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Whether this appointment still blocks its time slot.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Stable string form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = PraxisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            other => Err(PraxisError::Internal(format!("unknown appointment status: {other}"))),
        }
    }
}

/// Where an appointment originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentOrigin {
    /// Booked directly in the clinic application.
    Local,
    /// Mirrored from an external calendar during sync.
    External,
}

impl AppointmentOrigin {
    /// Stable string form used for storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::External => "external",
        }
    }
}

impl std::str::FromStr for AppointmentOrigin {
    type Err = PraxisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "external" => Ok(Self::External),
            other => Err(PraxisError::Internal(format!("unknown appointment origin: {other}"))),
        }
    }
}

/// Appointment snapshot as read from the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub contact_id: Uuid,
    pub professional_id: Uuid,
    /// Display label, denormalized from the contact by the data layer.
    pub title: Option<String>,
    pub scheduled_start: NaiveDateTime,
    /// Absent for legacy records; treated as 60 minutes, never an error.
    pub duration_minutes: Option<u32>,
    pub status: AppointmentStatus,
    pub origin: AppointmentOrigin,
    /// Id of the external calendar event this appointment mirrors, if any.
    pub external_event_id: Option<String>,
}

impl Appointment {
    /// Duration in minutes, applying the legacy default when the stored
    /// value is absent or zero.
    #[must_use]
    pub fn effective_duration_minutes(&self) -> u32 {
        match self.duration_minutes {
            Some(d) if d > 0 => d,
            _ => DEFAULT_APPOINTMENT_DURATION_MINUTES,
        }
    }

    /// The blocking extent of this appointment.
    #[must_use]
    pub fn interval(&self) -> TimeInterval {
        let minutes = i64::from(self.effective_duration_minutes());
        TimeInterval {
            start: self.scheduled_start,
            end: self.scheduled_start + Duration::minutes(minutes),
        }
    }

    /// Whether this appointment still blocks its time slot.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
