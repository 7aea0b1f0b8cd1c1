//! Port interfaces for the scheduling engine
//!
//! All I/O the engine needs goes through these traits; implementations live
//! in `praxis-infra`. The engine itself stays pure and testable.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use praxis_domain::{
    Appointment, CalendarIntegration, DayLayout, ExternalEvent, Result, WorkingHoursConfig,
};
use uuid::Uuid;

/// Read access to locally stored appointments.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// All **active** (non-cancelled) appointments overlapping
    /// `[start, end)`, optionally restricted to one professional, ordered by
    /// `scheduled_start` ascending (id ascending as tie-break).
    ///
    /// Exclusion of the appointment being edited is the caller's concern;
    /// the repository always returns the full overlapping set so mirrored
    /// external events can still be recognized.
    async fn query_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        professional_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>>;

    /// All active appointments scheduled on `date` for one professional,
    /// ordered by `scheduled_start` ascending.
    async fn find_for_day(&self, date: NaiveDate, professional_id: Uuid)
        -> Result<Vec<Appointment>>;
}

/// Lookup of a professional's external calendar connections.
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// Integrations eligible for conflict detection: sync enabled AND an
    /// access token present, ordered by creation time ascending.
    async fn syncable_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<CalendarIntegration>>;
}

/// Client for an external calendar provider.
///
/// A failure must be reported distinctly from an empty result; the conflict
/// detector recovers from failures but must never mistake one for "free".
#[async_trait]
pub trait ExternalCalendarAdapter: Send + Sync {
    /// Events overlapping `[start, end)` on the integration's calendar.
    async fn list_events(
        &self,
        integration: &CalendarIntegration,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExternalEvent>>;
}

/// Source of the clinic working-hours configuration.
///
/// May return partial configuration; a missing row yields the permissive
/// default. This provider is fail-open by contract.
#[async_trait]
pub trait WorkingHoursProvider: Send + Sync {
    async fn get(&self, clinic_id: Uuid) -> Result<WorkingHoursConfig>;
}

/// Advisory cache for computed day layouts.
///
/// Implementations must be safe under concurrent reads and writes without
/// caller-side locking and must expire entries rather than grow unbounded.
/// A miss is never an error; recomputation is always safe.
pub trait LayoutCache: Send + Sync {
    fn get(&self, date: NaiveDate, fingerprint: u64) -> Option<DayLayout>;
    fn insert(&self, layout: DayLayout);
}
