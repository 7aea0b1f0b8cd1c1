//! Conflict detection against local appointments and external calendars
//!
//! Precedence is deliberate and fixed: local data is authoritative and is
//! checked first; it can short-circuit before any external fetch begins.
//! Among external sources, integrations are consulted in creation order and
//! the first definitive conflict wins. A failing or timed-out integration
//! contributes "no conflict from this source" - one broken calendar
//! connection must never make the clinic appear fully booked.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use praxis_domain::constants::DEFAULT_EXTERNAL_FETCH_TIMEOUT_MS;
use praxis_domain::{
    Appointment, CalendarIntegration, ConflictDetails, ConflictResult, ExternalEvent, Result,
    TimeInterval,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::ports::{AppointmentRepository, ExternalCalendarAdapter, IntegrationRepository};

/// Detects whether a candidate interval collides with existing bookings or
/// externally-synced calendar events.
pub struct ConflictDetector {
    appointments: Arc<dyn AppointmentRepository>,
    integrations: Arc<dyn IntegrationRepository>,
    calendar: Arc<dyn ExternalCalendarAdapter>,
    external_timeout: Duration,
    require_professional: bool,
}

impl ConflictDetector {
    /// Create a detector over the given collaborators.
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        integrations: Arc<dyn IntegrationRepository>,
        calendar: Arc<dyn ExternalCalendarAdapter>,
    ) -> Self {
        Self {
            appointments,
            integrations,
            calendar,
            external_timeout: Duration::from_millis(DEFAULT_EXTERNAL_FETCH_TIMEOUT_MS),
            require_professional: true,
        }
    }

    /// Override the per-integration fetch timeout.
    #[must_use]
    pub const fn with_external_timeout(mut self, timeout: Duration) -> Self {
        self.external_timeout = timeout;
        self
    }

    /// Configure whether a missing professional id blocks the check.
    ///
    /// Booking workflows require one (availability is meaningless without
    /// knowing whose calendar to check); some read-only callers do not.
    #[must_use]
    pub const fn with_required_professional(mut self, required: bool) -> Self {
        self.require_professional = required;
        self
    }

    /// Check a candidate interval for conflicts.
    ///
    /// `exclude_appointment_id` removes one local appointment from
    /// consideration, used when re-checking an appointment being edited
    /// against itself.
    ///
    /// Business outcomes are always typed results; the only `Err` paths are
    /// repository failures. External adapter failures are recovered here.
    #[instrument(skip(self), fields(start = %interval.start, end = %interval.end))]
    pub async fn check(
        &self,
        interval: &TimeInterval,
        professional_id: Option<Uuid>,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<ConflictResult> {
        let Some(professional_id) = professional_id else {
            if self.require_professional {
                debug!("conflict check without professional selection");
                return Ok(ConflictResult::NoProfessionalSelected);
            }
            return self.check_local_only(interval, exclude_appointment_id).await;
        };

        let overlapping = self
            .appointments
            .query_range(interval.start, interval.end, Some(professional_id))
            .await?;

        // Local data is authoritative: first match in ascending-start order
        // wins and no external fetch happens.
        if let Some(conflict) = first_local_conflict(&overlapping, interval, exclude_appointment_id)
        {
            return Ok(ConflictResult::Appointment(conflict));
        }

        // External event ids already mirrored as local appointments must not
        // be reported twice. The excluded appointment's mirror id stays in
        // the set: while editing a mirror, its source event is not a
        // separate conflict.
        let mirrored: HashSet<&str> =
            overlapping.iter().filter_map(|a| a.external_event_id.as_deref()).collect();

        let integrations = self.integrations.syncable_for_professional(professional_id).await?;
        if integrations.is_empty() {
            return Ok(ConflictResult::None);
        }

        Ok(self.first_external_conflict(&integrations, interval, &mirrored).await)
    }

    /// Degenerate check used when no professional is required: local
    /// appointments across all professionals, no external sources.
    async fn check_local_only(
        &self,
        interval: &TimeInterval,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<ConflictResult> {
        let overlapping =
            self.appointments.query_range(interval.start, interval.end, None).await?;
        Ok(first_local_conflict(&overlapping, interval, exclude_appointment_id)
            .map_or(ConflictResult::None, ConflictResult::Appointment))
    }

    /// Fan out event fetches to every syncable integration, then aggregate
    /// in integration creation order (then event start) so the result is
    /// deterministic regardless of completion order.
    async fn first_external_conflict(
        &self,
        integrations: &[CalendarIntegration],
        interval: &TimeInterval,
        mirrored: &HashSet<&str>,
    ) -> ConflictResult {
        let fetches = integrations.iter().map(|integration| async move {
            self.fetch_events(integration, interval).await
        });
        let per_integration: Vec<Option<Vec<ExternalEvent>>> = join_all(fetches).await;

        for events in per_integration.into_iter().flatten() {
            let mut events = events;
            events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

            for event in events {
                if mirrored.contains(event.id.as_str()) {
                    debug!(event_id = %event.id, "skipping event mirrored as local appointment");
                    continue;
                }
                if event.overlaps(interval) {
                    return ConflictResult::External(ConflictDetails {
                        source_id: event.id,
                        title: event.title,
                        start: event.start,
                        end: event.end,
                    });
                }
            }
        }

        ConflictResult::None
    }

    /// Fetch one integration's events with a bounded timeout. Failures are
    /// logged and degrade to "no conflict from this source".
    async fn fetch_events(
        &self,
        integration: &CalendarIntegration,
        interval: &TimeInterval,
    ) -> Option<Vec<ExternalEvent>> {
        let fetch = self.calendar.list_events(integration, interval.start, interval.end);
        match tokio::time::timeout(self.external_timeout, fetch).await {
            Ok(Ok(events)) => Some(events),
            Ok(Err(error)) => {
                warn!(
                    integration_id = %integration.id,
                    provider = %integration.provider,
                    %error,
                    "external calendar fetch failed; source excluded from conflict check"
                );
                None
            }
            Err(_) => {
                warn!(
                    integration_id = %integration.id,
                    provider = %integration.provider,
                    timeout_ms = u64::try_from(self.external_timeout.as_millis())
                        .unwrap_or(u64::MAX),
                    "external calendar fetch timed out; source excluded from conflict check"
                );
                None
            }
        }
    }
}

/// First overlapping active local appointment in ascending-start order,
/// skipping the excluded id.
fn first_local_conflict(
    overlapping: &[Appointment],
    interval: &TimeInterval,
    exclude_appointment_id: Option<Uuid>,
) -> Option<ConflictDetails> {
    let mut candidates: Vec<&Appointment> = overlapping
        .iter()
        .filter(|a| a.is_active())
        .filter(|a| Some(a.id) != exclude_appointment_id)
        .filter(|a| a.interval().overlaps(interval))
        .collect();
    candidates.sort_by_key(|a| (a.scheduled_start, a.id));

    candidates.first().map(|appointment| {
        let extent = appointment.interval();
        ConflictDetails {
            source_id: appointment.id.to_string(),
            title: appointment
                .title
                .clone()
                .unwrap_or_else(|| "Existing appointment".to_string()),
            start: extent.start,
            end: extent.end,
        }
    })
}
