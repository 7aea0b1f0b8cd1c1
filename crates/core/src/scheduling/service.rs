//! Availability service facade
//!
//! The entry point the UI/API layer consumes in-process: availability
//! checks, slot search, per-cell slot analysis and day layout, plus the
//! request sequencing used to discard stale responses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use praxis_domain::{
    Appointment, AvailabilityReport, DayLayout, PraxisError, Result, SlotAnalysis, SlotSuggestion,
    TimeInterval, WorkingHoursConfig,
};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use super::analyzer;
use super::conflict::ConflictDetector;
use super::layout;
use super::ports::{
    AppointmentRepository, ExternalCalendarAdapter, IntegrationRepository, LayoutCache,
    WorkingHoursProvider,
};
use super::slots::{SlotFinder, SlotSearchOptions};

/// A response paired with the request sequence number it answers.
///
/// Callers compare against their latest issued number and drop anything
/// out of order; see [`RequestSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequenced<T> {
    pub seq: u64,
    pub value: T,
}

/// Monotonic sequence numbers for in-flight availability requests.
///
/// A caller may abandon a check (the user changed the date again); the
/// engine must not let a stale result overwrite a newer one. Requests take
/// a number from [`Self::begin`]; a result is applied only if
/// [`Self::try_apply`] accepts its number. Lock-free; duplicate concurrent
/// computation is tolerated, only the newest result wins.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next request number.
    pub fn begin(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Accept `seq` if no newer result has been applied yet.
    ///
    /// Returns false for stale (out-of-order) results, which the caller
    /// must discard.
    pub fn try_apply(&self, seq: u64) -> bool {
        let mut current = self.applied.load(Ordering::Acquire);
        loop {
            if seq <= current {
                return false;
            }
            match self.applied.compare_exchange_weak(
                current,
                seq,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }
}

/// Facade over the scheduling engine for the surrounding application.
pub struct AvailabilityService {
    detector: Arc<ConflictDetector>,
    finder: SlotFinder,
    appointments: Arc<dyn AppointmentRepository>,
    working_hours: Arc<dyn WorkingHoursProvider>,
    layout_cache: Option<Arc<dyn LayoutCache>>,
    slot_options: SlotSearchOptions,
}

impl AvailabilityService {
    /// Wire the service over its collaborators.
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        integrations: Arc<dyn IntegrationRepository>,
        calendar: Arc<dyn ExternalCalendarAdapter>,
        working_hours: Arc<dyn WorkingHoursProvider>,
    ) -> Self {
        let detector = Arc::new(ConflictDetector::new(
            Arc::clone(&appointments),
            integrations,
            calendar,
        ));
        let finder = SlotFinder::new(Arc::clone(&detector));
        Self {
            detector,
            finder,
            appointments,
            working_hours,
            layout_cache: None,
            slot_options: SlotSearchOptions::default(),
        }
    }

    /// Attach an advisory layout cache.
    #[must_use]
    pub fn with_layout_cache(mut self, cache: Arc<dyn LayoutCache>) -> Self {
        self.layout_cache = Some(cache);
        self
    }

    /// Override the default slot search options.
    #[must_use]
    pub const fn with_slot_options(mut self, options: SlotSearchOptions) -> Self {
        self.slot_options = options;
        self
    }

    /// Check whether `[start, end)` is bookable for a professional.
    ///
    /// `end <= start` is rejected before any lookup. Business outcomes
    /// (conflict, missing professional) come back inside the report, never
    /// as errors.
    #[instrument(skip(self))]
    pub async fn check_availability(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        professional_id: Option<Uuid>,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<AvailabilityReport> {
        let interval = TimeInterval::new(start, end)?;
        let result = self.detector.check(&interval, professional_id, exclude_appointment_id).await?;
        Ok(AvailabilityReport::from(result))
    }

    /// Sequenced variant of [`Self::check_availability`] for callers that
    /// race requests; pair with a [`RequestSequencer`] to drop stale
    /// responses.
    pub async fn check_availability_sequenced(
        &self,
        seq: u64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        professional_id: Option<Uuid>,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<Sequenced<AvailabilityReport>> {
        let report =
            self.check_availability(start, end, professional_id, exclude_appointment_id).await?;
        Ok(Sequenced { seq, value: report })
    }

    /// Ranked open slots on `date` for an appointment of `duration_minutes`.
    pub async fn find_available_slots(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        professional_id: Uuid,
    ) -> Result<Vec<SlotSuggestion>> {
        self.finder.find_slots(date, duration_minutes, professional_id, self.slot_options).await
    }

    /// Local-only classification of one calendar cell.
    ///
    /// Never consults the external adapter; uses the professional's local
    /// appointments for the day plus the clinic working-hours policy.
    #[instrument(skip(self))]
    pub async fn analyze_slot(
        &self,
        date: NaiveDate,
        hour: u32,
        minute: u32,
        professional_id: Uuid,
        clinic_id: Uuid,
    ) -> Result<SlotAnalysis> {
        let probe_start = date.and_hms_opt(hour, minute, 0).ok_or_else(|| {
            PraxisError::InvalidInterval(format!("invalid cell time {hour:02}:{minute:02}"))
        })?;

        let config = self.working_hours_or_default(clinic_id).await;
        let day_appointments = self.appointments.find_for_day(date, professional_id).await?;

        Ok(analyzer::analyze_slot(probe_start, &day_appointments, &config))
    }

    /// Lane layout for every appointment on `date`, cache-aware.
    ///
    /// The cache is advisory: a miss recomputes, and callers must invalidate
    /// nothing - a changed appointment set changes the fingerprint and
    /// naturally misses.
    #[must_use]
    pub fn compute_day_layout(&self, date: NaiveDate, appointments: &[Appointment]) -> DayLayout {
        let fingerprint = layout::fingerprint(date, appointments);

        if let Some(cache) = &self.layout_cache {
            if let Some(cached) = cache.get(date, fingerprint) {
                debug!(%date, fingerprint, "day layout served from cache");
                return cached;
            }
        }

        let computed = layout::compute_layout(date, appointments);
        if let Some(cache) = &self.layout_cache {
            cache.insert(computed.clone());
        }
        computed
    }

    /// Working-hours configuration, degraded to the permissive default when
    /// the provider fails. Missing configuration must never block booking.
    async fn working_hours_or_default(&self, clinic_id: Uuid) -> WorkingHoursConfig {
        match self.working_hours.get(clinic_id).await {
            Ok(config) => config,
            Err(error) => {
                warn!(%clinic_id, %error, "working hours unavailable; using permissive default");
                WorkingHoursConfig::default()
            }
        }
    }
}
