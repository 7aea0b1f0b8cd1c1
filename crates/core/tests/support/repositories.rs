//! Mock repository implementations for testing
//!
//! In-memory mocks for the scheduling ports, enabling deterministic unit
//! tests without database dependencies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use praxis_core::{AppointmentRepository, IntegrationRepository, WorkingHoursProvider};
use praxis_domain::{
    Appointment, CalendarIntegration, PraxisError, Result as DomainResult, TimeInterval,
    WorkingHoursConfig,
};
use uuid::Uuid;

/// In-memory mock for `AppointmentRepository`.
///
/// Stores a fixed set of appointments, applies the same active/overlap
/// semantics the SQL implementation promises, and counts queries so tests
/// can assert on short-circuit behavior.
#[derive(Default, Clone)]
pub struct MockAppointmentRepository {
    appointments: Arc<Mutex<Vec<Appointment>>>,
    query_calls: Arc<AtomicUsize>,
}

impl MockAppointmentRepository {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self { appointments: Arc::new(Mutex::new(appointments)), query_calls: Arc::default() }
    }

    /// Convenience helper for adding a single appointment to the mock.
    pub fn with_appointment(self, appointment: Appointment) -> Self {
        self.appointments.lock().unwrap().push(appointment);
        self
    }

    /// Number of `query_range` calls observed so far.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AppointmentRepository for MockAppointmentRepository {
    async fn query_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        professional_id: Option<Uuid>,
    ) -> DomainResult<Vec<Appointment>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        let window = TimeInterval::new(start, end)?;

        let mut matches: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| professional_id.map_or(true, |p| a.professional_id == p))
            .filter(|a| a.interval().overlaps(&window))
            .cloned()
            .collect();
        matches.sort_by_key(|a| (a.scheduled_start, a.id));
        Ok(matches)
    }

    async fn find_for_day(
        &self,
        date: NaiveDate,
        professional_id: Uuid,
    ) -> DomainResult<Vec<Appointment>> {
        let mut matches: Vec<Appointment> = self
            .appointments
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| a.professional_id == professional_id)
            .filter(|a| a.scheduled_start.date() == date)
            .cloned()
            .collect();
        matches.sort_by_key(|a| (a.scheduled_start, a.id));
        Ok(matches)
    }
}

/// In-memory mock for `IntegrationRepository`.
#[derive(Default, Clone)]
pub struct MockIntegrationRepository {
    integrations: Arc<Mutex<Vec<CalendarIntegration>>>,
}

impl MockIntegrationRepository {
    pub fn new(integrations: Vec<CalendarIntegration>) -> Self {
        Self { integrations: Arc::new(Mutex::new(integrations)) }
    }

    pub fn with_integration(self, integration: CalendarIntegration) -> Self {
        self.integrations.lock().unwrap().push(integration);
        self
    }
}

#[async_trait]
impl IntegrationRepository for MockIntegrationRepository {
    async fn syncable_for_professional(
        &self,
        professional_id: Uuid,
    ) -> DomainResult<Vec<CalendarIntegration>> {
        let mut matches: Vec<CalendarIntegration> = self
            .integrations
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.professional_id == professional_id)
            .filter(|i| i.is_syncable())
            .cloned()
            .collect();
        matches.sort_by_key(|i| (i.created_at, i.id));
        Ok(matches)
    }
}

/// In-memory mock for `WorkingHoursProvider`.
#[derive(Default, Clone)]
pub struct MockWorkingHoursProvider {
    config: WorkingHoursConfig,
    failing: bool,
}

impl MockWorkingHoursProvider {
    pub fn new(config: WorkingHoursConfig) -> Self {
        Self { config, failing: false }
    }

    /// A provider whose backing store is down; the service must degrade to
    /// the permissive default.
    pub fn failing() -> Self {
        Self { config: WorkingHoursConfig::default(), failing: true }
    }
}

#[async_trait]
impl WorkingHoursProvider for MockWorkingHoursProvider {
    async fn get(&self, _clinic_id: Uuid) -> DomainResult<WorkingHoursConfig> {
        if self.failing {
            return Err(PraxisError::Database("settings store unavailable".to_string()));
        }
        Ok(self.config.clone())
    }
}
