//! Mock external calendar adapter for testing
//!
//! Configurable per-integration event sets, failure injection and
//! artificial latency, plus a call counter so tests can assert that the
//! local short-circuit really avoids external traffic.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use praxis_core::ExternalCalendarAdapter;
use praxis_domain::{CalendarIntegration, ExternalEvent, PraxisError, Result as DomainResult};
use uuid::Uuid;

/// In-memory mock for `ExternalCalendarAdapter`.
#[derive(Default, Clone)]
pub struct MockCalendarAdapter {
    events: Arc<Mutex<HashMap<Uuid, Vec<ExternalEvent>>>>,
    failing: Arc<Mutex<HashSet<Uuid>>>,
    latency: Arc<Mutex<HashMap<Uuid, Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl MockCalendarAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed events for one integration.
    pub fn with_events(self, integration_id: Uuid, events: Vec<ExternalEvent>) -> Self {
        self.events.lock().unwrap().insert(integration_id, events);
        self
    }

    /// Make one integration's fetch fail with a network error.
    pub fn with_failure(self, integration_id: Uuid) -> Self {
        self.failing.lock().unwrap().insert(integration_id);
        self
    }

    /// Delay one integration's fetch, for timeout tests.
    pub fn with_latency(self, integration_id: Uuid, latency: Duration) -> Self {
        self.latency.lock().unwrap().insert(integration_id, latency);
        self
    }

    /// Number of `list_events` calls observed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExternalCalendarAdapter for MockCalendarAdapter {
    async fn list_events(
        &self,
        integration: &CalendarIntegration,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<Vec<ExternalEvent>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let latency = self.latency.lock().unwrap().get(&integration.id).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.failing.lock().unwrap().contains(&integration.id) {
            return Err(PraxisError::Network("calendar provider returned 503".to_string()));
        }

        Ok(self
            .events
            .lock()
            .unwrap()
            .get(&integration.id)
            .map(|events| {
                events
                    .iter()
                    .filter(|event| event.start < end && start < event.end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Syncable integration fixture with a controllable creation time offset so
/// tests can pin iteration order.
pub fn integration(professional_id: Uuid, created_offset_secs: i64) -> CalendarIntegration {
    CalendarIntegration {
        id: Uuid::new_v4(),
        professional_id,
        provider: "google".to_string(),
        calendar_id: "primary".to_string(),
        sync_enabled: true,
        access_token: Some("token".to_string()),
        created_at: chrono::DateTime::from_timestamp(1_700_000_000 + created_offset_secs, 0)
            .unwrap(),
    }
}
