//! External calendar types
//!
//! Events sourced from a third-party calendar provider. These are read-only
//! and ephemeral; they are never persisted beyond a bounded-TTL cache.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::appointment::TimeInterval;

/// Event fetched from an external calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub calendar_id: String,
}

impl ExternalEvent {
    /// Strict overlap against a candidate interval (same semantics as
    /// appointment overlap).
    #[must_use]
    pub fn overlaps(&self, interval: &TimeInterval) -> bool {
        interval.start < self.end && self.start < interval.end
    }
}

/// A professional's connection to one external calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarIntegration {
    pub id: Uuid,
    pub professional_id: Uuid,
    /// Provider identifier ("google", "microsoft", ...).
    pub provider: String,
    pub calendar_id: String,
    pub sync_enabled: bool,
    pub access_token: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl CalendarIntegration {
    /// Whether this integration participates in conflict detection.
    ///
    /// The stricter of the two historical lookups is canonical: sync must be
    /// enabled AND a token must be present.
    #[must_use]
    pub fn is_syncable(&self) -> bool {
        self.sync_enabled && self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}
