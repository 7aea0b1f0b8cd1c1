//! HTTP external-calendar adapter
//!
//! Fetches events from a Google-style calendar API with a bounded request
//! timeout and a short TTL event cache. Failures are reported distinctly
//! from empty results; the conflict detector decides how to degrade.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime};
use moka::sync::Cache;
use praxis_core::ExternalCalendarAdapter;
use praxis_domain::constants::{
    DEFAULT_EVENT_CACHE_CAPACITY, DEFAULT_EVENT_CACHE_TTL_SECS,
    DEFAULT_EXTERNAL_FETCH_TIMEOUT_MS,
};
use praxis_domain::{CalendarIntegration, ExternalEvent, PraxisError, Result};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::errors::into_domain;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3/";

/// Adapter configuration with env-overridable cache and timeout settings.
#[derive(Debug, Clone)]
pub struct CalendarAdapterConfig {
    /// Provider API base; must end with a trailing slash.
    pub base_url: Url,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Events are never cached beyond this TTL.
    pub event_cache_ttl: Duration,
    pub event_cache_capacity: u64,
}

impl Default for CalendarAdapterConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).unwrap_or_else(|_| {
                // The literal above is a valid URL; this branch is unreachable.
                unreachable!("default calendar API base must parse")
            }),
            request_timeout: Duration::from_millis(
                env_override("PRAXIS_CALENDAR_TIMEOUT_MS", DEFAULT_EXTERNAL_FETCH_TIMEOUT_MS),
            ),
            event_cache_ttl: Duration::from_secs(env_override(
                "PRAXIS_EVENT_CACHE_TTL_SECS",
                DEFAULT_EVENT_CACHE_TTL_SECS,
            )),
            event_cache_capacity: env_override(
                "PRAXIS_EVENT_CACHE_CAPACITY",
                DEFAULT_EVENT_CACHE_CAPACITY,
            ),
        }
    }
}

impl CalendarAdapterConfig {
    /// Config pointed at a different API base (wiremock in tests, or a
    /// proxy in front of the provider).
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Log configuration at startup.
    pub fn log_config(&self) {
        tracing::info!(
            base_url = %self.base_url,
            timeout_ms = u64::try_from(self.request_timeout.as_millis()).unwrap_or(u64::MAX),
            cache_ttl_secs = self.event_cache_ttl.as_secs(),
            cache_capacity = self.event_cache_capacity,
            "calendar adapter configuration loaded"
        );
    }
}

fn env_override(name: &str, default: u64) -> u64 {
    std::env::var(name).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// HTTP implementation of `ExternalCalendarAdapter`.
pub struct HttpCalendarAdapter {
    client: reqwest::Client,
    config: CalendarAdapterConfig,
    /// Events keyed by `(integration, range)`; advisory and TTL-bounded.
    events_cache: Cache<(Uuid, i64, i64), Arc<Vec<ExternalEvent>>>,
}

impl HttpCalendarAdapter {
    /// Build an adapter with its own HTTP client and event cache.
    pub fn new(config: CalendarAdapterConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(into_domain)?;
        let events_cache = Cache::builder()
            .max_capacity(config.event_cache_capacity)
            .time_to_live(config.event_cache_ttl)
            .build();
        Ok(Self { client, config, events_cache })
    }

    async fn fetch(
        &self,
        integration: &CalendarIntegration,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExternalEvent>> {
        let token = integration
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                PraxisError::Config(format!(
                    "integration {} has no access token",
                    integration.id
                ))
            })?;

        let url = self
            .config
            .base_url
            .join(&format!("calendars/{}/events", integration.calendar_id))
            .map_err(|e| PraxisError::Config(format!("invalid calendar URL: {e}")))?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("timeMin", format_rfc3339(start)),
                ("timeMax", format_rfc3339(end)),
                ("singleEvents", "true".to_string()),
            ])
            .send()
            .await
            .map_err(into_domain)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            return Err(PraxisError::Network(format!(
                "calendar API error ({status}): {body}"
            )));
        }

        let payload: ProviderEventsResponse = response
            .json()
            .await
            .map_err(|e| PraxisError::Network(format!("unparsable calendar response: {e}")))?;

        let events = payload
            .items
            .into_iter()
            .filter_map(|item| raw_to_event(item, &integration.calendar_id))
            .collect();
        Ok(events)
    }
}

#[async_trait]
impl ExternalCalendarAdapter for HttpCalendarAdapter {
    #[instrument(skip(self), fields(integration_id = %integration.id, %start, %end))]
    async fn list_events(
        &self,
        integration: &CalendarIntegration,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ExternalEvent>> {
        let key = (integration.id, start.and_utc().timestamp(), end.and_utc().timestamp());
        if let Some(cached) = self.events_cache.get(&key) {
            debug!("events served from TTL cache");
            return Ok((*cached).clone());
        }

        let events = self.fetch(integration, start, end).await?;
        self.events_cache.insert(key, Arc::new(events.clone()));
        Ok(events)
    }
}

#[derive(Debug, Deserialize)]
struct ProviderEventsResponse {
    #[serde(default)]
    items: Vec<ProviderEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderEvent {
    id: String,
    summary: Option<String>,
    start: ProviderEventTime,
    end: ProviderEventTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderEventTime {
    date_time: Option<String>,
    /// All-day events carry a bare date instead of a datetime.
    date: Option<String>,
}

/// Map one provider event to the domain shape, dropping (with a warning)
/// anything whose timestamps cannot be parsed.
fn raw_to_event(item: ProviderEvent, calendar_id: &str) -> Option<ExternalEvent> {
    let start = parse_event_time(&item.start);
    let end = parse_event_time(&item.end);
    match (start, end) {
        (Some(start), Some(end)) if end > start => Some(ExternalEvent {
            title: item
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "Busy".to_string()),
            id: item.id,
            start,
            end,
            calendar_id: calendar_id.to_string(),
        }),
        _ => {
            warn!(event_id = %item.id, "dropping event with unparsable or inverted times");
            None
        }
    }
}

fn parse_event_time(time: &ProviderEventTime) -> Option<NaiveDateTime> {
    if let Some(date_time) = &time.date_time {
        // The provider reports clinic-local offsets; keep the local wall
        // clock reading.
        return DateTime::parse_from_rfc3339(date_time).ok().map(|dt| dt.naive_local());
    }
    let date = time.date.as_deref()?;
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?.and_hms_opt(0, 0, 0)
}

fn format_rfc3339(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
