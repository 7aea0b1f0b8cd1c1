//! SQLite-backed implementation of the IntegrationRepository port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use praxis_core::IntegrationRepository;
use praxis_domain::{CalendarIntegration, Result};
use rusqlite::Row;
use tracing::instrument;
use uuid::Uuid;

use super::pool::SqlitePool;
use crate::errors::into_domain;

/// SQLite implementation of `IntegrationRepository`.
///
/// The canonical lookup is the strict one: only connections with sync
/// enabled AND a stored access token participate in conflict detection.
pub struct SqliteIntegrationRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteIntegrationRepository {
    /// Create a new integration repository over a shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Insert an integration row; used by the surrounding settings layer
    /// and by tests to seed scenarios.
    pub fn insert(&self, integration: &CalendarIntegration) -> Result<()> {
        let conn = self.pool.get().map_err(into_domain)?;
        conn.execute(
            "INSERT INTO calendar_integrations
                 (id, professional_id, provider, calendar_id, sync_enabled,
                  access_token, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                integration.id.to_string(),
                integration.professional_id.to_string(),
                integration.provider,
                integration.calendar_id,
                integration.sync_enabled,
                integration.access_token,
                integration.created_at.timestamp(),
            ],
        )
        .map_err(into_domain)?;
        Ok(())
    }
}

#[async_trait]
impl IntegrationRepository for SqliteIntegrationRepository {
    #[instrument(skip(self), fields(%professional_id))]
    async fn syncable_for_professional(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<CalendarIntegration>> {
        let conn = self.pool.get().map_err(into_domain)?;
        let mut statement = conn
            .prepare(
                "SELECT id, professional_id, provider, calendar_id, sync_enabled,
                        access_token, created_at
                 FROM calendar_integrations
                 WHERE professional_id = ?1
                   AND sync_enabled = 1
                   AND access_token IS NOT NULL
                   AND access_token != ''
                 ORDER BY created_at ASC, id ASC",
            )
            .map_err(into_domain)?;

        let rows = statement
            .query_map(rusqlite::params![professional_id.to_string()], row_to_integration)
            .map_err(into_domain)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(into_domain)?;

        Ok(rows)
    }
}

fn row_to_integration(row: &Row<'_>) -> rusqlite::Result<CalendarIntegration> {
    let id: String = row.get(0)?;
    let professional_id: String = row.get(1)?;
    let created_ts: i64 = row.get(6)?;

    let created_at = DateTime::from_timestamp(created_ts, 0).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            rusqlite::types::Type::Integer,
            "timestamp out of range".to_string().into(),
        )
    })?;

    Ok(CalendarIntegration {
        id: parse_uuid(&id, 0)?,
        professional_id: parse_uuid(&professional_id, 1)?,
        provider: row.get(2)?,
        calendar_id: row.get(3)?,
        sync_enabled: row.get(4)?,
        access_token: row.get(5)?,
        created_at,
    })
}

fn parse_uuid(value: &str, column: usize) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Text,
            e.to_string().into(),
        )
    })
}
