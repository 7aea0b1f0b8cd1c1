//! SQLite connection pooling and schema bootstrap

use std::path::Path;
use std::sync::Arc;

use praxis_domain::Result;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::info;

use crate::errors::into_domain;

/// Shared r2d2 pool over rusqlite connections.
pub type SqlitePool = r2d2::Pool<SqliteConnectionManager>;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS appointments (
    id                  TEXT PRIMARY KEY,
    contact_id          TEXT NOT NULL,
    professional_id     TEXT NOT NULL,
    title               TEXT,
    scheduled_start_ts  INTEGER NOT NULL,
    duration_minutes    INTEGER,
    status              TEXT NOT NULL DEFAULT 'scheduled',
    origin              TEXT NOT NULL DEFAULT 'local',
    external_event_id   TEXT
);

CREATE INDEX IF NOT EXISTS idx_appointments_professional_start
    ON appointments (professional_id, scheduled_start_ts);

CREATE TABLE IF NOT EXISTS calendar_integrations (
    id               TEXT PRIMARY KEY,
    professional_id  TEXT NOT NULL,
    provider         TEXT NOT NULL,
    calendar_id      TEXT NOT NULL,
    sync_enabled     INTEGER NOT NULL DEFAULT 0,
    access_token     TEXT,
    created_at       INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_integrations_professional
    ON calendar_integrations (professional_id, created_at);

CREATE TABLE IF NOT EXISTS clinic_settings (
    clinic_id        TEXT PRIMARY KEY,
    working_days     TEXT,
    work_start       TEXT,
    work_end         TEXT,
    lunch_start      TEXT,
    lunch_end        TEXT,
    has_lunch_break  INTEGER NOT NULL DEFAULT 0
);
";

/// Open a file-backed pool and ensure the schema exists.
pub fn open_pool(path: &Path) -> Result<Arc<SqlitePool>> {
    let manager = SqliteConnectionManager::file(path);
    let pool = r2d2::Pool::new(manager).map_err(into_domain)?;
    bootstrap(&pool)?;
    info!(path = %path.display(), "scheduling database opened");
    Ok(Arc::new(pool))
}

/// Open an in-memory pool, used by tests.
///
/// Capped at a single connection so every caller sees the same in-memory
/// database.
pub fn open_in_memory_pool() -> Result<Arc<SqlitePool>> {
    let manager = SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(into_domain)?;
    bootstrap(&pool)?;
    Ok(Arc::new(pool))
}

fn bootstrap(pool: &SqlitePool) -> Result<()> {
    let conn = pool.get().map_err(into_domain)?;
    apply_schema(&conn)
}

fn apply_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).map_err(into_domain)
}
