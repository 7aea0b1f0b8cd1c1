//! # Praxis Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite)
//! - The HTTP external-calendar adapter
//! - TTL-bounded advisory caches (day layout, calendar events)
//!
//! ## Architecture
//! - Implements traits defined in `praxis-core`
//! - Depends on `praxis-domain` and `praxis-core`
//! - Contains all "impure" code (I/O, HTTP, caching)

pub mod cache;
pub mod calendar;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use cache::{LayoutCacheConfig, MokaLayoutCache};
pub use calendar::{CalendarAdapterConfig, HttpCalendarAdapter};
pub use database::{
    open_in_memory_pool, open_pool, SqliteAppointmentRepository, SqliteIntegrationRepository,
    SqliteWorkingHoursProvider, SqlitePool,
};
pub use errors::InfraError;
