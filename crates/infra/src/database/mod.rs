//! Database implementations

pub mod appointments;
pub mod integrations;
pub mod pool;
pub mod settings;

pub use appointments::SqliteAppointmentRepository;
pub use integrations::SqliteIntegrationRepository;
pub use pool::{open_in_memory_pool, open_pool, SqlitePool};
pub use settings::SqliteWorkingHoursProvider;
