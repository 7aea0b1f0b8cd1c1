//! # Praxis Domain
//!
//! Business domain types and models for the Praxis scheduling engine.
//!
//! This crate contains:
//! - Domain data types (Appointment, TimeInterval, WorkingHoursConfig, ...)
//! - Domain error types and Result definitions
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Praxis crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{PraxisError, Result};
pub use types::{
    Appointment, AppointmentOrigin, AppointmentStatus, AvailabilityReport, CalendarIntegration,
    ConflictDetails, ConflictResult, ConflictType, DayLayout, ExternalEvent, LayoutAssignment,
    SlotAnalysis, SlotSuggestion, SlotWarning, TimeInterval, WorkingHoursConfig,
};
