//! # Praxis Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The availability & layout engine (conflict detection, slot search,
//!   working-hours policy, collision layout)
//! - Port/adapter interfaces (traits)
//! - The availability service facade
//!
//! ## Architecture Principles
//! - Only depends on `praxis-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::ports::{
    AppointmentRepository, ExternalCalendarAdapter, IntegrationRepository, LayoutCache,
    WorkingHoursProvider,
};
pub use scheduling::{
    AvailabilityService, ConflictDetector, RequestSequencer, Sequenced, SlotFinder,
    SlotSearchOptions,
};
