//! Appointment availability & layout engine
//!
//! The scheduling core: working-hours policy, conflict detection across
//! local appointments and external calendars, open-slot search, per-cell
//! slot analysis, and the collision lane layout for the calendar grid.

pub mod analyzer;
pub mod conflict;
pub mod layout;
pub mod policy;
pub mod ports;
pub mod service;
pub mod slots;

pub use conflict::ConflictDetector;
pub use service::{AvailabilityService, RequestSequencer, Sequenced};
pub use slots::{SlotFinder, SlotSearchOptions};
