//! Domain types and models

pub mod appointment;
pub mod availability;
pub mod calendar;
pub mod clinic;
pub mod layout;

pub use appointment::{Appointment, AppointmentOrigin, AppointmentStatus, TimeInterval};
pub use availability::{
    AvailabilityReport, ConflictDetails, ConflictResult, ConflictType, SlotAnalysis,
    SlotSuggestion, SlotWarning,
};
pub use calendar::{CalendarIntegration, ExternalEvent};
pub use clinic::WorkingHoursConfig;
pub use layout::{DayLayout, LayoutAssignment};
