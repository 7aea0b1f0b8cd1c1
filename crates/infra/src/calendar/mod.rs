//! External calendar integration

pub mod adapter;

pub use adapter::{CalendarAdapterConfig, HttpCalendarAdapter};
