//! Application constants
//!
//! Centralized location for all domain-level constants used by the
//! scheduling engine.

// Appointment defaults
/// Duration assumed for legacy records stored without an explicit duration.
pub const DEFAULT_APPOINTMENT_DURATION_MINUTES: u32 = 60;

// Slot analysis / search configuration
pub const SLOT_PROBE_MINUTES: i64 = 15;
pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 30;
pub const DEFAULT_SLOT_CAP: usize = 6;
pub const DEFAULT_SEARCH_WINDOW_START: (u32, u32) = (8, 0);
pub const DEFAULT_SEARCH_WINDOW_END: (u32, u32) = (18, 0);

// Day layout configuration
/// Margin (in percent of the day column) between adjacent lanes so that
/// simultaneous appointments render with a visible seam.
pub const LANE_GAP_PERCENT: f64 = 0.5;

// Cache configuration defaults (overridable via environment, see infra)
pub const DEFAULT_LAYOUT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_LAYOUT_CACHE_CAPACITY: u64 = 64;
pub const DEFAULT_EVENT_CACHE_TTL_SECS: u64 = 60;
pub const DEFAULT_EVENT_CACHE_CAPACITY: u64 = 256;

// External calendar fetch configuration
pub const DEFAULT_EXTERNAL_FETCH_TIMEOUT_MS: u64 = 3_000;
