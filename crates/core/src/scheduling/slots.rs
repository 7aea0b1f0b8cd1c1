//! Open-slot search
//!
//! Enumerates candidate start times across a day at a fixed granularity and
//! filters them through the conflict detector, producing a short ranked list
//! of suggestions. Deterministic for a fixed snapshot and strictly ordered
//! by time ascending.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use praxis_domain::constants::{
    DEFAULT_SEARCH_WINDOW_END, DEFAULT_SEARCH_WINDOW_START, DEFAULT_SLOT_CAP,
    DEFAULT_SLOT_GRANULARITY_MINUTES,
};
use praxis_domain::{ConflictResult, PraxisError, Result, SlotSuggestion, TimeInterval};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::conflict::ConflictDetector;

/// Tuning knobs for a slot search.
#[derive(Debug, Clone, Copy)]
pub struct SlotSearchOptions {
    /// Step between candidate start times.
    pub granularity_minutes: u32,
    /// First candidate start time (inclusive).
    pub window_start: NaiveTime,
    /// End of the candidate window (exclusive).
    pub window_end: NaiveTime,
    /// Stop after this many free slots have been found.
    pub cap: usize,
}

impl Default for SlotSearchOptions {
    fn default() -> Self {
        let (start_h, start_m) = DEFAULT_SEARCH_WINDOW_START;
        let (end_h, end_m) = DEFAULT_SEARCH_WINDOW_END;
        Self {
            granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            window_start: NaiveTime::from_hms_opt(start_h, start_m, 0).unwrap_or(NaiveTime::MIN),
            window_end: NaiveTime::from_hms_opt(end_h, end_m, 0).unwrap_or(NaiveTime::MIN),
            cap: DEFAULT_SLOT_CAP,
        }
    }
}

/// Searches a day for bookable start times.
pub struct SlotFinder {
    detector: Arc<ConflictDetector>,
}

impl SlotFinder {
    /// Create a finder backed by the given conflict detector.
    pub fn new(detector: Arc<ConflictDetector>) -> Self {
        Self { detector }
    }

    /// Find up to `options.cap` free start times on `date` for an
    /// appointment of `duration_minutes`, in ascending time order.
    ///
    /// Evaluation short-circuits: once the cap is reached no later slot is
    /// checked, so no unnecessary repository or calendar traffic happens.
    #[instrument(skip(self), fields(%date, duration_minutes))]
    pub async fn find_slots(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        professional_id: Uuid,
        options: SlotSearchOptions,
    ) -> Result<Vec<SlotSuggestion>> {
        if duration_minutes == 0 {
            return Err(PraxisError::InvalidInterval(
                "slot search requires a positive duration".to_string(),
            ));
        }
        if options.granularity_minutes == 0 {
            return Err(PraxisError::InvalidInterval(
                "slot search requires a positive granularity".to_string(),
            ));
        }

        let step = Duration::minutes(i64::from(options.granularity_minutes));
        let mut suggestions = Vec::with_capacity(options.cap);
        let mut cursor = options.window_start;

        while cursor < options.window_end && suggestions.len() < options.cap {
            let start = date.and_time(cursor);
            let candidate = TimeInterval::from_start_duration(start, duration_minutes)?;

            if self.detector.check(&candidate, Some(professional_id), None).await?
                == ConflictResult::None
            {
                suggestions.push(SlotSuggestion { date, time: cursor, start });
            }

            // NaiveTime arithmetic wraps at midnight; detect the wrap and
            // stop instead of looping forever.
            let next = cursor + step;
            if next <= cursor {
                break;
            }
            cursor = next;
        }

        debug!(found = suggestions.len(), cap = options.cap, "slot search finished");
        Ok(suggestions)
    }
}
