//! Availability and slot-analysis result types
//!
//! These are the UI-facing shapes: a conflict always carries enough detail
//! (title, start, end, source) to explain itself without a follow-up query.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Detail payload attached to a detected conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetails {
    /// Id of the conflicting appointment or external event.
    pub source_id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Outcome of a conflict check.
///
/// `NoProfessionalSelected` is a blocking pseudo-conflict, not an error: the
/// UI renders it exactly like a real conflict (blocks submission, explains
/// why).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConflictResult {
    None,
    Appointment(ConflictDetails),
    External(ConflictDetails),
    NoProfessionalSelected,
}

impl ConflictResult {
    /// Whether this outcome blocks booking.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Source classification of a conflict, for UI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConflictType {
    Appointment,
    External,
    NoProfessional,
}

/// UI-facing projection of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflict: bool,
    pub conflict_type: Option<ConflictType>,
    pub conflict_details: Option<ConflictDetails>,
}

impl From<ConflictResult> for AvailabilityReport {
    fn from(result: ConflictResult) -> Self {
        match result {
            ConflictResult::None => Self {
                available: true,
                conflict: false,
                conflict_type: None,
                conflict_details: None,
            },
            ConflictResult::Appointment(details) => Self {
                available: false,
                conflict: true,
                conflict_type: Some(ConflictType::Appointment),
                conflict_details: Some(details),
            },
            ConflictResult::External(details) => Self {
                available: false,
                conflict: true,
                conflict_type: Some(ConflictType::External),
                conflict_details: Some(details),
            },
            ConflictResult::NoProfessionalSelected => Self {
                available: false,
                conflict: true,
                conflict_type: Some(ConflictType::NoProfessional),
                conflict_details: None,
            },
        }
    }
}

/// One candidate start time produced by the slot search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSuggestion {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub start: NaiveDateTime,
}

/// Soft warning classes for a calendar cell, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotWarning {
    NonWorkingDay,
    OutsideHours,
    LunchTime,
}

/// Fast local-only classification of a single calendar cell.
///
/// Soft warnings never block booking; a hard overlap with an existing
/// appointment is the only thing that makes a cell non-clickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAnalysis {
    pub clickable: bool,
    pub warning: Option<SlotWarning>,
    pub is_optimal: bool,
}
