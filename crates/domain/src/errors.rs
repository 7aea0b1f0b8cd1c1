//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Praxis
///
/// Business outcomes (a conflict, no conflict, missing professional) are
/// never errors; they are modeled as typed results on the scheduling side.
/// Only malformed input and infrastructure failures surface here.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum PraxisError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Praxis operations
pub type Result<T> = std::result::Result<T, PraxisError>;
