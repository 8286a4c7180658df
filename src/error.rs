//! Error types for Cyclesense
//!
//! Sparse data is never an error: statistical degeneracy (zero or one
//! recorded intervals) surfaces as `None` fields or empty collections.
//! Only structural caller misuse raises.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised at the engine boundary
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid interval: end date {end} precedes start date {start}")]
    InvalidInterval { start: NaiveDate, end: NaiveDate },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
