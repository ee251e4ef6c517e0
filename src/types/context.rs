//! Per-run temporal context.

use chrono::{Datelike, NaiveDate, Utc};

/// Immutable snapshot of "now", threaded through prompts for temporal
/// grounding.
///
/// Created once per pipeline invocation and never mutated, so every
/// prompt in a run sees the same date even if the run crosses midnight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Calendar date as an ISO-8601 string (e.g., "2026-08-30").
    pub today: String,

    /// Current year.
    pub current_year: i32,
}

impl RunContext {
    /// Create a context for the current UTC date.
    pub fn now() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    /// Create a context for a specific date (useful in tests).
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            today: date.format("%Y-%m-%d").to_string(),
            current_year: date.year(),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::now()
    }
}
