//! Analysis window bounds.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for window construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WindowError {
    /// The window end preceded its start.
    #[error("window end {end} precedes start {start}")]
    EndBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// The fixed historical range one run analyzes.
///
/// Bounds are local wall-clock instants; the orchestration layer normalizes
/// collector timestamps to the local zone before hand-off. The window is
/// closed on both ends: an instant equal to `start` or `end` is in-window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl AnalysisWindow {
    /// Creates a window after validating that `end` does not precede `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if end < start {
            return Err(WindowError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds the window covering the `days` days leading up to `end`.
    ///
    /// Negative day counts are treated as zero, yielding a point window.
    #[must_use]
    pub fn ending_at(end: NaiveDateTime, days: i64) -> Self {
        Self {
            start: end - Duration::days(days.max(0)),
            end,
        }
    }

    /// Returns true if `at` falls inside the window (inclusive bounds).
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
