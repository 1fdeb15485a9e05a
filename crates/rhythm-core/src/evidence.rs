//! Evidence hand-off types from collectors.
//!
//! Collectors run outside this crate (filesystem scans, event-log queries,
//! browser history, task-scheduler entries). Whatever their source, their
//! output converges here: anonymous activity instants in a shared pool,
//! plus the chronological lock/unlock stream for the same window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Which side of a session lock transition an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockEventKind {
    Lock,
    Unlock,
}

/// A session lock-state transition observed by the event-log collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub kind: LockEventKind,
    pub at: NaiveDateTime,
}

impl LockEvent {
    #[must_use]
    pub const fn lock(at: NaiveDateTime) -> Self {
        Self {
            kind: LockEventKind::Lock,
            at,
        }
    }

    #[must_use]
    pub const fn unlock(at: NaiveDateTime) -> Self {
        Self {
            kind: LockEventKind::Unlock,
            at,
        }
    }
}

/// All evidence for one run, assembled by the orchestration layer and
/// passed by value into [`crate::analyze`].
///
/// The timestamp pool is append-only and source-agnostic: once an instant
/// is recorded, nothing downstream distinguishes where it came from.
/// Duplicates and out-of-window values are permitted; the pipeline filters
/// defensively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceBatch {
    timestamps: Vec<NaiveDateTime>,
    lock_events: Vec<LockEvent>,
}

impl EvidenceBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observed activity instant to the pool.
    pub fn record(&mut self, at: NaiveDateTime) {
        self.timestamps.push(at);
    }

    /// Adds a collector's worth of activity instants to the pool.
    pub fn record_all<I: IntoIterator<Item = NaiveDateTime>>(&mut self, timestamps: I) {
        self.timestamps.extend(timestamps);
    }

    /// Replaces the lock-event stream.
    ///
    /// Events must be sorted ascending by instant; unsorted input violates
    /// the collector contract and is not repaired here.
    pub fn set_lock_events(&mut self, events: Vec<LockEvent>) {
        self.lock_events = events;
    }

    #[must_use]
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    #[must_use]
    pub fn lock_events(&self) -> &[LockEvent] {
        &self.lock_events
    }

    /// Returns true if no activity instants have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
}
