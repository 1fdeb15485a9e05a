//! Lock interval reconciliation.
//!
//! Converts the chronological lock/unlock stream into closed intervals
//! during which the session was inactive. Pairing uses a last-in-first-out
//! stack of pending lock instants: normal OS behavior never nests locks,
//! but duplicated or out-of-order events must not abort the run.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::evidence::{LockEvent, LockEventKind};

/// A closed period `[start, end]` during which the session was locked.
///
/// Invariant: `start <= end`. The reconciler never emits an inverted
/// interval; malformed pairs are dropped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl LockedInterval {
    /// Creates an interval, rejecting inverted bounds.
    fn spanning(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Returns true if `at` falls inside the interval (inclusive bounds).
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Pairs a chronological lock/unlock stream into locked intervals.
///
/// - A lock pushes its instant onto the pending stack.
/// - An unlock pops the most recent pending lock and emits the pair. With
///   no pending lock the unlock cannot close a known interval and is
///   dropped.
/// - Locks still pending at end of stream (screen left locked past the end
///   of the window) are closed at `window_end`: the user is conservatively
///   treated as absent for the remainder of the window.
///
/// An unavailable event source hands in an empty stream and gets zero
/// intervals back, so no evidence is filtered.
#[must_use]
pub fn reconcile(events: &[LockEvent], window_end: NaiveDateTime) -> Vec<LockedInterval> {
    let mut pending: Vec<NaiveDateTime> = Vec::new();
    let mut intervals: Vec<LockedInterval> = Vec::new();

    for event in events {
        match event.kind {
            LockEventKind::Lock => pending.push(event.at),
            LockEventKind::Unlock => {
                let Some(lock_at) = pending.pop() else {
                    tracing::debug!(at = %event.at, "dropping unlock with no pending lock");
                    continue;
                };
                match LockedInterval::spanning(lock_at, event.at) {
                    Some(interval) => intervals.push(interval),
                    None => {
                        tracing::warn!(
                            lock = %lock_at,
                            unlock = %event.at,
                            "skipping lock pair with unlock before lock"
                        );
                    }
                }
            }
        }
    }

    for lock_at in pending {
        match LockedInterval::spanning(lock_at, window_end) {
            Some(interval) => intervals.push(interval),
            None => {
                tracing::warn!(lock = %lock_at, "skipping pending lock past window end");
            }
        }
    }

    intervals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 6)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn interval(start: NaiveDateTime, end: NaiveDateTime) -> LockedInterval {
        LockedInterval::spanning(start, end).unwrap()
    }

    #[test]
    fn pairs_lock_with_following_unlock() {
        let events = [LockEvent::lock(at(10, 0)), LockEvent::unlock(at(10, 5))];
        let intervals = reconcile(&events, at(12, 0));
        assert_eq!(intervals, vec![interval(at(10, 0), at(10, 5))]);
    }

    #[test]
    fn closes_trailing_lock_at_window_end() {
        let events = [
            LockEvent::lock(at(10, 0)),
            LockEvent::unlock(at(10, 5)),
            LockEvent::lock(at(10, 10)),
        ];
        let intervals = reconcile(&events, at(12, 0));
        assert_eq!(
            intervals,
            vec![
                interval(at(10, 0), at(10, 5)),
                interval(at(10, 10), at(12, 0)),
            ]
        );
    }

    #[test]
    fn drops_unlock_without_pending_lock() {
        let events = [LockEvent::unlock(at(9, 0))];
        assert!(reconcile(&events, at(12, 0)).is_empty());
    }

    #[test]
    fn second_consecutive_unlock_is_dropped() {
        let events = [
            LockEvent::lock(at(9, 0)),
            LockEvent::unlock(at(9, 30)),
            LockEvent::unlock(at(9, 45)),
        ];
        let intervals = reconcile(&events, at(12, 0));
        // No interval is invented for the unmatched second unlock.
        assert_eq!(intervals, vec![interval(at(9, 0), at(9, 30))]);
    }

    #[test]
    fn duplicate_locks_pair_innermost_first() {
        let events = [
            LockEvent::lock(at(9, 0)),
            LockEvent::lock(at(9, 10)),
            LockEvent::unlock(at(9, 20)),
            LockEvent::unlock(at(9, 30)),
        ];
        let intervals = reconcile(&events, at(12, 0));
        assert_eq!(
            intervals,
            vec![
                interval(at(9, 10), at(9, 20)),
                interval(at(9, 0), at(9, 30)),
            ]
        );
    }

    #[test]
    fn empty_stream_yields_no_intervals() {
        assert!(reconcile(&[], at(12, 0)).is_empty());
    }

    #[test]
    fn skips_inverted_pair_and_continues() {
        // Malformed source: unlock instant precedes its paired lock.
        let events = [
            LockEvent::lock(at(11, 0)),
            LockEvent::unlock(at(10, 0)),
            LockEvent::lock(at(11, 30)),
            LockEvent::unlock(at(11, 45)),
        ];
        let intervals = reconcile(&events, at(12, 0));
        assert_eq!(intervals, vec![interval(at(11, 30), at(11, 45))]);
    }

    #[test]
    fn pending_lock_past_window_end_is_skipped() {
        let events = [LockEvent::lock(at(13, 0))];
        assert!(reconcile(&events, at(12, 0)).is_empty());
    }

    #[test]
    fn zero_length_interval_is_kept() {
        let events = [LockEvent::lock(at(9, 0)), LockEvent::unlock(at(9, 0))];
        let intervals = reconcile(&events, at(12, 0));
        assert_eq!(intervals, vec![interval(at(9, 0), at(9, 0))]);
        assert_eq!(intervals[0].duration(), Duration::zero());
    }
}
