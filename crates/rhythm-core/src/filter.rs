//! Locked-period removal from the evidence pool.

use chrono::NaiveDateTime;

use crate::reconcile::LockedInterval;
use crate::window::AnalysisWindow;

/// Returns the pool timestamps that survive filtering, sorted ascending.
///
/// A timestamp is removed if it falls outside the window (collectors are
/// expected to pre-filter, but the pool re-checks) or inside any locked
/// interval `[a, b]`, bounds inclusive on both sides. Intervals are few in
/// practice, so each timestamp is checked with a linear scan.
#[must_use]
pub fn filter_timeline(
    timestamps: &[NaiveDateTime],
    window: AnalysisWindow,
    locked: &[LockedInterval],
) -> Vec<NaiveDateTime> {
    let mut timeline: Vec<NaiveDateTime> = timestamps
        .iter()
        .copied()
        .filter(|&at| window.contains(at))
        .filter(|&at| !locked.iter().any(|interval| interval.contains(at)))
        .collect();
    timeline.sort_unstable();
    timeline
}
