//! Pipeline entry point and summary reduction.

use chrono::{Duration, NaiveDateTime};

use crate::evidence::EvidenceBatch;
use crate::filter::filter_timeline;
use crate::reconcile::reconcile;
use crate::streak::{active_dates, longest_streak};
use crate::weekday::{WeekdayStats, aggregate_weekdays, day_spans};
use crate::window::AnalysisWindow;

/// The consolidated behavioral profile for one analysis window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityProfile {
    pub window: AnalysisWindow,
    /// Earliest surviving activity instant in the window.
    pub overall_start: NaiveDateTime,
    /// Latest surviving activity instant in the window.
    pub overall_end: NaiveDateTime,
    /// Distinct active dates across the whole window.
    pub total_active_days: usize,
    /// Longest run of consecutive active calendar dates.
    pub max_consecutive_active_days: usize,
    /// Per-weekday statistics, Monday through Sunday; weekdays with no
    /// active dates are absent.
    pub weekdays: Vec<WeekdayStats>,
    /// Mean of the per-weekday average durations, over the weekdays
    /// present in `weekdays` only.
    pub overall_average_duration: Duration,
}

/// Runs the full consolidation pipeline over one evidence batch.
///
/// Reconciles the lock stream into locked intervals, removes locked-period
/// timestamps from the pool, then derives weekday statistics, the streak,
/// and the overall summary from the surviving timeline. Each stage is a
/// pure function over in-memory data; identical inputs produce identical
/// profiles.
///
/// Returns `None` when no timestamp survives filtering. That is the normal
/// "no activity in range" terminal outcome, not a failure.
#[must_use]
pub fn analyze(batch: &EvidenceBatch, window: AnalysisWindow) -> Option<ActivityProfile> {
    let locked = reconcile(batch.lock_events(), window.end);
    tracing::debug!(
        pool = batch.len(),
        locked_intervals = locked.len(),
        "reconciled lock stream"
    );

    let timeline = filter_timeline(batch.timestamps(), window, &locked);
    let (&overall_start, &overall_end) = (timeline.first()?, timeline.last()?);

    let spans = day_spans(&timeline);
    let dates = active_dates(&spans);
    let weekdays = aggregate_weekdays(&spans);
    let overall_average_duration = mean_weekday_duration(&weekdays);

    Some(ActivityProfile {
        window,
        overall_start,
        overall_end,
        total_active_days: dates.len(),
        max_consecutive_active_days: longest_streak(&dates),
        weekdays,
        overall_average_duration,
    })
}

/// Mean of the per-weekday average durations.
///
/// Weekdays without active dates never reach the stats list, so they are
/// excluded from this mean rather than counted as zero.
fn mean_weekday_duration(weekdays: &[WeekdayStats]) -> Duration {
    if weekdays.is_empty() {
        return Duration::zero();
    }
    let total: i64 = weekdays
        .iter()
        .map(|w| w.average_duration.num_seconds())
        .sum();
    Duration::seconds(total / weekdays.len() as i64)
}
