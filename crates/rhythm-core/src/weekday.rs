//! Per-weekday behavioral statistics.
//!
//! Grouping is sort-based throughout: the filtered timeline arrives sorted,
//! so equal calendar dates form contiguous runs and no hashing is needed.
//! That keeps iteration order stable and reruns bit-identical.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Earliest and latest surviving activity on one calendar date.
///
/// A date with a single timestamp has `start == end` and duration zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySpan {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DaySpan {
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Partitions a sorted timeline into one span per active date.
///
/// Output is sorted by date with no duplicates, since equal dates are
/// contiguous in the input.
#[must_use]
pub fn day_spans(timeline: &[NaiveDateTime]) -> Vec<DaySpan> {
    let mut spans: Vec<DaySpan> = Vec::new();
    for &at in timeline {
        match spans.last_mut() {
            Some(span) if span.date == at.date() => span.end = at,
            _ => spans.push(DaySpan {
                date: at.date(),
                start: at,
                end: at,
            }),
        }
    }
    spans
}

/// Aggregate behavior for one weekday across the analysis window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayStats {
    pub weekday: Weekday,
    /// Mean of the per-date session durations. Single-timestamp dates
    /// contribute zero and pull the mean down; no minimum is substituted.
    pub average_duration: Duration,
    /// Linear mean of start-of-day times as seconds since local midnight.
    /// Sessions straddling midnight average toward noon, not midnight;
    /// known limitation, kept as-is.
    pub average_start: NaiveTime,
    /// Linear mean of end-of-day times, same caveat as `average_start`.
    pub average_end: NaiveTime,
    /// Number of distinct dates contributing to the averages.
    pub active_dates: usize,
}

/// Computes statistics for every weekday with at least one active date.
///
/// Weekdays without activity are omitted entirely. Output is ordered
/// Monday through Sunday regardless of input order.
#[must_use]
pub fn aggregate_weekdays(spans: &[DaySpan]) -> Vec<WeekdayStats> {
    // Fixed buckets indexed by days-from-Monday; deterministic order for free.
    let mut buckets: [Vec<&DaySpan>; 7] = Default::default();
    for span in spans {
        buckets[span.date.weekday().num_days_from_monday() as usize].push(span);
    }

    buckets
        .iter()
        .filter(|bucket| !bucket.is_empty())
        .map(|bucket| aggregate_bucket(bucket))
        .collect()
}

/// Reduces one weekday's spans to its statistic.
fn aggregate_bucket(bucket: &[&DaySpan]) -> WeekdayStats {
    let count = bucket.len() as i64;
    let duration_secs: i64 = bucket.iter().map(|s| s.duration().num_seconds()).sum();
    let start_secs: i64 = bucket
        .iter()
        .map(|s| i64::from(s.start.time().num_seconds_from_midnight()))
        .sum();
    let end_secs: i64 = bucket
        .iter()
        .map(|s| i64::from(s.end.time().num_seconds_from_midnight()))
        .sum();

    WeekdayStats {
        weekday: bucket[0].date.weekday(),
        average_duration: Duration::seconds(duration_secs / count),
        average_start: time_of_day(start_secs / count),
        average_end: time_of_day(end_secs / count),
        active_dates: bucket.len(),
    }
}

/// Converts mean seconds-since-midnight back to a wall-clock time.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn time_of_day(secs: i64) -> NaiveTime {
    // A mean of in-day values stays in [0, 86400).
    NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, 0)
        .expect("mean of seconds-since-midnight is always within one day")
}
