//! Consecutive active-date streak detection.

use chrono::NaiveDate;

use crate::weekday::DaySpan;

/// Distinct calendar dates with surviving activity, ascending.
#[must_use]
pub fn active_dates(spans: &[DaySpan]) -> Vec<NaiveDate> {
    // One span per date, already sorted.
    spans.iter().map(|span| span.date).collect()
}

/// Length of the longest run of consecutive calendar dates.
///
/// Expects a sorted, deduplicated date list. A single isolated date counts
/// as a streak of one; an empty list yields zero.
#[must_use]
pub fn longest_streak(dates: &[NaiveDate]) -> usize {
    let mut longest = 0usize;
    let mut run = 0usize;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous {
            Some(prev) if prev.succ_opt() == Some(date) => run + 1,
            Some(prev) if prev == date => run, // duplicate, defensive only
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}
