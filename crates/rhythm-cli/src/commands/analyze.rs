//! Report generation for the analyze command.
//!
//! Runs the consolidation pipeline and renders the result either as a
//! human-readable working-hours report or as JSON.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Timelike, Utc, Weekday};
use serde::Serialize;

use rhythm_core::{ActivityProfile, AnalysisWindow, WeekdayStats};

use crate::commands::util;
use crate::config::Config;
use crate::evidence;

/// Everything the formatters need for one run.
#[derive(Debug)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub window: AnalysisWindow,
    pub timezone: String,
    /// `None` is the completed "no activity in range" outcome.
    pub profile: Option<ActivityProfile>,
}

// ========== Formatting Helpers ==========

/// Formats a duration as "Xh Ym" if >= 1 hour, "Xm" otherwise.
/// Negative durations are treated as 0m (defensive).
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Formats a time of day truncated to the minute.
pub fn format_hhmm(time: NaiveTime) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

/// Full weekday name for report rows.
const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Formats the window bounds for the report header.
fn format_window(window: &AnalysisWindow) -> String {
    let (start, end) = (window.start.date(), window.end.date());
    if start.year() == end.year() {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    } else {
        format!(
            "{} – {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )
    }
}

// ========== Human-Readable Report ==========

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(
        output,
        "WORKING HOURS: {} ({})",
        format_window(&data.window),
        data.timezone
    )
    .unwrap();

    let Some(profile) = &data.profile else {
        writeln!(output).unwrap();
        writeln!(output, "No activity in range.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'rhythm inspect' to check collector output.").unwrap();
        return output;
    };

    writeln!(output).unwrap();
    writeln!(output, "BY WEEKDAY").unwrap();
    writeln!(output, "──────────").unwrap();
    for stats in &profile.weekdays {
        writeln!(
            output,
            "{:<10} {} – {}  {:>6} avg  ({} active)",
            weekday_name(stats.weekday),
            format_hhmm(stats.average_start),
            format_hhmm(stats.average_end),
            format_duration(stats.average_duration),
            stats.active_dates
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(
        output,
        "First activity:  {}",
        profile.overall_start.format("%Y-%m-%d %H:%M")
    )
    .unwrap();
    writeln!(
        output,
        "Last activity:   {}",
        profile.overall_end.format("%Y-%m-%d %H:%M")
    )
    .unwrap();
    writeln!(output, "Active days:     {}", profile.total_active_days).unwrap();
    let streak = profile.max_consecutive_active_days;
    let day_word = if streak == 1 { "day" } else { "days" };
    writeln!(output, "Longest streak:  {streak} consecutive {day_word}").unwrap();
    writeln!(
        output,
        "Average day:     {}",
        format_duration(profile.overall_average_duration)
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: String,
    pub timezone: String,
    pub window: JsonWindow,
    pub overall_start: Option<String>,
    pub overall_end: Option<String>,
    pub total_active_days: usize,
    pub max_consecutive_active_days: usize,
    pub per_weekday: Vec<JsonWeekday>,
    pub overall_average_duration_minutes: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonWindow {
    pub start: String,
    pub end: String,
    pub days: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonWeekday {
    pub weekday: String,
    pub average_duration_minutes: f64,
    pub average_start: String,
    pub average_end: String,
    pub active_date_count: usize,
}

#[allow(clippy::cast_precision_loss)]
fn duration_minutes(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / 60.0
}

fn json_weekday(stats: &WeekdayStats) -> JsonWeekday {
    JsonWeekday {
        weekday: weekday_name(stats.weekday).to_ascii_lowercase(),
        average_duration_minutes: duration_minutes(stats.average_duration),
        average_start: format_hhmm(stats.average_start),
        average_end: format_hhmm(stats.average_end),
        active_date_count: stats.active_dates,
    }
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let instant = |at: chrono::NaiveDateTime| at.format("%Y-%m-%dT%H:%M:%S").to_string();

    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339(),
        timezone: data.timezone.clone(),
        window: JsonWindow {
            start: instant(data.window.start),
            end: instant(data.window.end),
            days: (data.window.end - data.window.start).num_days(),
        },
        overall_start: data.profile.as_ref().map(|p| instant(p.overall_start)),
        overall_end: data.profile.as_ref().map(|p| instant(p.overall_end)),
        total_active_days: data
            .profile
            .as_ref()
            .map_or(0, |p| p.total_active_days),
        max_consecutive_active_days: data
            .profile
            .as_ref()
            .map_or(0, |p| p.max_consecutive_active_days),
        per_weekday: data
            .profile
            .as_ref()
            .map_or_else(Vec::new, |p| p.weekdays.iter().map(json_weekday).collect()),
        overall_average_duration_minutes: data
            .profile
            .as_ref()
            .map_or(0.0, |p| duration_minutes(p.overall_average_duration)),
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the analyze command.
pub fn run(
    files: &[PathBuf],
    days: Option<i64>,
    end: Option<&str>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let window = util::resolve_window(days, end, config)?;
    let paths = util::resolve_inputs(files, config);
    let loaded = evidence::load_files(&paths)?;
    let batch = evidence::assemble_batch(loaded, window);

    let profile = rhythm_core::analyze(&batch, window);
    let data = ReportData {
        generated_at: Utc::now(),
        window,
        timezone: iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string()),
        profile,
    };

    if json {
        println!("{}", format_report_json(&data)?);
    } else {
        print!("{}", format_report(&data));
    }

    Ok(())
}
