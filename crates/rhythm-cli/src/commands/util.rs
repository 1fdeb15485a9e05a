//! Shared helpers for command implementations.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use rhythm_core::AnalysisWindow;

use crate::config::Config;

/// Builds the analysis window from CLI flags and configuration.
///
/// The window ends at `--end` when given (pinned runs are reproducible),
/// otherwise at the current local time.
pub fn resolve_window(days: Option<i64>, end: Option<&str>, config: &Config) -> Result<AnalysisWindow> {
    let end = match end {
        Some(raw) => {
            parse_end_instant(raw).with_context(|| format!("invalid --end value: {raw}"))?
        }
        None => Local::now().naive_local(),
    };
    Ok(AnalysisWindow::ending_at(
        end,
        days.unwrap_or(config.window_days),
    ))
}

/// Parses a window-end argument.
///
/// Accepts RFC 3339 (normalized to local time), a naive local datetime, or
/// a bare date (taken at local midnight).
fn parse_end_instant(raw: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight always exists"));
    }
    Err(anyhow!("unrecognized timestamp format"))
}

/// Resolves the evidence files for a run.
///
/// Explicit arguments win; otherwise the configured evidence path is used
/// when present. A missing default file means an empty run, not an error.
pub fn resolve_inputs(files: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    if !files.is_empty() {
        return files.to_vec();
    }
    if config.evidence_path.exists() {
        vec![config.evidence_path.clone()]
    } else {
        tracing::debug!(
            path = %config.evidence_path.display(),
            "default evidence file not found, running with empty evidence"
        );
        Vec::new()
    }
}
