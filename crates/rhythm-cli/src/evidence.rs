//! Evidence file loading and timezone normalization.
//!
//! Collectors write newline-delimited JSON, one record per line:
//!
//! ```text
//! {"type":"activity","timestamp":"2026-07-01T09:14:03+02:00"}
//! {"type":"session_lock","state":"lock","timestamp":"2026-07-01T12:01:00+02:00"}
//! ```
//!
//! Timestamps carry an offset; the loader normalizes them to local
//! wall-clock values before hand-off to the core. Malformed lines are
//! skipped so partial collector output never aborts a run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use rayon::prelude::*;
use serde::Deserialize;

use rhythm_core::{AnalysisWindow, EvidenceBatch, LockEvent};

/// One line of collector output.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum EvidenceRecord {
    /// A single observed act of user activity.
    Activity { timestamp: String },
    /// A session lock-state transition.
    SessionLock { state: LockState, timestamp: String },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LockState {
    Lock,
    Unlock,
}

/// Evidence merged from all input files, local-normalized.
#[derive(Debug, Default)]
pub struct LoadedEvidence {
    pub timestamps: Vec<NaiveDateTime>,
    pub lock_events: Vec<LockEvent>,
}

/// Loads and merges evidence from the given files, parsing in parallel.
pub fn load_files(paths: &[PathBuf]) -> Result<LoadedEvidence> {
    let per_file: Vec<LoadedEvidence> = paths
        .par_iter()
        .map(|path| load_file(path))
        .collect::<Result<_>>()?;

    let mut merged = LoadedEvidence::default();
    for loaded in per_file {
        merged.timestamps.extend(loaded.timestamps);
        merged.lock_events.extend(loaded.lock_events);
    }
    Ok(merged)
}

/// Loads one evidence file, skipping malformed lines.
fn load_file(path: &Path) -> Result<LoadedEvidence> {
    let file = File::open(path)
        .with_context(|| format!("failed to open evidence file: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut loaded = LoadedEvidence::default();
    for (line_num, line_result) in reader.lines().enumerate() {
        let Ok(line) = line_result else {
            continue; // Skip lines we can't read
        };
        if line.trim().is_empty() {
            continue;
        }

        let record: EvidenceRecord = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(
                    path = %path.display(),
                    line = line_num + 1,
                    error = %e,
                    "skipping malformed evidence line"
                );
                continue;
            }
        };

        match record {
            EvidenceRecord::Activity { timestamp } => {
                if let Some(at) = parse_local(&timestamp) {
                    loaded.timestamps.push(at);
                } else {
                    tracing::debug!(
                        line = line_num + 1,
                        raw = %timestamp,
                        "skipping activity record with bad timestamp"
                    );
                }
            }
            EvidenceRecord::SessionLock { state, timestamp } => {
                if let Some(at) = parse_local(&timestamp) {
                    loaded.lock_events.push(match state {
                        LockState::Lock => LockEvent::lock(at),
                        LockState::Unlock => LockEvent::unlock(at),
                    });
                } else {
                    tracing::debug!(
                        line = line_num + 1,
                        raw = %timestamp,
                        "skipping lock record with bad timestamp"
                    );
                }
            }
        }
    }

    Ok(loaded)
}

/// Parses an RFC 3339 timestamp and normalizes it to local wall-clock time.
fn parse_local(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}

/// Assembles the core hand-off batch for one window.
///
/// Lock events are restricted to the window and sorted ascending, per the
/// reconciler's input contract; activity timestamps go in unfiltered since
/// the pipeline re-checks the window itself.
#[must_use]
pub fn assemble_batch(loaded: LoadedEvidence, window: AnalysisWindow) -> EvidenceBatch {
    let mut batch = EvidenceBatch::new();
    batch.record_all(loaded.timestamps);

    let mut lock_events: Vec<LockEvent> = loaded
        .lock_events
        .into_iter()
        .filter(|event| window.contains(event.at))
        .collect();
    lock_events.sort_by_key(|event| event.at);
    batch.set_lock_events(lock_events);

    batch
}
