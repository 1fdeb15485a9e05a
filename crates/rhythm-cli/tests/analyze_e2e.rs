//! End-to-end tests for the analyze and inspect commands.
//!
//! Runs the built binary over generated evidence files. `TZ` is pinned to
//! UTC so local-time normalization is deterministic, and `HOME` points at a
//! temp directory so no user configuration leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn rhythm_binary() -> String {
    env!("CARGO_BIN_EXE_rhythm").to_string()
}

/// Runs the binary with a hermetic environment.
fn run_rhythm(home: &Path, args: &[&str]) -> Output {
    Command::new(rhythm_binary())
        .env("HOME", home)
        .env("TZ", "UTC")
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .args(args)
        .output()
        .expect("failed to run rhythm")
}

const EVIDENCE: &str = r#"{"type":"activity","timestamp":"2026-07-06T08:00:00+00:00"}
{"type":"activity","timestamp":"2026-07-06T16:00:00+00:00"}
{"type":"activity","timestamp":"2026-07-07T09:00:00+00:00"}
{"type":"activity","timestamp":"2026-07-08T10:00:00+00:00"}
{"type":"activity","timestamp":"2026-07-08T12:00:00+00:00"}
{"type":"session_lock","state":"lock","timestamp":"2026-07-08T10:30:00+00:00"}
{"type":"session_lock","state":"unlock","timestamp":"2026-07-08T13:00:00+00:00"}
"#;

#[test]
fn test_analyze_json_report() {
    let temp = TempDir::new().unwrap();
    let evidence_path = temp.path().join("evidence.jsonl");
    fs::write(&evidence_path, EVIDENCE).unwrap();

    let output = run_rhythm(
        temp.path(),
        &[
            "analyze",
            evidence_path.to_str().unwrap(),
            "--days",
            "60",
            "--end",
            "2026-08-01T00:00:00",
            "--json",
        ],
    );
    assert!(
        output.status.success(),
        "analyze should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(json["overall_start"], "2026-07-06T08:00:00");
    // The 12:00 timestamp on 07-08 falls inside the locked interval, so
    // Wednesday ends at 10:00.
    assert_eq!(json["overall_end"], "2026-07-08T10:00:00");
    assert_eq!(json["total_active_days"], 3);
    assert_eq!(json["max_consecutive_active_days"], 3);

    let weekdays = json["per_weekday"].as_array().unwrap();
    assert_eq!(weekdays.len(), 3);
    assert_eq!(weekdays[0]["weekday"], "monday");
    assert_eq!(weekdays[0]["average_duration_minutes"], 480.0);
    assert_eq!(weekdays[0]["average_start"], "08:00");
    assert_eq!(weekdays[0]["average_end"], "16:00");
    assert_eq!(weekdays[1]["weekday"], "tuesday");
    assert_eq!(weekdays[1]["average_duration_minutes"], 0.0);
    assert_eq!(weekdays[2]["weekday"], "wednesday");
    assert_eq!(weekdays[2]["average_duration_minutes"], 0.0);

    // (480 + 0 + 0) / 3 contributing weekdays.
    assert_eq!(json["overall_average_duration_minutes"], 160.0);
}

#[test]
fn test_analyze_human_report() {
    let temp = TempDir::new().unwrap();
    let evidence_path = temp.path().join("evidence.jsonl");
    fs::write(&evidence_path, EVIDENCE).unwrap();

    let output = run_rhythm(
        temp.path(),
        &[
            "analyze",
            evidence_path.to_str().unwrap(),
            "--days",
            "60",
            "--end",
            "2026-08-01T00:00:00",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("WORKING HOURS:"));
    assert!(stdout.contains("Monday     08:00 – 16:00"));
    assert!(stdout.contains("Longest streak:  3 consecutive days"));
    assert!(stdout.contains("Active days:     3"));
}

#[test]
fn test_analyze_no_activity_is_a_completed_run() {
    let temp = TempDir::new().unwrap();
    let evidence_path = temp.path().join("evidence.jsonl");
    // Lock events only: every pool timestamp is absent, not just filtered.
    fs::write(
        &evidence_path,
        r#"{"type":"session_lock","state":"lock","timestamp":"2026-07-08T10:30:00+00:00"}
"#,
    )
    .unwrap();

    let output = run_rhythm(
        temp.path(),
        &[
            "analyze",
            evidence_path.to_str().unwrap(),
            "--end",
            "2026-08-01T00:00:00",
        ],
    );

    assert!(output.status.success(), "no activity is not a failure");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No activity in range."));
}

#[test]
fn test_analyze_without_inputs_or_default_evidence() {
    let temp = TempDir::new().unwrap();

    // No files given and no configured evidence file exists.
    let output = run_rhythm(temp.path(), &["analyze", "--end", "2026-08-01T00:00:00"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No activity in range."));
}

#[test]
fn test_inspect_lists_locked_intervals() {
    let temp = TempDir::new().unwrap();
    let evidence_path = temp.path().join("evidence.jsonl");
    fs::write(&evidence_path, EVIDENCE).unwrap();

    let output = run_rhythm(
        temp.path(),
        &[
            "inspect",
            evidence_path.to_str().unwrap(),
            "--days",
            "60",
            "--end",
            "2026-08-01T00:00:00",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Activity instants: 5 (5 in window)"));
    assert!(stdout.contains("Lock events:       2"));
    assert!(stdout.contains("Locked intervals:  1"));
    assert!(stdout.contains("2026-07-08 10:30 – 2026-07-08 13:00  (2h 30m)"));
}

#[test]
fn test_window_excludes_old_evidence() {
    let temp = TempDir::new().unwrap();
    let evidence_path = temp.path().join("evidence.jsonl");
    fs::write(&evidence_path, EVIDENCE).unwrap();

    // A 7-day window ending 2026-08-01 starts after all the evidence.
    let output = run_rhythm(
        temp.path(),
        &[
            "analyze",
            evidence_path.to_str().unwrap(),
            "--days",
            "7",
            "--end",
            "2026-08-01T00:00:00",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("No activity in range."));
}
