//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Workstation activity-rhythm profiler.
///
/// Consolidates activity evidence from collector output, removes
/// screen-locked periods, and reports habitual working hours per weekday.
#[derive(Debug, Parser)]
#[command(name = "rhythm", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze evidence and report habitual working hours.
    Analyze {
        /// Evidence files (JSONL). Falls back to the configured evidence path.
        files: Vec<PathBuf>,

        /// Analysis window length in days.
        #[arg(long)]
        days: Option<i64>,

        /// Pin the window end for reproducible runs (RFC 3339, local
        /// `YYYY-MM-DDTHH:MM:SS`, or `YYYY-MM-DD`). Defaults to now.
        #[arg(long)]
        end: Option<String>,

        /// Output JSON instead of the human-readable report.
        #[arg(long)]
        json: bool,
    },

    /// Show the evidence a run would consume, with reconciled locked intervals.
    Inspect {
        /// Evidence files (JSONL). Falls back to the configured evidence path.
        files: Vec<PathBuf>,

        /// Analysis window length in days.
        #[arg(long)]
        days: Option<i64>,

        /// Pin the window end (same formats as `analyze --end`).
        #[arg(long)]
        end: Option<String>,
    },
}
