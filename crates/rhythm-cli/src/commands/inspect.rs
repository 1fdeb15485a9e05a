//! Evidence diagnostics: what a run would consume.

use std::path::PathBuf;

use anyhow::Result;

use rhythm_core::reconcile;

use crate::commands::{analyze, util};
use crate::config::Config;
use crate::evidence;

/// Runs the inspect command.
pub fn run(files: &[PathBuf], days: Option<i64>, end: Option<&str>, config: &Config) -> Result<()> {
    let window = util::resolve_window(days, end, config)?;
    let paths = util::resolve_inputs(files, config);
    let loaded = evidence::load_files(&paths)?;

    let total = loaded.timestamps.len();
    let in_window = loaded
        .timestamps
        .iter()
        .filter(|&&at| window.contains(at))
        .count();

    let batch = evidence::assemble_batch(loaded, window);
    let locked = reconcile(batch.lock_events(), window.end);

    println!(
        "Window:            {} – {}",
        window.start.format("%Y-%m-%d %H:%M"),
        window.end.format("%Y-%m-%d %H:%M")
    );
    println!("Evidence files:    {}", paths.len());
    println!("Activity instants: {total} ({in_window} in window)");
    println!("Lock events:       {}", batch.lock_events().len());
    println!("Locked intervals:  {}", locked.len());
    for interval in &locked {
        println!(
            "  {} – {}  ({})",
            interval.start.format("%Y-%m-%d %H:%M"),
            interval.end.format("%Y-%m-%d %H:%M"),
            analyze::format_duration(interval.duration())
        );
    }

    Ok(())
}
