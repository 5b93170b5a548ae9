pub mod bam;
pub mod config;
pub mod pileup;

use crate::export::{write_report, ReportFormat, ReportSettings};
use crate::stats::AggregateStats;
use anyhow::Result;
use indicatif::ProgressBar;
use std::io;

fn print_report(stats: &AggregateStats, settings: &ReportSettings, json: bool) -> Result<()> {
    let format = if json {
        ReportFormat::Json
    } else {
        ReportFormat::Text
    };
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_report(&mut handle, stats, settings, format)
}

/// Run `work` under `progress`, clearing the spinner whether or not it fails.
fn with_spinner<T>(progress: &ProgressBar, work: impl FnOnce() -> Result<T>) -> Result<T> {
    let result = work();
    progress.finish_and_clear();
    result
}
