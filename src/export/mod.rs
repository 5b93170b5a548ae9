pub mod text;

use crate::stats::AggregateStats;
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Parameters the report was produced with, echoed in the text header.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub max_depth: Option<u32>,
    pub min_mapping_quality: u8,
    pub min_base_quality: u8,
}

pub fn write_report<W: Write>(
    writer: &mut W,
    stats: &AggregateStats,
    settings: &ReportSettings,
    format: ReportFormat,
) -> Result<()> {
    match format {
        ReportFormat::Text => text::write_text(writer, stats, settings)?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, stats)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
