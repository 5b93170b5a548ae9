use crate::export::ReportSettings;
use crate::stats::AggregateStats;
use std::io::{self, Write};

pub fn write_text<W: Write>(
    writer: &mut W,
    stats: &AggregateStats,
    settings: &ReportSettings,
) -> io::Result<()> {
    if let Some(max_depth) = settings.max_depth {
        writeln!(writer, "Maximum Depth: {}", max_depth)?;
    }
    writeln!(writer, "Minimum Mapping Quality Threshold: {}", settings.min_mapping_quality)?;
    writeln!(writer, "Minimum Base Quality Threshold: {}", settings.min_base_quality)?;
    writeln!(writer, "Average Mapping Quality: {:.2}", stats.avg_mapq)?;
    writeln!(writer, "Average Base Quality: {:.2}", stats.avg_baseq)?;
    writeln!(writer, "Depth: {}", stats.total_depth)?;
    for base in &stats.bases {
        writeln!(writer, "Base: {}", base.base)?;
        writeln!(writer, "\tDepth: {}", base.depth)?;
        writeln!(writer, "\tAverage Mapping Quality: {:.2}", base.avg_mapq)?;
        writeln!(writer, "\tAverage Base Quality: {:.2}", base.avg_baseq)?;
        writeln!(writer, "\t% of Total: {:.2}", base.pct_total)?;
    }
    Ok(())
}
