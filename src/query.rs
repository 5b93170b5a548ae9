use crate::error::Result;
use crate::pileup::{decode_calls, find_position, DecodeOptions, RefPos};
use crate::stats::{compile, AggregateStats, BaseGroups, QualityFilter};
use log::info;
use std::io;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsOptions {
    pub decode: DecodeOptions,
    pub filter: QualityFilter,
}

/// Scan `lines` for `target`, decode it and compile its statistics.
///
/// Any decode failure aborts the query; no partial statistics are returned.
pub fn stats_at_pos<I, S>(lines: I, target: &RefPos, options: &StatsOptions) -> Result<AggregateStats>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let line = find_position(lines, target)?;
    let calls = decode_calls(&line, &options.decode)?;
    let groups = BaseGroups::from_calls(&calls, &options.filter);
    info!(
        "{}:{} decoded {} calls, {} pass quality filters",
        line.reference,
        line.position,
        calls.len(),
        groups.depth()
    );
    Ok(compile(&groups))
}
