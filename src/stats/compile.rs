use crate::stats::group::BaseGroups;
use crate::stats::{round2, AggregateStats, BaseStats};

fn mean(values: &[u8]) -> f64 {
    let sum: u64 = values.iter().map(|&q| u64::from(q)).sum();
    sum as f64 / values.len() as f64
}

/// Summarize grouped calls.
///
/// Zero depth (nothing survived filtering) gives an all-zero result with no
/// bases. Bases are sorted by share of depth, descending; the sort is stable
/// over the canonical alphabet order so ties always come out the same way.
pub fn compile(groups: &BaseGroups) -> AggregateStats {
    let total_depth = groups.depth();
    if total_depth == 0 {
        return AggregateStats::empty();
    }

    let mut bases: Vec<BaseStats> = groups
        .iter()
        .map(|(base, quals)| BaseStats {
            base,
            depth: quals.depth(),
            avg_mapq: round2(mean(&quals.mapping)),
            avg_baseq: round2(mean(&quals.base)),
            pct_total: round2(quals.depth() as f64 / total_depth as f64 * 100.0),
        })
        .collect();
    bases.sort_by(|a, b| b.pct_total.total_cmp(&a.pct_total));

    AggregateStats {
        total_depth,
        avg_mapq: round2(groups.mapping_quality_sum() as f64 / total_depth as f64),
        avg_baseq: round2(groups.base_quality_sum() as f64 / total_depth as f64),
        bases,
    }
}
