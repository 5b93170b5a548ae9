pub mod compile;
pub mod group;

use crate::pileup::Base;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

pub use compile::compile;
pub use group::{BaseGroups, BaseQualities, QualityFilter};

/// Summary of one base letter at a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseStats {
    #[serde(skip)]
    pub base: Base,
    #[serde(rename = "Depth")]
    pub depth: usize,
    #[serde(rename = "AvgMapQ")]
    pub avg_mapq: f64,
    #[serde(rename = "AvgBaseQ")]
    pub avg_baseq: f64,
    #[serde(rename = "PctTotal")]
    pub pct_total: f64,
}

/// Statistics for one reference position after filtering.
///
/// `bases` is ordered by `pct_total` descending and serializes as an ordered
/// map keyed by base letter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    #[serde(rename = "TotalDepth")]
    pub total_depth: usize,
    #[serde(rename = "AvgMapQ")]
    pub avg_mapq: f64,
    #[serde(rename = "AvgBaseQ")]
    pub avg_baseq: f64,
    #[serde(rename = "Bases", serialize_with = "serialize_bases")]
    pub bases: Vec<BaseStats>,
}

impl AggregateStats {
    pub fn empty() -> Self {
        Self {
            total_depth: 0,
            avg_mapq: 0.0,
            avg_baseq: 0.0,
            bases: Vec::new(),
        }
    }

    pub fn base(&self, base: Base) -> Option<&BaseStats> {
        self.bases.iter().find(|b| b.base == base)
    }
}

fn serialize_bases<S>(bases: &[BaseStats], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(bases.len()))?;
    for stats in bases {
        map.serialize_entry(&stats.base.as_char(), stats)?;
    }
    map.end()
}

/// Round half away from zero to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
