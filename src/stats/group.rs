use crate::pileup::{Base, Call};
use serde::{Deserialize, Serialize};

/// Minimum qualities a call needs to be counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFilter {
    pub min_mapping_quality: u8,
    pub min_base_quality: u8,
}

impl QualityFilter {
    pub fn new(min_mapping_quality: u8, min_base_quality: u8) -> Self {
        Self {
            min_mapping_quality,
            min_base_quality,
        }
    }

    pub fn keeps(&self, call: &Call) -> bool {
        call.mapping_quality >= self.min_mapping_quality
            && call.base_quality >= self.min_base_quality
    }
}

/// Qualities observed for one base letter at a position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseQualities {
    pub mapping: Vec<u8>,
    pub base: Vec<u8>,
}

impl BaseQualities {
    pub fn depth(&self) -> usize {
        self.mapping.len()
    }
}

/// Calls at one position grouped by base, with running quality sums.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseGroups {
    slots: [BaseQualities; 6],
    depth: usize,
    mapping_quality_sum: u64,
    base_quality_sum: u64,
}

impl BaseGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the calls that pass `filter`.
    pub fn from_calls<'a, I>(calls: I, filter: &QualityFilter) -> Self
    where
        I: IntoIterator<Item = &'a Call>,
    {
        let mut groups = Self::new();
        for call in calls.into_iter().filter(|c| filter.keeps(c)) {
            groups.push(call.base, call.mapping_quality, call.base_quality);
        }
        groups
    }

    pub fn push(&mut self, base: Base, mapping_quality: u8, base_quality: u8) {
        let slot = &mut self.slots[base.index()];
        slot.mapping.push(mapping_quality);
        slot.base.push(base_quality);
        self.depth += 1;
        self.mapping_quality_sum += u64::from(mapping_quality);
        self.base_quality_sum += u64::from(base_quality);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn mapping_quality_sum(&self) -> u64 {
        self.mapping_quality_sum
    }

    pub fn base_quality_sum(&self) -> u64 {
        self.base_quality_sum
    }

    pub fn get(&self, base: Base) -> Option<&BaseQualities> {
        let slot = &self.slots[base.index()];
        (slot.depth() > 0).then_some(slot)
    }

    /// Observed bases in canonical alphabet order.
    pub fn iter(&self) -> impl Iterator<Item = (Base, &BaseQualities)> + '_ {
        Base::ALL
            .iter()
            .filter_map(move |&base| self.get(base).map(|quals| (base, quals)))
    }
}
