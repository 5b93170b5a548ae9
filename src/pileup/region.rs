use crate::error::{Result, StatsError};
use std::fmt;
use std::str::FromStr;

/// A samtools region string, `reference:start-end` (1-based, inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub reference: String,
    pub start: u64,
    pub end: u64,
}

impl Region {
    pub fn single(reference: impl Into<String>, position: u64) -> Self {
        Self {
            reference: reference.into(),
            start: position,
            end: position,
        }
    }

    /// Reference names may themselves contain `:`, so the last one splits.
    pub fn parse(text: &str) -> Result<Self> {
        let (reference, range) = text
            .rsplit_once(':')
            .ok_or_else(|| StatsError::Parse(format!("region {:?} has no ':'", text)))?;
        if reference.is_empty() {
            return Err(StatsError::Parse(format!("region {:?} has no reference name", text)));
        }

        let parse_pos = |s: &str| {
            s.replace(',', "")
                .parse::<u64>()
                .map_err(|e| StatsError::Parse(format!("bad coordinate {:?} in region {:?}: {}", s, text, e)))
        };
        let (start, end) = match range.split_once('-') {
            Some((start, end)) => (parse_pos(start)?, parse_pos(end)?),
            None => {
                let pos = parse_pos(range)?;
                (pos, pos)
            }
        };
        if start == 0 || end < start {
            return Err(StatsError::Parse(format!("region {:?} has an invalid range", text)));
        }

        Ok(Self {
            reference: reference.to_string(),
            start,
            end,
        })
    }

    /// The single position this region names.
    pub fn target(&self) -> Result<RefPos> {
        if self.start != self.end {
            return Err(StatsError::InvalidInput(format!(
                "region {} spans more than one position",
                self
            )));
        }
        Ok(RefPos {
            reference: Some(self.reference.clone()),
            position: self.start,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.reference, self.start, self.end)
    }
}

impl FromStr for Region {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self> {
        Region::parse(s)
    }
}

/// The position a query selects from a pileup stream.
///
/// Without a reference name any line at `position` matches, which is how a
/// single-reference pileup is usually queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefPos {
    pub reference: Option<String>,
    pub position: u64,
}

impl RefPos {
    pub fn new(reference: Option<String>, position: u64) -> Self {
        Self { reference, position }
    }

    /// Either a bare 1-based position or a single-position region.
    pub fn parse(text: &str) -> Result<Self> {
        match text.parse::<u64>() {
            Ok(position) => Ok(Self::new(None, position)),
            Err(_) => Region::parse(text)?.target(),
        }
    }

    pub fn matches(&self, reference: &str, position: u64) -> bool {
        position == self.position
            && self.reference.as_deref().map_or(true, |r| r == reference)
    }
}

impl fmt::Display for RefPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reference {
            Some(reference) => write!(f, "{}:{}", reference, self.position),
            None => write!(f, "{}", self.position),
        }
    }
}
