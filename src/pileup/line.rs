use crate::error::{Result, StatsError};

/// One row of `samtools mpileup` output.
///
/// `mapping_qualities` is only present when samtools was asked for the
/// mapping-quality column (`-s` / `--output-MQ`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileupLine {
    pub reference: String,
    pub position: u64,
    pub reference_base: u8,
    pub depth: u32,
    pub calls: String,
    pub base_qualities: String,
    pub mapping_qualities: Option<String>,
}

impl PileupLine {
    pub fn parse(text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if fields.len() < 6 {
            return Err(StatsError::Parse(format!(
                "expected at least 6 pileup columns, found {}: {:?}",
                fields.len(),
                text
            )));
        }

        let position = fields[1]
            .parse::<u64>()
            .map_err(|e| StatsError::Parse(format!("bad position {:?}: {}", fields[1], e)))?;
        let depth = fields[3]
            .parse::<u32>()
            .map_err(|e| StatsError::Parse(format!("bad depth {:?}: {}", fields[3], e)))?;
        let reference_base = fields[2].as_bytes()[0];

        Ok(Self {
            reference: fields[0].to_string(),
            position,
            reference_base,
            depth,
            calls: fields[4].to_string(),
            base_qualities: fields[5].to_string(),
            mapping_qualities: fields.get(6).map(|s| s.to_string()),
        })
    }

    /// Only the position column is parsed, so non-target lines stay cheap to skip.
    pub fn peek_position(text: &str) -> Option<(&str, u64)> {
        let mut fields = text.split_whitespace();
        let reference = fields.next()?;
        let position = fields.next()?.parse().ok()?;
        Some((reference, position))
    }
}

/// Decode a Phred-encoded quality string.
pub fn decode_qualities(encoded: &str, offset: u8) -> Result<Vec<u8>> {
    encoded
        .bytes()
        .map(|c| {
            c.checked_sub(offset).ok_or_else(|| {
                StatsError::Parse(format!(
                    "quality character {:?} is below offset {}",
                    c as char, offset
                ))
            })
        })
        .collect()
}
