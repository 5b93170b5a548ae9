pub mod decoder;
pub mod line;
pub mod region;
pub mod scan;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use decoder::{decode_calls, realign_qualities, tokenize, Call, Token};
pub use line::PileupLine;
pub use region::{RefPos, Region};
pub use scan::find_position;

/// Phred+33, the encoding samtools uses for both quality columns.
pub const PHRED_OFFSET: u8 = 33;

/// A base call that contributes to the per-position statistics.
///
/// The declaration order is the canonical alphabet order used when grouping
/// calls, so equal percentages always come out in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    A,
    T,
    G,
    C,
    Gap,
    N,
}

impl Base {
    pub const ALL: [Base; 6] = [Base::A, Base::T, Base::G, Base::C, Base::Gap, Base::N];

    /// Case-insensitive lookup; `None` for anything that is not an aligned base.
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            b'A' => Some(Base::A),
            b'T' => Some(Base::T),
            b'G' => Some(Base::G),
            b'C' => Some(Base::C),
            b'*' => Some(Base::Gap),
            b'N' => Some(Base::N),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::T => 'T',
            Base::G => 'G',
            Base::C => 'C',
            Base::Gap => '*',
            Base::N => 'N',
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Lowercase symbols and `,` come from reverse-strand reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    fn of_symbol(symbol: u8) -> Self {
        if symbol.is_ascii_lowercase() || symbol == b',' {
            Strand::Reverse
        } else {
            Strand::Forward
        }
    }
}

/// Process-wide decoding knobs, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    pub quality_offset: u8,
    /// Quality given to inserted bases, which carry no quality of their own.
    pub placeholder_quality: u8,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            quality_offset: PHRED_OFFSET,
            placeholder_quality: 0,
        }
    }
}
