use thiserror::Error;

/// Errors raised while decoding pileup text and compiling per-position stats.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A `-N<seq>` deletion marker was found in the base-call column.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The read symbols and the quality string no longer line up.
    #[error("misaligned qualities: {symbols} read symbols vs {qualities} qualities in {line:?}")]
    MisalignedQuality {
        symbols: usize,
        qualities: usize,
        line: String,
    },

    #[error("position {0} not found in pileup")]
    PositionNotFound(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
