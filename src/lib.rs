pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod pileup;
pub mod query;
pub mod source;
pub mod stats;
pub mod utils;

pub use error::{Result, StatsError};
pub use pileup::{decode_calls, realign_qualities, Base, Call, DecodeOptions, PileupLine, RefPos, Region};
pub use query::{stats_at_pos, StatsOptions};
pub use stats::{compile, AggregateStats, BaseGroups, BaseStats, QualityFilter};
