//! Producers of mpileup text lines.

pub mod file;
pub mod htslib;
pub mod samtools;

use std::io;

pub use file::open_pileup_file;
pub use htslib::HtslibPileup;
pub use samtools::SamtoolsPileup;

/// A stream of pileup lines, consumed lazily by the scanner.
pub type PileupLines = Box<dyn Iterator<Item = io::Result<String>>>;
