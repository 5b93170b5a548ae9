use crate::error::{Result, StatsError};
use crate::pileup::line::PileupLine;
use crate::pileup::region::RefPos;
use log::{debug, warn};
use std::io;

/// Scan a pileup stream for the line at `target`.
///
/// Reading stops at the first matching line, so a stream fed by a running
/// process does not have to be drained.
pub fn find_position<I, S>(lines: I, target: &RefPos) -> Result<PileupLine>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut scanned = 0usize;
    for line in lines {
        let line = line?;
        let text = line.as_ref();
        if text.trim().is_empty() {
            continue;
        }
        scanned += 1;

        match PileupLine::peek_position(text) {
            Some((reference, position)) if target.matches(reference, position) => {
                debug!("found {} after {} pileup lines", target, scanned);
                return PileupLine::parse(text);
            }
            Some(_) => {}
            None => warn!("skipping malformed pileup line: {:?}", text),
        }
    }

    debug!("{} not among {} pileup lines", target, scanned);
    Err(StatsError::PositionNotFound(target.to_string()))
}
