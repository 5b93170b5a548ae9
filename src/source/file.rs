use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};

/// Open a pileup text file, or stdin for `-`. Compressed files are detected
/// from their magic bytes.
pub fn open_pileup_file(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path).with_context(|| format!("Failed to open pileup file {}", path))?;
    let (reader, format) = niffler::get_reader(Box::new(file))
        .with_context(|| format!("Failed to create decompressor for {}", path))?;
    log::debug!("reading {} as {:?}", path, format);
    Ok(Box::new(BufReader::new(reader)))
}
