use crate::pileup::Region;
use anyhow::{Context, Result};
use log::debug;
use rust_htslib::bam::pileup::{Alignment, Indel};
use rust_htslib::bam::{self, Read};
use std::io;
use std::path::Path;

const MAX_PRINTABLE_QUALITY: u8 = 93;

fn encode_quality(quality: u8) -> char {
    (quality.min(MAX_PRINTABLE_QUALITY) + 33) as char
}

/// In-process pileup of an indexed BAM, rendered as mpileup text.
///
/// The reference base column is always `N` since no FASTA is consulted, and
/// every aligned base is written as its read letter rather than `.`/`,`.
pub struct HtslibPileup {
    lines: std::vec::IntoIter<String>,
}

impl HtslibPileup {
    pub fn open(bam_file: &Path, region: &Region, min_qual: u8, max_depth: u32) -> Result<Self> {
        let mut bam = bam::IndexedReader::from_path(bam_file)
            .with_context(|| format!("Failed to open indexed BAM {}", bam_file.display()))?;
        let header = bam.header().clone();

        bam.fetch((
            region.reference.as_str(),
            region.start as i64 - 1,
            region.end as i64,
        ))
        .with_context(|| format!("Failed to fetch {} from {}", region, bam_file.display()))?;

        let mut pileups = bam.pileup();
        pileups.set_max_depth(max_depth);

        let mut lines = Vec::new();
        for p in pileups {
            let pileup = p?;
            let position = u64::from(pileup.pos()) + 1;
            if position < region.start || position > region.end {
                continue;
            }
            let reference = String::from_utf8_lossy(header.tid2name(pileup.tid())).into_owned();
            let column: Vec<Alignment> = pileup.alignments().collect();
            lines.push(render_column(&reference, position, &column, min_qual));
        }
        debug!("rendered {} pileup columns for {}", lines.len(), region);

        Ok(Self {
            lines: lines.into_iter(),
        })
    }
}

impl Iterator for HtslibPileup {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(Ok)
    }
}

/// Render one pileup column in `samtools mpileup -s` layout.
fn render_column(reference: &str, position: u64, alignments: &[Alignment], min_qual: u8) -> String {
    let mut calls = String::new();
    let mut base_quals = String::new();
    let mut map_quals = String::new();
    let mut depth = 0;

    for aln in alignments {
        let record = aln.record();
        let reverse = record.is_reverse();
        let strand = |b: u8| {
            let c = b as char;
            if reverse {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        };

        let (symbol, quality) = if aln.is_del() {
            ('*', 0)
        } else if aln.is_refskip() {
            (if reverse { '<' } else { '>' }, 0)
        } else if let Some(qpos) = aln.qpos() {
            let quality = record.qual()[qpos];
            if quality < min_qual {
                continue;
            }
            (strand(record.seq()[qpos]), quality)
        } else {
            continue;
        };

        if aln.is_head() {
            calls.push('^');
            calls.push(encode_quality(record.mapq()));
        }
        calls.push(symbol);
        match aln.indel() {
            Indel::Ins(len) => {
                let seq = record.seq().as_bytes();
                let start = aln.qpos().map_or(seq.len(), |q| q + 1);
                let end = (start + len as usize).min(seq.len());
                calls.push('+');
                calls.push_str(&(end - start).to_string());
                calls.extend(seq[start..end].iter().map(|&b| strand(b)));
            }
            Indel::Del(len) => {
                calls.push('-');
                calls.push_str(&len.to_string());
                calls.extend(std::iter::repeat(strand(b'N')).take(len as usize));
            }
            Indel::None => {}
        }
        if aln.is_tail() {
            calls.push('$');
        }

        base_quals.push(encode_quality(quality));
        map_quals.push(encode_quality(record.mapq()));
        depth += 1;
    }

    format!(
        "{}\t{}\tN\t{}\t{}\t{}\t{}",
        reference, position, depth, calls, base_quals, map_quals
    )
}
