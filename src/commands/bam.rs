use crate::cli::{Backend, QueryOpts};
use crate::config::Config;
use crate::export::ReportSettings;
use crate::pileup::Region;
use crate::query::{stats_at_pos, StatsOptions};
use crate::source::{HtslibPileup, PileupLines, SamtoolsPileup};
use crate::stats::QualityFilter;
use crate::utils::external_tools::check_samtools;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

pub fn run(
    config: &Config,
    bam_file: PathBuf,
    region: String,
    min_qual: Option<u8>,
    max_depth: Option<u32>,
    backend: Backend,
    query: QueryOpts,
) -> Result<()> {
    let region = Region::parse(&region)?;
    let target = region.target()?;
    let min_qual = min_qual.unwrap_or(config.min_qual);
    let max_depth = max_depth.unwrap_or(config.max_depth);

    let progress = ProgressBarBuilder::new(format!("Building pileup at {}...", region))
        .hidden_if(query.json)
        .with_tick()
        .build()?;

    let options = StatsOptions {
        decode: config.decode_options(),
        filter: QualityFilter::new(query.min_mapping_quality, query.min_base_quality),
    };
    let stats = super::with_spinner(&progress, || {
        let lines = open_lines(config, &bam_file, &region, min_qual, max_depth, backend)?;
        stats_at_pos(lines, &target, &options)
            .with_context(|| format!("Failed to compute stats at {} in {}", region, bam_file.display()))
    })?;

    let settings = ReportSettings {
        max_depth: Some(max_depth),
        min_mapping_quality: query.min_mapping_quality,
        min_base_quality: query.min_base_quality,
    };
    super::print_report(&stats, &settings, query.json)
}

fn open_lines(
    config: &Config,
    bam_file: &Path,
    region: &Region,
    min_qual: u8,
    max_depth: u32,
    backend: Backend,
) -> Result<PileupLines> {
    let lines: PileupLines = match backend {
        Backend::Samtools => {
            let version = check_samtools(&config.samtools)?;
            info!("using {}", version);
            Box::new(SamtoolsPileup::spawn(
                &config.samtools,
                bam_file,
                region,
                min_qual,
                max_depth,
            )?)
        }
        Backend::Htslib => Box::new(HtslibPileup::open(bam_file, region, min_qual, max_depth)?),
    };
    Ok(lines)
}
