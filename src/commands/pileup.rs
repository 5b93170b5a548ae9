use crate::cli::QueryOpts;
use crate::config::Config;
use crate::export::ReportSettings;
use crate::pileup::RefPos;
use crate::query::{stats_at_pos, StatsOptions};
use crate::stats::QualityFilter;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::io::BufRead;

pub fn run(config: &Config, pileup_file: String, position: String, query: QueryOpts) -> Result<()> {
    let target = RefPos::parse(&position)?;
    let reader = crate::source::open_pileup_file(&pileup_file)?;

    let progress = ProgressBarBuilder::new(format!("Scanning {} for {}...", pileup_file, target))
        .hidden_if(query.json)
        .with_tick()
        .build()?;

    let options = StatsOptions {
        decode: config.decode_options(),
        filter: QualityFilter::new(query.min_mapping_quality, query.min_base_quality),
    };
    let stats = super::with_spinner(&progress, || {
        stats_at_pos(reader.lines(), &target, &options)
            .with_context(|| format!("Failed to compute stats at {} in {}", target, pileup_file))
    })?;

    let settings = ReportSettings {
        max_depth: None,
        min_mapping_quality: query.min_mapping_quality,
        min_base_quality: query.min_base_quality,
    };
    super::print_report(&stats, &settings, query.json)
}
