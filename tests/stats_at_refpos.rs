use refpos_stats::pileup::Base;
use refpos_stats::source::open_pileup_file;
use refpos_stats::{stats_at_pos, AggregateStats, QualityFilter, RefPos, StatsError, StatsOptions};
use std::io::{BufRead, Cursor};
use std::path::PathBuf;

const REFERENCE: &str = "Den1/U88535_1/WestPac/1997/Den1_1";

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/mpileup_6109.txt")
}

fn run(position: u64, filter: QualityFilter) -> refpos_stats::Result<AggregateStats> {
    let reader = open_pileup_file(fixture().to_str().unwrap()).expect("open fixture");
    let options = StatsOptions {
        filter,
        ..StatsOptions::default()
    };
    stats_at_pos(
        reader.lines(),
        &RefPos::new(Some(REFERENCE.to_string()), position),
        &options,
    )
}

fn assert_base(stats: &AggregateStats, base: Base, depth: usize, avg_mapq: f64, avg_baseq: f64, pct: f64) {
    let b = stats
        .base(base)
        .unwrap_or_else(|| panic!("{} missing from {:?}", base, stats));
    assert_eq!(b.depth, depth, "depth of {}", base);
    assert_eq!(b.avg_mapq, avg_mapq, "AvgMapQ of {}", base);
    assert_eq!(b.avg_baseq, avg_baseq, "AvgBaseQ of {}", base);
    assert_eq!(b.pct_total, pct, "PctTotal of {}", base);
}

#[test]
fn unfiltered_position() {
    let stats = run(6109, QualityFilter::default()).unwrap();
    assert_eq!(stats.total_depth, 13);
    assert_eq!(stats.avg_mapq, 60.0);
    assert_eq!(stats.avg_baseq, 33.38);

    let order: Vec<Base> = stats.bases.iter().map(|b| b.base).collect();
    assert_eq!(order, vec![Base::G, Base::T, Base::N]);
    assert_base(&stats, Base::G, 11, 60.0, 37.73, 84.62);
    assert_base(&stats, Base::T, 1, 60.0, 17.0, 7.69);
    assert_base(&stats, Base::N, 1, 60.0, 2.0, 7.69);
}

#[test]
fn mapping_quality_filter_removes_everything() {
    let stats = run(6109, QualityFilter::new(61, 0)).unwrap();
    assert_eq!(stats.total_depth, 0);
    assert_eq!(stats.avg_mapq, 0.0);
    assert_eq!(stats.avg_baseq, 0.0);
    assert!(stats.bases.is_empty());
}

#[test]
fn base_quality_filter_keeps_g() {
    let stats = run(6109, QualityFilter::new(0, 30)).unwrap();
    assert_eq!(stats.total_depth, 11);
    assert_eq!(stats.avg_mapq, 60.0);
    assert_eq!(stats.avg_baseq, 37.73);
    assert_eq!(stats.bases.len(), 1);
    assert_base(&stats, Base::G, 11, 60.0, 37.73, 100.0);
}

#[test]
fn read_start_markers_do_not_consume_qualities() {
    let stats = run(6108, QualityFilter::default()).unwrap();
    assert_eq!(stats.total_depth, 13);
    assert_base(&stats, Base::C, 13, 60.0, 38.0, 100.0);
}

#[test]
fn deletion_markers_are_rejected() {
    assert!(matches!(
        run(6110, QualityFilter::default()),
        Err(StatsError::UnsupportedOperation(_))
    ));
}

#[test]
fn missing_position() {
    assert!(matches!(
        run(7000, QualityFilter::default()),
        Err(StatsError::PositionNotFound(_))
    ));
}

#[test]
fn single_quality_column_doubles_as_mapping_quality() {
    let pileup = format!("{}\t6109\tN\t13\tGgnGgggggtGgg\tCB#GHHHHG2GHH\n", REFERENCE);
    let stats = stats_at_pos(
        Cursor::new(pileup).lines(),
        &RefPos::new(None, 6109),
        &StatsOptions::default(),
    )
    .unwrap();
    assert_eq!(stats.total_depth, 13);
    assert_eq!(stats.avg_mapq, 33.38);
    assert_eq!(stats.avg_baseq, 33.38);
    assert_base(&stats, Base::G, 11, 37.73, 37.73, 84.62);
}

#[test]
fn insertion_keeps_later_bases_paired() {
    let pileup = "chr1\t5\tA\t4\tA+2ggA$TT\tI5++\n";
    let stats = stats_at_pos(
        Cursor::new(pileup).lines(),
        &RefPos::new(None, 5),
        &StatsOptions::default(),
    )
    .unwrap();
    assert_eq!(stats.total_depth, 4);
    assert_base(&stats, Base::A, 2, 30.0, 30.0, 50.0);
    assert_base(&stats, Base::T, 2, 10.0, 10.0, 50.0);
}

#[test]
fn json_output_matches_report_layout() {
    let stats = run(6109, QualityFilter::new(0, 30)).unwrap();
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "TotalDepth": 11,
            "AvgMapQ": 60.0,
            "AvgBaseQ": 37.73,
            "Bases": {
                "G": {"Depth": 11, "AvgMapQ": 60.0, "AvgBaseQ": 37.73, "PctTotal": 100.0}
            }
        })
    );
}

#[test]
fn position_with_every_base_dropped_is_zero_depth() {
    let pileup = "chr1\t5\tN\t0\t*\t*\t*\n";
    let stats = stats_at_pos(
        Cursor::new(pileup).lines(),
        &RefPos::new(Some("chr1".to_string()), 5),
        &StatsOptions::default(),
    )
    .unwrap();
    assert_eq!(stats, AggregateStats::empty());
}
