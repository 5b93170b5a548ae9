use clap::Parser;
use refpos_stats::cli::{self, Commands};
use refpos_stats::commands;
use refpos_stats::config::Config;

fn setup_logger(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(match verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .init();
}

fn main() {
    let args = cli::Args::parse();
    setup_logger(args.verbose);
    let config = Config::load();

    let result = match args.command {
        Commands::Bam {
            bam_file,
            region,
            min_qual,
            max_depth,
            backend,
            query,
        } => commands::bam::run(&config, bam_file, region, min_qual, max_depth, backend, query),
        Commands::Pileup {
            pileup_file,
            position,
            query,
        } => commands::pileup::run(&config, pileup_file, position, query),
        Commands::Config { init, force } => commands::config::run(&config, init, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
