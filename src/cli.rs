use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Per-position depth, quality and base composition from pileup data", long_about = None)]
pub struct Args {
    /// Verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// How pileup lines are produced from a BAM file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Run `samtools mpileup`
    Samtools,
    /// Build the pileup in-process with htslib (requires a BAM index)
    Htslib,
}

/// Filters and output options shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryOpts {
    /// Drop calls whose mapping quality is below this value
    #[arg(long = "min-mq", default_value = "0")]
    pub min_mapping_quality: u8,

    /// Drop calls whose base quality is below this value
    #[arg(long = "min-bq", default_value = "0")]
    pub min_base_quality: u8,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stats at one position of a BAM file
    Bam {
        /// BAM file path
        bam_file: PathBuf,

        /// Position to report, as reference:position-position
        region: String,

        /// Minimum read quality used when building the pileup [config default: 25]
        #[arg(short = 'Q', long = "min-qual")]
        min_qual: Option<u8>,

        /// Maximum read depth at the position [config default: 100000]
        #[arg(short = 'm', long = "max-depth")]
        max_depth: Option<u32>,

        /// Pileup backend
        #[arg(long, value_enum, default_value_t = Backend::Samtools)]
        backend: Backend,

        #[command(flatten)]
        query: QueryOpts,
    },

    /// Stats at one position of an existing pileup file
    Pileup {
        /// Pileup text file, optionally compressed ("-" for stdin)
        pileup_file: String,

        /// Position to report, either a bare position or reference:position
        position: String,

        #[command(flatten)]
        query: QueryOpts,
    },

    /// Show the active configuration, or write the defaults to the config file
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing configuration file with --init
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bam_defaults() {
        let args = Args::try_parse_from([
            "refpos-stats",
            "bam",
            "sample.bam",
            "Den1/U88535_1/WestPac/1997/Den1_1:6109-6109",
        ])
        .unwrap();
        match args.command {
            Commands::Bam {
                min_qual,
                max_depth,
                backend,
                query,
                ..
            } => {
                assert_eq!(min_qual, None);
                assert_eq!(max_depth, None);
                assert_eq!(backend, Backend::Samtools);
                assert_eq!(query.min_mapping_quality, 0);
                assert_eq!(query.min_base_quality, 0);
                assert!(!query.json);
            }
            _ => panic!("expected bam subcommand"),
        }
    }

    #[test]
    fn test_pileup_filters_and_verbosity() {
        let args = Args::try_parse_from([
            "refpos-stats",
            "-vv",
            "pileup",
            "-",
            "6109",
            "--min-mq",
            "61",
            "--min-bq",
            "30",
            "--json",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        match args.command {
            Commands::Pileup {
                pileup_file,
                position,
                query,
            } => {
                assert_eq!(pileup_file, "-");
                assert_eq!(position, "6109");
                assert_eq!(query.min_mapping_quality, 61);
                assert_eq!(query.min_base_quality, 30);
                assert!(query.json);
            }
            _ => panic!("expected pileup subcommand"),
        }
    }

    #[test]
    fn test_config_force_requires_init() {
        assert!(Args::try_parse_from(["refpos-stats", "config", "--force"]).is_err());
        let args = Args::try_parse_from(["refpos-stats", "config", "--init", "--force"]).unwrap();
        assert!(matches!(args.command, Commands::Config { init: true, force: true }));
    }
}
