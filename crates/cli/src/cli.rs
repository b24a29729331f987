//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::Parser;
use tally_core::Money;

/// Tally - reconcile and classify text bank statements
#[derive(Parser, Debug)]
#[command(name = "tally")]
#[command(about = "Parse, reconcile and classify text bank statements", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory of statement text files (*.txt), one statement per file
    #[arg(short, long)]
    pub directory: PathBuf,

    /// Pipeline configuration (TOML): line shapes, date formats, rules, cutoff
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File to write unmatched lines to
    #[arg(long)]
    pub rejects: Option<PathBuf>,

    /// Print spending per bucket and the largest unclassified expenses
    #[arg(long)]
    pub buckets: bool,

    /// Only list unclassified expenses above this value (overrides the config)
    #[arg(long = "bucket-cut-off", value_parser = tally_import::parse_amount)]
    pub bucket_cut_off: Option<Money>,

    /// CSV output file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Print the aggregate report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
